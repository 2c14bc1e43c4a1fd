//! README frontmatter: splitting it off the body and checking its fields.
//!
//! Frontmatter is the YAML block between two `---` lines at the very top of a
//! README. It is parsed into a `serde_json::Value` so that field/type rules can
//! report every problem instead of failing on the first deserialization error.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::config::ResourceType;
use crate::error::ValidationError;

const FRONTMATTER_DELIMITER: &str = "---";

/// Icon extensions the catalog site can render.
pub const ICON_EXTENSIONS: &[&str] = &["svg", "png", "jpg", "jpeg", "webp"];

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid tag regex: {err}"),
    });

/// Split README content into `(frontmatter, body)`.
///
/// # Errors
///
/// Returns a message when the content does not open with a `---` line or the
/// block is never closed.
pub fn split_frontmatter(content: &str) -> Result<(&str, &str), String> {
    let mut lines = content.split_inclusive('\n');
    let opened = lines
        .next()
        .is_some_and(|first| first.trim_end() == FRONTMATTER_DELIMITER);
    if !opened {
        return Err("README does not start with a frontmatter block (\"---\")".to_owned());
    }

    let start = content.find('\n').map_or(content.len(), |idx| idx + 1);
    let mut offset = start;
    for line in lines {
        if line.trim_end() == FRONTMATTER_DELIMITER {
            let body_start = offset + line.len();
            return Ok((&content[start..offset], &content[body_start..]));
        }
        offset += line.len();
    }

    Err("README frontmatter block is not terminated by a closing \"---\" line".to_owned())
}

/// Parse a frontmatter block into a YAML mapping.
///
/// # Errors
///
/// Returns a message when the block is empty, is not valid YAML, or is not a mapping.
pub fn parse_frontmatter(raw: &str) -> Result<Value, String> {
    if raw.trim().is_empty() {
        return Err("README frontmatter is empty".to_owned());
    }
    let value: Value =
        serde_saphyr::from_str(raw).map_err(|e| format!("frontmatter is not valid YAML: {e}"))?;
    if !value.is_object() {
        return Err("frontmatter must be a YAML mapping".to_owned());
    }
    Ok(value)
}

/// Validate frontmatter fields for a resource type.
///
/// Every error returned is already attributed to `file_path`.
#[must_use]
pub fn validate_frontmatter(
    resource_type: ResourceType,
    file_path: &Path,
    frontmatter: &Value,
) -> Vec<ValidationError> {
    let Some(fields) = frontmatter.as_object() else {
        return vec![ValidationError::in_file(
            file_path,
            "frontmatter must be a YAML mapping",
        )];
    };

    let messages = match resource_type {
        ResourceType::Plugins => plugin_frontmatter_errors(fields),
    };
    messages
        .into_iter()
        .map(|message| ValidationError::in_file(file_path, message))
        .collect()
}

fn plugin_frontmatter_errors(fields: &Map<String, Value>) -> Vec<String> {
    let mut errors = Vec::new();

    required_string(fields, "display_name", &mut errors);
    required_string(fields, "description", &mut errors);
    if let Some(icon) = required_string(fields, "icon", &mut errors) {
        check_icon(icon, &mut errors);
    }

    if let Some(verified) = fields.get("verified")
        && !verified.is_boolean()
    {
        errors.push("field \"verified\" must be a boolean".to_owned());
    }

    if let Some(tags) = fields.get("tags") {
        check_tags(tags, &mut errors);
    }

    errors
}

fn required_string<'a>(
    fields: &'a Map<String, Value>,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a str> {
    match fields.get(name) {
        None => {
            errors.push(format!("missing required field \"{name}\""));
            None
        }
        Some(Value::String(value)) if value.trim().is_empty() => {
            errors.push(format!("field \"{name}\" must not be empty"));
            None
        }
        Some(Value::String(value)) => Some(value.as_str()),
        Some(_) => {
            errors.push(format!("field \"{name}\" must be a string"));
            None
        }
    }
}

fn check_icon(icon: &str, errors: &mut Vec<String>) {
    if icon.contains("://") {
        errors.push(format!(
            "icon \"{icon}\" must be a relative path to a file in the repository, not a URL"
        ));
        return;
    }

    let extension = Path::new(icon)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(str::to_lowercase);
    let supported = extension
        .as_deref()
        .is_some_and(|ext| ICON_EXTENSIONS.contains(&ext));
    if !supported {
        errors.push(format!(
            "icon \"{icon}\" must have one of the extensions: {}",
            ICON_EXTENSIONS.join(", ")
        ));
    }
}

fn check_tags(tags: &Value, errors: &mut Vec<String>) {
    let Value::Array(items) = tags else {
        errors.push("field \"tags\" must be a list of strings".to_owned());
        return;
    };

    let mut seen = HashSet::new();
    for item in items {
        let Value::String(tag) = item else {
            errors.push(format!("tag {item} must be a string"));
            continue;
        };
        if !TAG_PATTERN.is_match(tag) {
            errors.push(format!(
                "tag \"{tag}\" must be lowercase kebab-case (e.g., \"code-server\")"
            ));
        }
        if !seen.insert(tag.as_str()) {
            errors.push(format!("duplicate tag \"{tag}\""));
        }
    }
}
