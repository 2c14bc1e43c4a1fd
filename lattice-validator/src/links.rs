//! Relative URL validation across a batch of READMEs.
//!
//! Relative targets come from the frontmatter `icon` and from markdown links,
//! images and HTML `src`/`href` attributes in the body. Each must resolve to a
//! file or directory relative to the README that references it.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RelativeUrlError, ValidationError};
use crate::format::markdown::is_code_fence;
use crate::readme::Readme;

/// `[text](target)` and `![alt](target)`. A `<...>` target may contain spaces.
static MARKDOWN_TARGET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"\]\(\s*(?:<([^>]+)>|([^)\s]+))") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid markdown link regex: {err}"),
    });

static HTML_TARGET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r#"\b(?:src|href)\s*=\s*["']([^"']+)["']"#) {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid HTML attribute regex: {err}"),
    });

/// Inline code spans, single or double backtick.
static CODE_SPAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"``.*?``|`[^`]*`") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid code span regex: {err}"),
    });

/// A URI scheme such as `https:`, `mailto:` or `tel:`.
static SCHEME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]+:") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid URI scheme regex: {err}"),
    });

/// Where in a README a target was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetSource {
    Icon,
    Line(usize),
}

/// Strip `#fragment` and `?query`; `None` for targets that are not relative paths.
fn relative_path_of(target: &str) -> Option<&str> {
    if target.starts_with('#') || SCHEME_PATTERN.is_match(target) {
        return None;
    }
    let end = target.find(['#', '?']).unwrap_or(target.len());
    let path = &target[..end];
    (!path.is_empty()).then_some(path)
}

fn body_targets(body: &str) -> Vec<(TargetSource, &str)> {
    let mut targets = Vec::new();
    let mut in_code_block = false;

    for (idx, line) in body.lines().enumerate() {
        if is_code_fence(line) {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block {
            continue;
        }

        let source = TargetSource::Line(idx + 1);
        let code_spans: Vec<_> = CODE_SPAN_PATTERN
            .find_iter(line)
            .map(|span| span.range())
            .collect();
        let in_code_span = |pos: usize| code_spans.iter().any(|span| span.contains(&pos));

        for pattern in [&*MARKDOWN_TARGET_PATTERN, &*HTML_TARGET_PATTERN] {
            for caps in pattern.captures_iter(line) {
                let Some(target) = caps.get(1).or_else(|| caps.get(2)) else {
                    continue;
                };
                if !in_code_span(target.start()) {
                    targets.push((source, target.as_str()));
                }
            }
        }
    }

    targets
}

fn check_target(
    readme: &Readme,
    source: TargetSource,
    target: &str,
    broken: &mut Vec<ValidationError>,
) {
    let Some(path) = relative_path_of(target) else {
        return;
    };
    let location = match source {
        TargetSource::Icon => "icon".to_owned(),
        TargetSource::Line(line) => format!("line {line}"),
    };

    if path.starts_with('/') {
        broken.push(ValidationError::in_file(
            &readme.file_path,
            format!(
                "{location}: root-relative URL \"{target}\" is not allowed; use a path relative to the README"
            ),
        ));
        return;
    }

    let base = readme.file_path.parent().unwrap_or_else(|| Path::new(""));
    if !base.join(path).exists() {
        broken.push(ValidationError::in_file(
            &readme.file_path,
            format!("{location}: relative URL \"{target}\" does not resolve to an existing file"),
        ));
    }
}

/// Check every relative URL in every README.
///
/// # Errors
///
/// Returns a [`RelativeUrlError`] listing every target that does not resolve,
/// in README order then line order.
pub fn validate_relative_urls(readmes: &[Readme]) -> Result<(), RelativeUrlError> {
    let mut broken = Vec::new();

    for readme in readmes {
        if let Some(icon) = readme.frontmatter.get("icon").and_then(serde_json::Value::as_str) {
            check_target(readme, TargetSource::Icon, icon, &mut broken);
        }
        for (source, target) in body_targets(&readme.body) {
            check_target(readme, source, target, &mut broken);
        }
    }

    match RelativeUrlError::from_errors(broken) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
