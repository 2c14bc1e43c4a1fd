//! GitHub-flavored markdown alert validation.
//!
//! An alert is a blockquote whose first line is a marker such as `> [!NOTE]`,
//! followed by one or more quoted content lines. Fenced code blocks are skipped.

use crate::error::ValidationError;
use crate::format::markdown::is_code_fence;

/// Alert types GitHub renders.
pub const ALERT_TYPES: &[&str] = &["NOTE", "TIP", "IMPORTANT", "WARNING", "CAUTION"];

const ALERT_MARKER_PREFIX: &str = "[!";

/// An alert marker waiting for its first content line.
struct OpenAlert {
    line_number: usize,
    kind: String,
}

/// Text after the `>` of a blockquote line, or `None` for any other line.
fn blockquote_content(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix('>').map(str::trim)
}

/// Check one blockquote line. Returns the alert it opens, if any.
fn check_marker(
    line_number: usize,
    marker: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<OpenAlert> {
    let rest = marker.strip_prefix(ALERT_MARKER_PREFIX)?;
    let Some(close) = rest.find(']') else {
        errors.push(ValidationError::new(format!(
            "line {line_number}: GFM alert marker \"{marker}\" is missing a closing \"]\""
        )));
        return None;
    };

    let kind = &rest[..close];
    let trailing = rest[close + 1..].trim();

    if !ALERT_TYPES.contains(&kind) {
        let upper = kind.to_uppercase();
        if ALERT_TYPES.contains(&upper.as_str()) {
            errors.push(ValidationError::new(format!(
                "line {line_number}: GFM alert type \"{kind}\" must be written in upper case"
            )));
        } else {
            errors.push(ValidationError::new(format!(
                "line {line_number}: unknown GFM alert type \"{kind}\" (expected one of {})",
                ALERT_TYPES.join(", ")
            )));
        }
    }
    if !trailing.is_empty() {
        errors.push(ValidationError::new(format!(
            "line {line_number}: GFM alert marker [!{kind}] must be on its own line"
        )));
    }

    Some(OpenAlert {
        line_number,
        kind: kind.to_owned(),
    })
}

fn missing_content(alert: &OpenAlert) -> ValidationError {
    ValidationError::new(format!(
        "line {}: GFM alert [!{}] has no content",
        alert.line_number, alert.kind
    ))
}

/// Validate every GFM alert block in a README body.
#[must_use]
pub fn validate_gfm_alerts(body: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut in_code_block = false;
    let mut in_blockquote = false;
    let mut open_alert: Option<OpenAlert> = None;

    for (idx, line) in body.lines().enumerate() {
        let line_number = idx + 1;
        let fence = is_code_fence(line);
        let quoted = if fence || in_code_block {
            None
        } else {
            blockquote_content(line)
        };

        if let Some(alert) = open_alert.take() {
            match quoted {
                Some("") => open_alert = Some(alert),
                Some(_) => {}
                None => errors.push(missing_content(&alert)),
            }
        }

        // Only the first line of a blockquote can be a marker.
        if let Some(content) = quoted
            && !in_blockquote
        {
            open_alert = check_marker(line_number, content, &mut errors);
        }
        in_blockquote = quoted.is_some();

        if fence {
            in_code_block = !in_code_block;
        }
    }

    if let Some(alert) = open_alert {
        errors.push(missing_content(&alert));
    }

    errors
}
