//! Baseline heading structure checks for README bodies.
//!
//! These rules apply to every resource type: the body starts with a single
//! ATX-style h1, and heading levels only ever deepen one step at a time.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Line prefix that opens and closes a fenced code block.
pub const CODE_FENCE: &str = "```";

/// Line prefix of a top-level heading.
pub const H1_MARKER: &str = "# ";

const MAX_HEADER_LEVEL: usize = 6;

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^(#+)(\s*)") {
    Ok(regex) => regex,
    Err(err) => panic!("Invalid header regex: {err}"),
});

/// Whether `line` toggles a fenced code block.
///
/// Only fences at column 1 count; an indented fence is treated as text.
#[must_use]
pub fn is_code_fence(line: &str) -> bool {
    line.starts_with(CODE_FENCE)
}

/// Validate the heading structure of a README body.
///
/// The body is trimmed first. An empty body, or one that does not open with
/// `# `, yields a single error and nothing else is checked. Lines inside
/// fenced code blocks are never headings.
#[must_use]
pub fn validate_readme_body(body: &str) -> Vec<ValidationError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return vec![ValidationError::new("README body is empty")];
    }
    if !trimmed.starts_with(H1_MARKER) {
        return vec![ValidationError::new(
            "README body must start with ATX-style h1 header (i.e., \"# \")",
        )];
    }

    let mut errors = Vec::new();
    let mut latest_level: usize = 0;
    let mut found_first_h1 = false;
    let mut in_code_block = false;

    for line in trimmed.lines() {
        if is_code_fence(line) {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block {
            continue;
        }

        let Some(groups) = HEADER_PATTERN.captures(line) else {
            continue;
        };
        let level = groups.get(1).map_or(0, |m| m.as_str().len());
        let spacing = groups.get(2).map_or("", |m| m.as_str());

        if spacing.is_empty() {
            errors.push(ValidationError::new(
                "header does not have space between header characters and main header text",
            ));
        }

        if level == 1 && !found_first_h1 {
            found_first_h1 = true;
            latest_level = 1;
            continue;
        }

        // Past this point the heading tree is broken and later levels mean nothing.
        if level == 1 {
            errors.push(ValidationError::new(
                "READMEs cannot contain more than h1 header",
            ));
            break;
        }
        if level > MAX_HEADER_LEVEL {
            errors.push(ValidationError::new(format!(
                "README/HTML files cannot have headers exceed level {MAX_HEADER_LEVEL} (found level {level})"
            )));
            break;
        }

        if level > latest_level && level != latest_level + 1 {
            errors.push(ValidationError::new(
                "headers are not allowed to increase more than 1 level at a time",
            ));
            continue;
        }
        latest_level = level;
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_valid_heading_tree() {
        let body = "# Plugin\n\nText.\n\n## Usage\n\n### Details\n\n## Notes\n";
        assert!(validate_readme_body(body).is_empty());
    }

    #[test]
    fn test_empty_body() {
        let errors = validate_readme_body("  \n\n ");
        assert_eq!(messages(&errors), vec!["README body is empty"]);
    }

    #[test]
    fn test_missing_h1() {
        let errors = validate_readme_body("Some text without heading\n");
        assert_eq!(
            messages(&errors),
            vec!["README body must start with ATX-style h1 header (i.e., \"# \")"]
        );
    }

    #[test]
    fn test_second_h1_stops_scan() {
        let body = "# One\n\ntext\n\n# Two\n\n#### skipped\n";
        let errors = validate_readme_body(body);
        assert_eq!(
            messages(&errors),
            vec!["READMEs cannot contain more than h1 header"]
        );
    }

    #[test]
    fn test_header_without_space() {
        let errors = validate_readme_body("# Title\n\n##Usage\n");
        assert_eq!(
            messages(&errors),
            vec!["header does not have space between header characters and main header text"]
        );
    }

    #[test]
    fn test_level_jump() {
        let errors = validate_readme_body("# Title\n\n### Too deep\n\n## Fine\n");
        assert_eq!(
            messages(&errors),
            vec!["headers are not allowed to increase more than 1 level at a time"]
        );
    }

    #[test]
    fn test_level_beyond_six() {
        let body = "# 1\n## 2\n### 3\n#### 4\n##### 5\n###### 6\n####### 7\n";
        let errors = validate_readme_body(body);
        assert_eq!(
            messages(&errors),
            vec!["README/HTML files cannot have headers exceed level 6 (found level 7)"]
        );
    }

    #[test]
    fn test_comments_in_code_block_ignored() {
        let body = "# Title\n\n```sh\n# install\n#### not a header\n```\n";
        assert!(validate_readme_body(body).is_empty());
    }
}
