//! Scanner for the first top-level heading section of a README.
//!
//! The section runs from the opening `# ` line up to (not including) the next
//! line that starts with `#` outside a fenced code block, or the end of the
//! text. Two facts are collected over it:
//! - whether it holds at least one prose line (anything but blanks, image
//!   embeds and raw markup);
//! - whether every code fence opened in it is closed again.
//!
//! Fence toggling is checked before heading termination, so a `#` line inside
//! an open fence (a shell comment, say) stays part of the section.

use crate::error::ValidationError;
use crate::format::markdown::{H1_MARKER, is_code_fence};

pub const MISSING_PARAGRAPH: &str = "did not find paragraph within h1 section";

pub const UNTERMINATED_CODE_BLOCK: &str =
    "code blocks inside h1 section do not all terminate before end of file";

/// Per-scan state. Lives for exactly one call to [`scan_h1_section`].
#[derive(Debug, Default)]
struct ScanState {
    found_paragraph: bool,
    inside_code_block: bool,
    line_number: usize,
}

/// Prose is any non-blank line that is not an image embed (`![`) or raw markup (`<`).
fn is_paragraph_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with("![") && !trimmed.starts_with('<')
}

/// Scan the first `# ` section of an already-trimmed README body.
///
/// Returns at most two errors, missing paragraph first. When the body does
/// not open with `# ` (including an empty body) nothing is reported: the
/// baseline body check owns that failure.
#[must_use]
pub fn scan_h1_section(trimmed: &str) -> Vec<ValidationError> {
    let mut state = ScanState::default();

    for line in trimmed.lines() {
        state.line_number += 1;

        if state.line_number == 1 {
            if !line.starts_with(H1_MARKER) {
                return Vec::new();
            }
            continue;
        }

        if is_code_fence(line) {
            state.inside_code_block = !state.inside_code_block;
            continue;
        }

        if !state.inside_code_block && line.starts_with('#') {
            break;
        }

        state.found_paragraph = state.found_paragraph || is_paragraph_line(line);
    }

    if state.line_number == 0 {
        return Vec::new();
    }

    let mut errors = Vec::new();
    if !state.found_paragraph {
        errors.push(ValidationError::new(MISSING_PARAGRAPH));
    }
    if state.inside_code_block {
        errors.push(ValidationError::new(UNTERMINATED_CODE_BLOCK));
    }
    errors
}
