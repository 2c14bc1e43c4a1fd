//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationReport`.
//! Color/terminal formatting belongs to the CLI layer, not here.

use std::io::Write;

use crate::error::ValidationPhase;
use crate::report::ValidationReport;

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

fn fix_hints(phase: ValidationPhase) -> &'static [&'static str] {
    match phase {
        ValidationPhase::Discovery => &[
            "Run from the repository root or pass --root",
            "READMEs live at registry/<namespace>/<resource type>/<name>/README.md",
        ],
        ValidationPhase::FileLoad => &[
            "Every README must open with a YAML frontmatter block between two \"---\" lines",
        ],
        ValidationPhase::Readme => &[
            "Start the body with a single \"# \" heading followed by a prose paragraph",
            "Close every ``` code fence before the next heading",
            "Fill in display_name, description and icon in the frontmatter",
        ],
        ValidationPhase::RelativeUrls => &[
            "Relative links and icons resolve from the README's own directory",
        ],
    }
}

/// Format a `ValidationReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  LATTICE README VALIDATOR")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Resource type:  {}", report.resource_type)?;
    writeln!(writer, "  Errors found:   {}", report.errors_count())?;
    writeln!(writer)?;

    if let Some(phase) = report.phase {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  ERRORS DURING \"{phase}\" PHASE")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for error in &report.errors {
            writeln!(writer, "{}", error.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    match report.phase {
        None => writeln!(
            writer,
            "\u{2713} All {} READMEs passed validation",
            report.resource_type
        )?,
        Some(phase) => {
            writeln!(
                writer,
                "\u{2717} {} error(s) found during the \"{phase}\" phase",
                report.errors_count()
            )?;
            writeln!(writer)?;
            writeln!(writer, "  To fix:")?;
            for hint in fix_hints(phase) {
                writeln!(writer, "    - {hint}")?;
            }
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}
