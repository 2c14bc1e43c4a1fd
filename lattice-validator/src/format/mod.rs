//! Line-oriented README checks.
//!
//! Each sub-module handles one concern:
//! - `markdown` — baseline heading structure of a README body
//! - `section` — paragraph and code-fence rules for the first `# ` section
//! - `alerts` — GitHub-flavored markdown alert blocks (`> [!NOTE]`)
//! - `frontmatter` — splitting and checking the YAML frontmatter block

pub mod alerts;
pub mod frontmatter;
pub mod markdown;
pub mod section;
