//! README documents and the file-load phase that produces them.

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::config::ResourceType;
use crate::error::{PhaseError, ValidationError, ValidationPhase};
use crate::format::frontmatter::{parse_frontmatter, split_frontmatter};

/// Raw README content as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeFile {
    pub path: PathBuf,
    pub content: String,
}

/// A README split into frontmatter and markdown body.
///
/// Validators only ever read it.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Readme {
    /// Unique within a batch.
    pub file_path: PathBuf,
    /// Markdown after the frontmatter block, untrimmed.
    pub body: String,
    /// Frontmatter mapping, opaque to the structural checks.
    pub frontmatter: Value,
}

impl Readme {
    #[must_use]
    pub fn new(
        file_path: impl Into<PathBuf>,
        body: impl Into<String>,
        frontmatter: Value,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            body: body.into(),
            frontmatter,
        }
    }
}

fn parse_readme(file: ReadmeFile) -> Result<Readme, ValidationError> {
    let (raw_frontmatter, body) =
        split_frontmatter(&file.content).map_err(|e| ValidationError::in_file(&file.path, e))?;
    let frontmatter =
        parse_frontmatter(raw_frontmatter).map_err(|e| ValidationError::in_file(&file.path, e))?;
    let body = body.to_owned();
    Ok(Readme {
        file_path: file.path,
        body,
        frontmatter,
    })
}

/// Turn raw README files into [`Readme`] values, preserving order.
///
/// # Errors
///
/// Every file that cannot be split or whose frontmatter cannot be parsed is
/// reported; the failures come back together as one `file_load` [`PhaseError`].
pub fn parse_readmes(
    resource_type: ResourceType,
    files: Vec<ReadmeFile>,
) -> Result<Vec<Readme>, PhaseError> {
    let mut readmes = Vec::with_capacity(files.len());
    let mut errors = Vec::new();

    for file in files {
        debug!(resource_type = %resource_type, file = %file.path.display(), "parsing README");
        match parse_readme(file) {
            Ok(readme) => readmes.push(readme),
            Err(err) => errors.push(err),
        }
    }

    match PhaseError::from_errors(ValidationPhase::FileLoad, errors) {
        Some(err) => Err(err),
        None => Ok(readmes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, content: &str) -> ReadmeFile {
        ReadmeFile {
            path: PathBuf::from(path),
            content: content.to_owned(),
        }
    }

    #[test]
    fn test_parse_readmes_in_order() {
        let files = vec![
            file("b/README.md", "---\ndisplay_name: B\n---\n# B\n"),
            file("a/README.md", "---\ndisplay_name: A\n---\n# A\n"),
        ];
        let readmes = parse_readmes(ResourceType::Plugins, files).unwrap();

        assert_eq!(readmes.len(), 2);
        assert_eq!(readmes[0].file_path, PathBuf::from("b/README.md"));
        assert_eq!(readmes[0].body, "# B\n");
        assert_eq!(readmes[1].frontmatter["display_name"], "A");
    }

    #[test]
    fn test_parse_readmes_collects_every_failure() {
        let files = vec![
            file("ok/README.md", "---\ndisplay_name: Ok\n---\n# Ok\n"),
            file("none/README.md", "# No frontmatter\n"),
            file("open/README.md", "---\ndisplay_name: Open\n"),
        ];
        let err = parse_readmes(ResourceType::Plugins, files).unwrap_err();

        assert_eq!(err.phase(), ValidationPhase::FileLoad);
        let files: Vec<_> = err
            .errors()
            .iter()
            .map(|e| e.file.clone().unwrap())
            .collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("none/README.md"),
                PathBuf::from("open/README.md")
            ]
        );
    }
}
