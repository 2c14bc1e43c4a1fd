//! Configuration types for Lattice README validation.
//!
//! The core validators work on in-memory documents and take no configuration;
//! everything here describes where README files come from.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Category of catalog resource. Each has its own directory under a namespace
/// and its own frontmatter rules.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ResourceType {
    Plugins,
}

impl ResourceType {
    /// Directory name used for this resource type inside a namespace.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Plugins => "plugins",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Filesystem options for discovering README files.
///
/// READMEs are expected at `<root>/registry/<namespace>/<resource type>/<name>/README.md`.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RegistryConfig {
    /// Repository root containing the `registry/` directory.
    pub root: PathBuf,
    /// Exclude patterns (glob format), matched against the full path and the file name.
    pub exclude: Vec<String>,
    /// Maximum README size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links.
    ///
    /// **Defaults to `false`**. Even when enabled, files resolving outside the
    /// registry directory are rejected.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl RegistryConfig {
    /// Config rooted at `root`, everything else default.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }
}
