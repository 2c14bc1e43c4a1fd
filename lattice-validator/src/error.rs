//! Error types for Lattice README validation.
//!
//! Two layers:
//! - [`ValidationError`] is plain data: one defect found in one README. Many of
//!   them accumulate during a run and none is ever dropped.
//! - [`ScanError`], [`PhaseError`], [`RelativeUrlError`] and [`LatticeError`] are
//!   real `std::error::Error` values that end a run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Named stage of a validation run, used to group reported errors.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ValidationPhase {
    /// Finding README files on disk.
    Discovery,
    /// Splitting README files into frontmatter and body.
    FileLoad,
    /// Per-README structural and metadata checks.
    Readme,
    /// Cross-README relative link checks.
    RelativeUrls,
}

impl ValidationPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discovery => "discovery",
            Self::FileLoad => "file_load",
            Self::Readme => "readme",
            Self::RelativeUrls => "relative_urls",
        }
    }
}

impl fmt::Display for ValidationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single defect found in a README.
///
/// The file path is a field of its own, never folded into the message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidationError {
    /// README the defect belongs to. `None` only before the error has been
    /// attributed to a document.
    pub file: Option<PathBuf>,
    /// Human-readable description of the defect.
    pub message: String,
}

impl ValidationError {
    /// Create an error that is not yet attributed to a file.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            file: None,
            message: message.into(),
        }
    }

    /// Create an error already attributed to `file`.
    #[must_use]
    pub fn in_file(file: &Path, message: impl Into<String>) -> Self {
        Self {
            file: Some(file.to_owned()),
            message: message.into(),
        }
    }

    /// Attribute this error to `file`.
    #[must_use]
    pub fn with_file(mut self, file: &Path) -> Self {
        self.file = Some(file.to_owned());
        self
    }

    /// Format the error for human-readable output: `{file}: {message}`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match &self.file {
            Some(file) => format!("{}: {}", file.display(), self.message),
            None => self.message.clone(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_human_readable())
    }
}

fn write_error_list(
    f: &mut fmt::Formatter<'_>,
    header: &str,
    errors: &[ValidationError],
) -> fmt::Result {
    write!(f, "{header}:")?;
    for error in errors {
        write!(f, "\n- {error}")?;
    }
    Ok(())
}

/// Every defect collected during one phase of a run.
///
/// Only constructible with at least one error, see [`PhaseError::from_errors`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PhaseError {
    phase: ValidationPhase,
    errors: Vec<ValidationError>,
}

impl PhaseError {
    /// Wrap `errors` for `phase`, or return `None` when there is nothing to report.
    #[must_use]
    pub fn from_errors(phase: ValidationPhase, errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { phase, errors })
        }
    }

    #[must_use]
    pub fn phase(&self) -> ValidationPhase {
        self.phase
    }

    /// Collected errors, in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = format!("error during \"{}\" phase of README validation", self.phase);
        write_error_list(f, &header, &self.errors)
    }
}

impl std::error::Error for PhaseError {}

/// Broken relative links found once every README passed structural checks.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RelativeUrlError {
    broken: Vec<ValidationError>,
}

impl RelativeUrlError {
    /// Wrap broken-link findings, or return `None` when every link resolved.
    #[must_use]
    pub fn from_errors(broken: Vec<ValidationError>) -> Option<Self> {
        if broken.is_empty() {
            None
        } else {
            Some(Self { broken })
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.broken
    }
}

impl fmt::Display for RelativeUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_error_list(
            f,
            "README files contain relative URLs that do not resolve",
            &self.broken,
        )
    }
}

impl std::error::Error for RelativeUrlError {}

/// The kind of infrastructure failure that prevented README discovery.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// The registry root (or its `registry/` directory) does not exist.
    MissingRoot,
    /// An I/O error occurred while reading a file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The resolved path is outside the registry root (symlink escape).
    OutsideRepository,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A fatal discovery failure. Aborts the run; never collected.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, thiserror::Error)]
#[error("{}: [scan error] {}", .file.display(), .message)]
#[non_exhaustive]
pub struct ScanError {
    /// The path that could not be scanned.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    #[must_use]
    pub fn new(file: &Path, kind: ScanErrorKind, message: impl Into<String>) -> Self {
        Self {
            file: file.to_owned(),
            kind,
            message: message.into(),
        }
    }
}

/// Everything that can make a validation run fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// README files could not be discovered or read.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// One or more README files failed a phase; every defect is listed.
    #[error(transparent)]
    Phase(#[from] PhaseError),
    /// README files passed structural checks but link to missing files.
    #[error(transparent)]
    RelativeUrls(#[from] RelativeUrlError),
}
