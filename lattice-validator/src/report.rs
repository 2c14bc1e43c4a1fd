//! Validation report types.

use serde::Serialize;

use crate::config::ResourceType;
use crate::error::{LatticeError, ValidationError, ValidationPhase};

/// Flattened outcome of a validation run, for output.
///
/// CI pipelines only need `ok`; `phase` tells which stage failed and `errors`
/// lists everything that stage reported.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Resource category that was validated.
    pub resource_type: ResourceType,
    /// Whether every phase passed.
    pub ok: bool,
    /// The phase that failed, if any.
    pub phase: Option<ValidationPhase>,
    /// Errors reported by the failing phase, in the order they were found.
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Build a report from the result of a run such as [`crate::validate_all_plugins`].
    #[must_use]
    pub fn from_outcome(resource_type: ResourceType, outcome: &Result<(), LatticeError>) -> Self {
        let (phase, errors) = match outcome {
            Ok(()) => (None, Vec::new()),
            Err(LatticeError::Scan(err)) => (
                Some(ValidationPhase::Discovery),
                vec![ValidationError::in_file(&err.file, err.message.clone())],
            ),
            Err(LatticeError::Phase(err)) => (Some(err.phase()), err.errors().to_vec()),
            Err(LatticeError::RelativeUrls(err)) => {
                (Some(ValidationPhase::RelativeUrls), err.errors().to_vec())
            }
        };

        Self {
            resource_type,
            ok: phase.is_none(),
            phase,
            errors,
        }
    }

    /// Number of errors reported.
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.errors.len()
    }
}
