//! Plugin README validation.
//!
//! A run moves through discovery, file load, per-README checks and finally the
//! cross-README link check. Within the per-README phase every check runs on
//! every README and all errors are collected; between phases the run stops at
//! the first failing one.

use tracing::info;

use crate::config::{RegistryConfig, ResourceType};
use crate::error::{LatticeError, PhaseError, ValidationError, ValidationPhase};
use crate::format::alerts::validate_gfm_alerts;
use crate::format::frontmatter::validate_frontmatter;
use crate::format::markdown::validate_readme_body;
use crate::format::section::scan_h1_section;
use crate::links::validate_relative_urls;
use crate::readme::{Readme, parse_readmes};
use crate::strategy::fs::discover_readmes;

const RESOURCE_TYPE: ResourceType = ResourceType::Plugins;

/// Structural checks on a plugin README body.
///
/// Baseline heading errors come first, then the first-section scan. Errors
/// are not yet attributed to a file.
#[must_use]
pub fn validate_plugin_readme_body(body: &str) -> Vec<ValidationError> {
    let trimmed = body.trim();
    let mut errors = validate_readme_body(trimmed);
    errors.extend(scan_h1_section(trimmed));
    errors
}

/// Every check for one plugin README, each error attributed to its file.
///
/// Body, alert and frontmatter checks all run regardless of earlier failures.
#[must_use]
pub fn validate_plugin_readme(readme: &Readme) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = validate_plugin_readme_body(&readme.body)
        .into_iter()
        .map(|err| err.with_file(&readme.file_path))
        .collect();
    errors.extend(
        validate_gfm_alerts(&readme.body)
            .into_iter()
            .map(|err| err.with_file(&readme.file_path)),
    );
    errors.extend(validate_frontmatter(
        RESOURCE_TYPE,
        &readme.file_path,
        &readme.frontmatter,
    ));
    errors
}

/// Validate a batch of plugin READMEs.
///
/// # Errors
///
/// Returns a `readme` [`PhaseError`] holding every error from every README,
/// in README order, when at least one README has a defect.
pub fn validate_plugin_readmes(readmes: &[Readme]) -> Result<(), PhaseError> {
    let mut errors = Vec::new();
    for readme in readmes {
        errors.extend(validate_plugin_readme(readme));
    }

    match PhaseError::from_errors(ValidationPhase::Readme, errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Validate every plugin README under `config.root`.
///
/// # Errors
///
/// - [`LatticeError::Scan`] if READMEs cannot be discovered or read;
/// - [`LatticeError::Phase`] (`file_load`) if any README cannot be split into
///   frontmatter and body;
/// - [`LatticeError::Phase`] (`readme`) listing every structural/metadata defect;
/// - [`LatticeError::RelativeUrls`] if READMEs are well-formed but link to
///   files that do not exist.
pub fn validate_all_plugins(config: &RegistryConfig) -> Result<(), LatticeError> {
    let files = discover_readmes(config, RESOURCE_TYPE)?;
    info!(
        resource_type = %RESOURCE_TYPE,
        num_files = files.len(),
        "processing plugin README files"
    );

    let readmes = parse_readmes(RESOURCE_TYPE, files)?;
    validate_plugin_readmes(&readmes)?;
    info!(
        resource_type = %RESOURCE_TYPE,
        num_files = readmes.len(),
        "processed README files as valid Lattice resources"
    );

    validate_relative_urls(&readmes)?;
    info!(
        resource_type = %RESOURCE_TYPE,
        "all relative URLs for READMEs are valid"
    );
    Ok(())
}
