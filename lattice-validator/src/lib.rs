//! # lattice-validator
//!
//! Structural and metadata validation for README files in the Lattice
//! resource catalog.
//!
//! The per-README checks work on in-memory [`Readme`] values and never touch
//! the filesystem; discovery and link resolution live in their own modules.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lattice_validator::{RegistryConfig, ResourceType, ValidationReport, validate_all_plugins};
//!
//! let config = RegistryConfig::new(".");
//! let outcome = validate_all_plugins(&config);
//! let report = ValidationReport::from_outcome(ResourceType::Plugins, &outcome);
//! println!("OK: {}", report.ok);
//! ```
//!
//! Checking a single body:
//!
//! ```rust
//! use lattice_validator::validate_plugin_readme_body;
//!
//! let errors = validate_plugin_readme_body("# Title\n![img](x.png)\n");
//! assert_eq!(errors[0].message, "did not find paragraph within h1 section");
//! ```

mod config;
mod error;
pub mod format;
mod links;
pub mod output;
mod plugins;
mod readme;
mod report;
pub mod strategy;

pub use config::{RegistryConfig, ResourceType};
pub use error::{
    LatticeError, PhaseError, RelativeUrlError, ScanError, ScanErrorKind, ValidationError,
    ValidationPhase,
};
pub use links::validate_relative_urls;
pub use plugins::{
    validate_all_plugins, validate_plugin_readme, validate_plugin_readme_body,
    validate_plugin_readmes,
};
pub use readme::{Readme, ReadmeFile, parse_readmes};
pub use report::ValidationReport;
