//! Integration tests for `lattice_validator::validate_all_plugins`.

use std::fs;
use std::path::{Path, PathBuf};

use lattice_validator::{
    LatticeError, RegistryConfig, ResourceType, ScanErrorKind, ValidationPhase, ValidationReport,
    validate_all_plugins,
};
use tempfile::TempDir;

const VALID_FRONTMATTER: &str = "---\ndisplay_name: Example\ndescription: An example plugin\nicon: ../../../../.icons/example.svg\ntags: [example]\n---\n";

fn registry() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let icons = tmp.path().join(".icons");
    fs::create_dir_all(&icons).unwrap();
    fs::write(icons.join("example.svg"), "<svg/>").unwrap();
    fs::create_dir_all(tmp.path().join("registry")).unwrap();
    tmp
}

fn write_plugin(root: &Path, namespace: &str, name: &str, content: &str) -> PathBuf {
    let dir = root
        .join("registry")
        .join(namespace)
        .join("plugins")
        .join(name);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("README.md");
    fs::write(&path, content).unwrap();
    path
}

fn plugin(body: &str) -> String {
    format!("{VALID_FRONTMATTER}{body}")
}

#[test]
fn test_valid_registry() {
    let tmp = registry();
    write_plugin(
        tmp.path(),
        "acme",
        "example",
        &plugin("# Example\n\nRuns the example.\n\n## Usage\n\n```tf\n# comment\n```\n"),
    );

    let result = validate_all_plugins(&RegistryConfig::new(tmp.path()));
    assert!(result.is_ok(), "unexpected error: {result:?}");
}

#[test]
fn test_empty_registry_is_ok() {
    let tmp = registry();
    assert!(validate_all_plugins(&RegistryConfig::new(tmp.path())).is_ok());
}

#[test]
fn test_missing_root_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let err = validate_all_plugins(&RegistryConfig::new(tmp.path().join("missing"))).unwrap_err();

    let LatticeError::Scan(scan) = err else {
        panic!("expected scan error, got {err:?}");
    };
    assert_eq!(scan.kind, ScanErrorKind::MissingRoot);
}

#[test]
fn test_file_load_failure_stops_before_readme_phase() {
    let tmp = registry();
    write_plugin(tmp.path(), "acme", "nofm", "# No frontmatter\n");
    write_plugin(tmp.path(), "acme", "broken", &plugin("no heading\n"));

    let err = validate_all_plugins(&RegistryConfig::new(tmp.path())).unwrap_err();
    let LatticeError::Phase(phase) = err else {
        panic!("expected phase error, got {err:?}");
    };
    assert_eq!(phase.phase(), ValidationPhase::FileLoad);
    assert_eq!(phase.errors().len(), 1);
    assert!(phase.errors()[0].message.contains("frontmatter"));
}

#[test]
fn test_readme_phase_collects_all_documents() {
    let tmp = registry();
    let a = write_plugin(tmp.path(), "acme", "a", &plugin("# A\n\n![x](x.png)\n"));
    write_plugin(tmp.path(), "acme", "b", &plugin("# B\n\nFine.\n"));
    let c = write_plugin(tmp.path(), "zeta", "c", &plugin("# C\n\nText.\n```sh\necho\n"));

    let err = validate_all_plugins(&RegistryConfig::new(tmp.path())).unwrap_err();
    let LatticeError::Phase(phase) = err else {
        panic!("expected phase error, got {err:?}");
    };

    assert_eq!(phase.phase(), ValidationPhase::Readme);
    let got: Vec<(PathBuf, String)> = phase
        .errors()
        .iter()
        .map(|e| (e.file.clone().unwrap(), e.message.clone()))
        .collect();
    assert_eq!(
        got,
        vec![
            (a, "did not find paragraph within h1 section".to_owned()),
            (
                c,
                "code blocks inside h1 section do not all terminate before end of file".to_owned()
            ),
        ]
    );
}

#[test]
fn test_structural_errors_skip_relative_url_check() {
    let tmp = registry();
    // Broken link and a missing paragraph: only the paragraph error is reported.
    write_plugin(
        tmp.path(),
        "acme",
        "a",
        &plugin("# A\n\n<img src=\"missing.png\">\n"),
    );

    let err = validate_all_plugins(&RegistryConfig::new(tmp.path())).unwrap_err();
    assert!(matches!(err, LatticeError::Phase(ref p) if p.phase() == ValidationPhase::Readme));
}

#[test]
fn test_relative_url_failure_reported_standalone() {
    let tmp = registry();
    let path = write_plugin(
        tmp.path(),
        "acme",
        "a",
        &plugin("# A\n\nSee the [guide](docs/guide.md).\n"),
    );

    let err = validate_all_plugins(&RegistryConfig::new(tmp.path())).unwrap_err();
    let LatticeError::RelativeUrls(urls) = &err else {
        panic!("expected relative URL error, got {err:?}");
    };
    assert_eq!(urls.errors().len(), 1);
    assert_eq!(urls.errors()[0].file.as_deref(), Some(path.as_path()));

    fs::create_dir_all(path.parent().unwrap().join("docs")).unwrap();
    fs::write(path.parent().unwrap().join("docs").join("guide.md"), "# Guide\n").unwrap();
    assert!(validate_all_plugins(&RegistryConfig::new(tmp.path())).is_ok());
}

#[test]
fn test_report_from_run() {
    let tmp = registry();
    write_plugin(tmp.path(), "acme", "a", &plugin("# A\n"));

    let outcome = validate_all_plugins(&RegistryConfig::new(tmp.path()));
    let report = ValidationReport::from_outcome(ResourceType::Plugins, &outcome);

    assert!(!report.ok);
    assert_eq!(report.phase, Some(ValidationPhase::Readme));
    assert_eq!(report.errors_count(), 1);
}
