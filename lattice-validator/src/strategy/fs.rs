//! Filesystem README discovery.
//!
//! READMEs live at `<root>/registry/<namespace>/<resource type>/<name>/README.md`.
//! Security properties enforced here:
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths are checked to remain within the registry directory
//! - Maximum directory depth is enforced to prevent infinite recursion
//! - Bounded reads cap memory use per file
//!
//! Any failure here is fatal and ends the run.

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::{RegistryConfig, ResourceType};
use crate::error::{ScanError, ScanErrorKind};
use crate::readme::ReadmeFile;

/// Directory under the root that holds every namespace.
pub const REGISTRY_DIR: &str = "registry";

pub const README_FILE_NAME: &str = "README.md";

/// Directories to skip
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git"];

/// `registry/<namespace>/<resource type>/<name>/README.md` sits four levels below `registry/`.
const README_DEPTH: usize = 4;

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be **included** (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

/// Whether `path` is `<namespace>/<resource type>/<name>/README.md` for this resource type.
fn is_resource_readme(path: &Path, resource_type: ResourceType) -> bool {
    let is_readme = path
        .file_name()
        .is_some_and(|name| name == README_FILE_NAME);
    let type_dir = path.parent().and_then(Path::parent).and_then(Path::file_name);
    is_readme && type_dir.is_some_and(|dir| dir == resource_type.dir_name())
}

fn compile_excludes(exclude: &[String]) -> Result<Vec<Pattern>, ScanError> {
    exclude
        .iter()
        .map(|pat_str| {
            Pattern::new(pat_str).map_err(|e| {
                ScanError::new(
                    Path::new(pat_str),
                    ScanErrorKind::InvalidExcludePattern,
                    format!("Invalid exclude glob pattern '{pat_str}': {e}"),
                )
            })
        })
        .collect()
}

/// Find every README path for `resource_type`, sorted.
///
/// # Errors
///
/// Returns the first [`ScanError`]: missing root or `registry/` directory,
/// invalid exclude pattern, traversal failure, or a path escaping the registry.
pub fn find_readmes(
    config: &RegistryConfig,
    resource_type: ResourceType,
) -> Result<Vec<PathBuf>, ScanError> {
    if !config.root.exists() {
        return Err(ScanError::new(
            &config.root,
            ScanErrorKind::MissingRoot,
            "Registry root does not exist",
        ));
    }
    let registry_dir = config.root.join(REGISTRY_DIR);
    if !registry_dir.is_dir() {
        return Err(ScanError::new(
            &registry_dir,
            ScanErrorKind::MissingRoot,
            "Registry directory does not exist",
        ));
    }

    let exclude_patterns = compile_excludes(&config.exclude)?;
    let canonical_root = registry_dir.canonicalize().map_err(|e| {
        ScanError::new(
            &registry_dir,
            ScanErrorKind::IoError,
            format!("Failed to canonicalize registry directory: {e}"),
        )
    })?;

    let mut files = Vec::new();
    for entry_result in WalkDir::new(&registry_dir)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .into_iter()
        .filter_entry(is_not_skip_dir)
    {
        let entry = entry_result.map_err(|walk_err| {
            let path = walk_err
                .path()
                .map_or_else(|| registry_dir.clone(), Path::to_path_buf);
            ScanError::new(
                &path,
                ScanErrorKind::WalkError,
                format!("Directory traversal error: {walk_err}"),
            )
        })?;

        let file_path = entry.path();
        if entry.depth() != README_DEPTH
            || !file_path.is_file()
            || !is_resource_readme(file_path, resource_type)
        {
            continue;
        }

        // Catches symlink escapes even when follow_links is true.
        let canonical_path = file_path.canonicalize().map_err(|e| {
            ScanError::new(
                file_path,
                ScanErrorKind::IoError,
                format!("Failed to canonicalize path: {e}"),
            )
        })?;
        if !canonical_path.starts_with(&canonical_root) {
            return Err(ScanError::new(
                file_path,
                ScanErrorKind::OutsideRepository,
                format!(
                    "Path resolves outside registry directory: {} -> {}",
                    file_path.display(),
                    canonical_path.display()
                ),
            ));
        }

        if matches_exclude(file_path, &exclude_patterns) {
            debug!(file = %file_path.display(), "excluded README");
            continue;
        }

        files.push(file_path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// Reads at most `max_file_size + 1` bytes so an oversized file is detected
/// without loading all of it.
///
/// # Errors
///
/// Returns a [`ScanError`] if the file cannot be read, exceeds
/// `max_file_size`, or is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScanError::new(
            path,
            ScanErrorKind::IoError,
            format!("Failed to open file: {e}"),
        )
    })?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            ScanError::new(
                path,
                ScanErrorKind::IoError,
                format!("Failed to read file: {e}"),
            )
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(ScanError::new(
            path,
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|_| {
        ScanError::new(path, ScanErrorKind::InvalidEncoding, "File is not valid UTF-8")
    })
}

/// Discover and read every README for `resource_type`, in path order.
///
/// # Errors
///
/// Returns the first [`ScanError`] from discovery or reading.
pub fn discover_readmes(
    config: &RegistryConfig,
    resource_type: ResourceType,
) -> Result<Vec<ReadmeFile>, ScanError> {
    find_readmes(config, resource_type)?
        .into_iter()
        .map(|path| {
            let content = read_file_bounded(&path, config.max_file_size)?;
            Ok(ReadmeFile { path, content })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_readme(root: &Path, namespace: &str, resource: &str, name: &str) -> PathBuf {
        let dir = root
            .join(REGISTRY_DIR)
            .join(namespace)
            .join(resource)
            .join(name);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(README_FILE_NAME);
        fs::write(&path, "---\ndisplay_name: X\n---\n# X\n").unwrap();
        path
    }

    #[test]
    fn test_find_readmes_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        let b = write_readme(tmp.path(), "zeta", "plugins", "b");
        let a = write_readme(tmp.path(), "acme", "plugins", "a");
        write_readme(tmp.path(), "acme", "presets", "ignored");
        fs::write(
            tmp.path().join(REGISTRY_DIR).join("acme").join(README_FILE_NAME),
            "# Namespace\n",
        )
        .unwrap();

        let config = RegistryConfig::new(tmp.path());
        let found = find_readmes(&config, ResourceType::Plugins).unwrap();
        assert_eq!(found, vec![a, b]);
    }

    #[test]
    fn test_find_readmes_exclude() {
        let tmp = TempDir::new().unwrap();
        write_readme(tmp.path(), "acme", "plugins", "keep");
        write_readme(tmp.path(), "acme", "plugins", "drop");

        let mut config = RegistryConfig::new(tmp.path());
        config.exclude = vec!["*/drop/*".to_owned()];
        let found = find_readmes(&config, ResourceType::Plugins).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("keep/README.md"));
    }

    #[test]
    fn test_find_readmes_invalid_exclude() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(REGISTRY_DIR)).unwrap();

        let mut config = RegistryConfig::new(tmp.path());
        config.exclude = vec!["[".to_owned()];
        let err = find_readmes(&config, ResourceType::Plugins).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::InvalidExcludePattern);
    }

    #[test]
    fn test_find_readmes_missing_registry() {
        let tmp = TempDir::new().unwrap();
        let err = find_readmes(&RegistryConfig::new(tmp.path()), ResourceType::Plugins)
            .unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::MissingRoot);

        let err = find_readmes(
            &RegistryConfig::new(tmp.path().join("nope")),
            ResourceType::Plugins,
        )
        .unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::MissingRoot);
    }

    #[test]
    fn test_read_file_bounded_too_large() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.md");
        fs::write(&path, "x".repeat(32)).unwrap();

        let err = read_file_bounded(&path, 16).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::FileTooLarge);
        assert_eq!(read_file_bounded(&path, 32).unwrap().len(), 32);
    }

    #[test]
    fn test_read_file_bounded_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.md");
        fs::write(&path, b"\xff\xfe\x00").unwrap();

        let err = read_file_bounded(&path, 1024).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::InvalidEncoding);
    }

    #[test]
    fn test_discover_readmes_reads_content() {
        let tmp = TempDir::new().unwrap();
        write_readme(tmp.path(), "acme", "plugins", "a");

        let files = discover_readmes(&RegistryConfig::new(tmp.path()), ResourceType::Plugins)
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].content.starts_with("---\n"));
    }
}
