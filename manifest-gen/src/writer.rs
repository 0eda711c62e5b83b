//! Output directory writer.
//!
//! Layout: `<output_root>/<namespace>/<release_name>.yaml`. Single-writer,
//! single-pass usage — files are truncated in place, no atomic rename.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{io_err, GenerateError};

/// Write rendered manifest text for one release.
///
/// Creates the namespace subdirectory if needed (idempotent) and truncates
/// any existing `<release_name>.yaml`. Returns the written path.
pub fn write_manifest(
    output_root: &Path,
    namespace: &str,
    release_name: &str,
    content: &str,
) -> Result<PathBuf, GenerateError> {
    let dir = output_root.join(namespace);
    std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
    let path = dir.join(format!("{release_name}.yaml"));
    std::fs::write(&path, content).map_err(|e| io_err(&path, e))?;
    debug!("wrote {}", path.display());
    Ok(path)
}

/// Remove the entire output root. A missing root is not an error.
pub fn clean_output_root(output_root: &Path) -> Result<(), GenerateError> {
    if !output_root.exists() {
        return Ok(());
    }
    std::fs::remove_dir_all(output_root).map_err(|e| io_err(output_root, e))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn creates_namespace_directory_and_file() {
        let root = TempDir::new().expect("tempdir");
        let path = write_manifest(root.path(), "production", "myapp", "kind: Deployment\n")
            .expect("write");
        assert_eq!(path, root.path().join("production").join("myapp.yaml"));
        let content = std::fs::read_to_string(&path).expect("read");
        assert_eq!(content, "kind: Deployment\n");
    }

    #[test]
    fn truncates_existing_file() {
        let root = TempDir::new().expect("tempdir");
        write_manifest(root.path(), "default", "myapp", "a much longer first rendering\n")
            .expect("first write");
        let path = write_manifest(root.path(), "default", "myapp", "short\n").expect("rewrite");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "short\n");
    }

    #[test]
    fn releases_in_the_same_namespace_coexist() {
        let root = TempDir::new().expect("tempdir");
        let a = write_manifest(root.path(), "default", "app-a", "a\n").expect("write a");
        let b = write_manifest(root.path(), "default", "app-b", "b\n").expect("write b");
        assert!(a.exists());
        assert!(b.exists());
        assert_eq!(a.parent(), b.parent());
    }

    #[test]
    fn clean_removes_everything_under_the_root() {
        let root = TempDir::new().expect("tempdir");
        let out = root.path().join("output");
        write_manifest(&out, "default", "myapp", "x\n").expect("write");
        clean_output_root(&out).expect("clean");
        assert!(!out.exists());
    }

    #[test]
    fn clean_of_missing_root_is_a_noop() {
        let root = TempDir::new().expect("tempdir");
        clean_output_root(&root.path().join("nonexistent")).expect("clean");
    }
}
