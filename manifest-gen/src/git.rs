//! Git helpers for committing generated manifests.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::error::{io_err, GenerateError};

fn run_git(dir: &Path, args: &[&str]) -> Result<String, GenerateError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(GenerateError::GitSpawn)?;
    if !output.status.success() {
        return Err(GenerateError::Git {
            action: args.first().copied().unwrap_or_default().to_string(),
            dir: dir.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Current commit hash of `dir` (full 40 characters).
pub fn head_commit(dir: &Path) -> Result<String, GenerateError> {
    Ok(run_git(dir, &["rev-parse", "HEAD"])?.trim().to_string())
}

/// Whether `dir` has uncommitted changes.
pub fn is_dirty(dir: &Path) -> Result<bool, GenerateError> {
    Ok(!run_git(dir, &["status", "--porcelain"])?.trim().is_empty())
}

/// Commit the generated manifests in `output_dir`.
///
/// Stale `.yaml` files not generated by this run are deleted first; other
/// files (e.g. `README.md`) are kept. Returns `true` if a commit was
/// created, `false` when the tree was already clean.
pub fn commit_manifests(
    output_dir: &Path,
    tool_version: &str,
    config_commit: &str,
    generated: &BTreeSet<PathBuf>,
) -> Result<bool, GenerateError> {
    for stale in stale_yaml_files(output_dir, generated)? {
        info!("removing stale manifest {}", stale.display());
        std::fs::remove_file(&stale).map_err(|e| io_err(&stale, e))?;
    }

    run_git(output_dir, &["add", "-A"])?;
    if run_git(output_dir, &["status", "--porcelain"])?.trim().is_empty() {
        info!("nothing to commit");
        return Ok(false);
    }

    let message = format!(
        "Generate manifests\n\nConfig commit: {config_commit}\nTool version: {tool_version}"
    );
    run_git(output_dir, &["commit", "-m", &message])?;
    Ok(true)
}

fn stale_yaml_files(
    output_dir: &Path,
    generated: &BTreeSet<PathBuf>,
) -> Result<Vec<PathBuf>, GenerateError> {
    let mut all = Vec::new();
    collect_yaml_files(output_dir, &mut all)?;
    Ok(all.into_iter().filter(|p| !generated.contains(p)).collect())
}

fn collect_yaml_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), GenerateError> {
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().is_some_and(|n| n == ".git") {
                continue;
            }
            collect_yaml_files(&path, out)?;
        } else if path.extension().and_then(|s| s.to_str()) == Some("yaml") {
            out.push(path);
        }
    }
    Ok(())
}
