//! Subprocess execution and the chart pull cache.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::command::{self, Invocation};
use crate::error::HelmError;

/// Captured output of a completed command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run an invocation to completion and capture its output.
///
/// A non-zero exit status is an error carrying the captured stderr. The
/// process is not retried and no timeout is imposed.
pub fn run(invocation: &Invocation) -> Result<CommandOutput, HelmError> {
    debug!("running: {}", invocation.command_line());

    let output = Command::new(invocation.program())
        .args(invocation.args())
        .output()
        .map_err(|e| HelmError::Spawn {
            program: invocation.program().to_string(),
            source: e,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
        return Err(HelmError::CommandFailed {
            command_line: invocation.command_line(),
            stderr: stderr.trim_end().to_string(),
        });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|_| HelmError::NonUtf8Stdout {
        command_line: invocation.command_line(),
    })?;
    Ok(CommandOutput { stdout, stderr })
}

/// Whether a usable `helm` binary is on PATH.
pub fn helm_available() -> bool {
    run(&command::version_probe()).is_ok()
}

/// Pull a chart from a repository and untar it under `cache_dir`.
///
/// Skips the pull when the chart directory is already cached. Returns the
/// path to the untarred chart.
pub fn pull_chart(
    chart: &str,
    repo: &str,
    cache_dir: &Path,
    version: Option<&str>,
) -> Result<PathBuf, HelmError> {
    let chart_dir = cache_dir.join(command::pulled_chart_dir(chart, repo));
    if chart_dir.exists() {
        debug!("chart cache hit: {}", chart_dir.display());
        return Ok(chart_dir);
    }

    std::fs::create_dir_all(cache_dir).map_err(|e| HelmError::CacheDir {
        path: cache_dir.to_path_buf(),
        source: e,
    })?;
    run(&command::pull(chart, repo, cache_dir, version))?;
    Ok(chart_dir)
}
