//! Error types for manifest-helm.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from building and running helm commands.
#[derive(Debug, Error)]
pub enum HelmError {
    /// The binary could not be spawned (typically: not on PATH).
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process exited with a non-zero status; stderr is attached.
    #[error("command failed ({command_line}): {stderr}")]
    CommandFailed {
        command_line: String,
        stderr: String,
    },

    /// The process wrote stdout that was not valid UTF-8.
    #[error("command produced non-UTF-8 output ({command_line})")]
    NonUtf8Stdout { command_line: String },

    /// Creating the chart cache directory failed.
    #[error("failed to create chart cache at {path}: {source}")]
    CacheDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
