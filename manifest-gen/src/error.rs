//! Error types for manifest-gen.

use std::path::PathBuf;

use thiserror::Error;

use manifest_core::ConfigError;
use manifest_helm::HelmError;

/// Fatal errors that abort a generation run.
///
/// Per-chart failures (helm exit status, write errors) are aggregated into
/// the run report instead; see [`crate::ChartOutcome::Failed`].
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A configuration error — reported before any subprocess runs.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An error from the helm layer.
    #[error("helm error: {0}")]
    Helm(#[from] HelmError),

    /// `helm` is not installed or not on PATH.
    #[error("helm is not installed or not available in PATH; see https://helm.sh/docs/intro/install/")]
    HelmNotAvailable,

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A git subcommand failed; stderr is attached.
    #[error("git {action} failed in {dir}: {stderr}")]
    Git {
        action: String,
        dir: PathBuf,
        stderr: String,
    },

    /// Spawning git failed (typically: not on PATH).
    #[error("failed to run git: {0}")]
    GitSpawn(#[source] std::io::Error),
}

/// Convenience constructor for [`GenerateError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> GenerateError {
    GenerateError::Io {
        path: path.into(),
        source,
    }
}
