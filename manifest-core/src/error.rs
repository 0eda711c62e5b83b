//! Error types for manifest-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading and validating chart configuration.
///
/// Every variant is fatal for the run: configuration errors are reported
/// before any subprocess executes.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration directory does not exist.
    #[error("configuration directory not found: {path}")]
    DirNotFound { path: PathBuf },

    /// The configuration path exists but is not a directory.
    #[error("configuration path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// No `*.toml` files found under the configuration directory.
    #[error("no TOML files found in {path}")]
    NoTomlFiles { path: PathBuf },

    /// TOML parse error on load — includes file path and line context from toml.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A configuration file declared no `[[chart]]` tables.
    #[error("no [[chart]] entries found in {path}")]
    NoCharts { path: PathBuf },

    /// A required string field was present but empty.
    #[error("{path}: field '{field}' must not be empty")]
    EmptyField { field: &'static str, path: PathBuf },

    /// Two entries with the same name in one run.
    #[error("duplicate chart name '{name}'")]
    DuplicateName { name: String },

    /// An entry declared both a direct chart reference and a helmfile release.
    #[error("chart entry '{name}': cannot specify both 'chart' and 'release'")]
    ChartAndRelease { name: String },

    /// An entry declared neither a chart reference nor a helmfile release.
    #[error("chart entry '{name}': must specify either 'chart' or 'release'")]
    MissingChartSource { name: String },

    /// `helmfile.yaml` did not exist at the given path.
    #[error("helmfile.yaml not found: {path}")]
    HelmfileNotFound { path: PathBuf },

    /// YAML parse error for `helmfile.yaml`, with path context.
    #[error("failed to parse helmfile at {path}: {source}")]
    HelmfileParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An entry references a release but no helmfile.yaml was found.
    #[error("chart entry '{name}' references release '{release}' but no helmfile.yaml was found")]
    NoHelmfile { name: String, release: String },

    /// The referenced release is not declared in helmfile.yaml.
    #[error("release '{release}' for chart entry '{name}' not found in helmfile.yaml")]
    UnknownRelease { name: String, release: String },

    /// A helmfile release points at a repository that is not declared.
    #[error("repository '{repo}' for release '{release}' not declared in helmfile.yaml")]
    UnknownRepository { release: String, repo: String },

    /// A configured values file does not exist on disk.
    #[error("values file not found for chart '{name}': {path}")]
    ValuesFileNotFound { name: String, path: PathBuf },

    /// A local chart path does not exist on disk.
    #[error("local chart path not found for '{name}': {path}")]
    LocalChartNotFound { name: String, path: PathBuf },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
