//! `helmfile.yaml` parsing for chart source resolution.
//!
//! Only the two sections manifest-builder cares about are modeled:
//! `repositories` (name → URL) and `releases` (name, `repo/chart`, version,
//! namespace). Anything else in the file is ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::{io_err, ConfigError};

/// A helm chart repository declared in `helmfile.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelmfileRepository {
    pub name: String,
    pub url: String,
}

/// A release entry from `helmfile.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelmfileRelease {
    pub name: String,
    /// `"reponame/chartname"` format.
    pub chart: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
}

/// Parsed `helmfile.yaml` content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Helmfile {
    pub repositories: Vec<HelmfileRepository>,
    pub releases: Vec<HelmfileRelease>,
}

// `repositories:` / `releases:` may be missing or explicitly null; both
// deserialize through Option and collapse to empty lists.
#[derive(Debug, Default, Deserialize)]
struct RawHelmfile {
    #[serde(default)]
    repositories: Option<Vec<HelmfileRepository>>,
    #[serde(default)]
    releases: Option<Vec<HelmfileRelease>>,
}

impl Helmfile {
    /// Look up a repository URL by name.
    pub fn repository_url(&self, name: &str) -> Option<&str> {
        self.repositories
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.url.as_str())
    }

    /// Look up a release by name.
    pub fn release(&self, name: &str) -> Option<&HelmfileRelease> {
        self.releases.iter().find(|r| r.name == name)
    }
}

/// Parse a `helmfile.yaml` file.
///
/// Returns [`ConfigError::HelmfileNotFound`] if the file is absent and
/// [`ConfigError::HelmfileParse`] (with path context) if malformed.
pub fn load_helmfile(path: &Path) -> Result<Helmfile, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::HelmfileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let raw: RawHelmfile =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::HelmfileParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(Helmfile {
        repositories: raw.repositories.unwrap_or_default(),
        releases: raw.releases.unwrap_or_default(),
    })
}
