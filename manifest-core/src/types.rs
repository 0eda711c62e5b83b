//! Domain types for chart configuration.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One configured unit of templating work.
///
/// Constructed once at config-load time and read-only thereafter. `name` is
/// both the helm release name and the output file stem, and must be unique
/// within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub name: String,
    pub namespace: String,
    /// Chart reference: local path (`./…` or `/…`), or a chart name paired
    /// with [`repo`](Self::repo). Always present after helmfile resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    /// Chart repository URL (`https://…` or `oci://…`). When set, the chart
    /// is pulled into the local cache before templating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Name of a release declared in `helmfile.yaml`; mutually exclusive
    /// with [`chart`](Self::chart) at load time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Values files in application order, resolved relative to the TOML file
    /// that declared them. Duplicates are allowed and preserved.
    #[serde(default)]
    pub values: Vec<PathBuf>,
}

impl ChartEntry {
    /// True when the chart reference points at the local filesystem.
    pub fn is_local_chart(&self) -> bool {
        matches!(&self.chart, Some(c) if c.starts_with("./") || c.starts_with('/'))
    }
}
