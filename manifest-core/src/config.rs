//! Chart configuration loading, resolution and validation.
//!
//! # Config layout
//!
//! ```text
//! conf/
//!   helmfile.yaml        (optional — chart source resolution)
//!   infra.toml           (any number of *.toml files, searched recursively)
//!   apps/web.toml
//! ```
//!
//! Each TOML file declares `[[chart]]` tables:
//!
//! ```toml
//! [[chart]]
//! name = "cert-manager"
//! namespace = "cert-manager"
//! release = "cert-manager"          # resolved via helmfile.yaml
//! values = ["cert-manager/values.yaml"]
//!
//! [[chart]]
//! name = "myapp"
//! namespace = "default"
//! chart = "./charts/myapp"
//! ```
//!
//! Values paths are resolved relative to the directory of the TOML file that
//! declared them; absolute paths pass through unchanged.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{io_err, ConfigError};
use crate::helmfile::Helmfile;
use crate::types::ChartEntry;

// ---------------------------------------------------------------------------
// Raw TOML schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default, rename = "chart")]
    charts: Vec<RawChart>,
}

#[derive(Debug, Deserialize)]
struct RawChart {
    name: String,
    namespace: String,
    #[serde(default)]
    chart: Option<String>,
    #[serde(default)]
    repo: Option<String>,
    #[serde(default)]
    release: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    values: Vec<String>,
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load all chart entries from `*.toml` files under `config_dir` (recursive).
///
/// Files are visited in sorted path order so entry order is deterministic
/// across runs. Fails fast on the first malformed file or entry; nothing is
/// executed on a configuration error.
pub fn load_configs(config_dir: &Path) -> Result<Vec<ChartEntry>, ConfigError> {
    if !config_dir.exists() {
        return Err(ConfigError::DirNotFound {
            path: config_dir.to_path_buf(),
        });
    }
    if !config_dir.is_dir() {
        return Err(ConfigError::NotADirectory {
            path: config_dir.to_path_buf(),
        });
    }

    let mut toml_files = Vec::new();
    collect_toml_files(config_dir, &mut toml_files)?;
    toml_files.sort();

    if toml_files.is_empty() {
        return Err(ConfigError::NoTomlFiles {
            path: config_dir.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    for file in &toml_files {
        entries.extend(load_file(file)?);
    }

    let mut seen = BTreeSet::new();
    for entry in &entries {
        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::DuplicateName {
                name: entry.name.clone(),
            });
        }
    }

    Ok(entries)
}

fn collect_toml_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ConfigError> {
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_toml_files(&path, out)?;
        } else if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            out.push(path);
        }
    }
    Ok(())
}

fn load_file(path: &Path) -> Result<Vec<ChartEntry>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    if file.charts.is_empty() {
        return Err(ConfigError::NoCharts {
            path: path.to_path_buf(),
        });
    }

    let base = path.parent().unwrap_or(Path::new("."));
    file.charts
        .into_iter()
        .map(|raw| parse_chart(raw, base, path))
        .collect()
}

fn parse_chart(raw: RawChart, base: &Path, file: &Path) -> Result<ChartEntry, ConfigError> {
    for (field, value) in [("name", &raw.name), ("namespace", &raw.namespace)] {
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field,
                path: file.to_path_buf(),
            });
        }
    }
    match (&raw.chart, &raw.release) {
        (Some(_), Some(_)) => return Err(ConfigError::ChartAndRelease { name: raw.name }),
        (None, None) => return Err(ConfigError::MissingChartSource { name: raw.name }),
        (Some(c), None) if c.trim().is_empty() => {
            return Err(ConfigError::EmptyField {
                field: "chart",
                path: file.to_path_buf(),
            })
        }
        (None, Some(r)) if r.trim().is_empty() => {
            return Err(ConfigError::EmptyField {
                field: "release",
                path: file.to_path_buf(),
            })
        }
        _ => {}
    }

    let values = raw.values.iter().map(|v| resolve_path(base, v)).collect();
    Ok(ChartEntry {
        name: raw.name,
        namespace: raw.namespace,
        chart: raw.chart,
        repo: raw.repo,
        release: raw.release,
        version: raw.version,
        values,
    })
}

fn resolve_path(base: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

// ---------------------------------------------------------------------------
// Helmfile resolution
// ---------------------------------------------------------------------------

/// Fill in `chart` / `repo` / `version` for entries that reference a
/// `helmfile.yaml` release. Entries with a direct chart pass through.
///
/// `helmfile` is `None` when no `helmfile.yaml` exists next to the config
/// files; any entry still carrying a `release` is then a configuration error.
pub fn resolve_entries(
    entries: Vec<ChartEntry>,
    helmfile: Option<&Helmfile>,
) -> Result<Vec<ChartEntry>, ConfigError> {
    entries
        .into_iter()
        .map(|e| resolve_entry(e, helmfile))
        .collect()
}

fn resolve_entry(
    mut entry: ChartEntry,
    helmfile: Option<&Helmfile>,
) -> Result<ChartEntry, ConfigError> {
    let Some(release_name) = entry.release.clone() else {
        return Ok(entry);
    };
    let Some(helmfile) = helmfile else {
        return Err(ConfigError::NoHelmfile {
            name: entry.name,
            release: release_name,
        });
    };
    let Some(release) = helmfile.release(&release_name) else {
        return Err(ConfigError::UnknownRelease {
            name: entry.name,
            release: release_name,
        });
    };

    match release.chart.split_once('/') {
        Some((repo_name, chart_name)) => {
            let Some(url) = helmfile.repository_url(repo_name) else {
                return Err(ConfigError::UnknownRepository {
                    release: release_name,
                    repo: repo_name.to_string(),
                });
            };
            entry.chart = Some(chart_name.to_string());
            entry.repo = Some(url.to_string());
        }
        // A chart without a repository prefix is taken as a direct reference.
        None => entry.chart = Some(release.chart.clone()),
    }
    if entry.version.is_none() {
        entry.version = release.version.clone();
    }
    Ok(entry)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Pre-run validation for a resolved entry.
///
/// Every configured values file must exist, and a local chart path must
/// exist under `repo_root`. Remote references are left for helm to verify.
pub fn validate_entry(entry: &ChartEntry, repo_root: &Path) -> Result<(), ConfigError> {
    for values_file in &entry.values {
        if !values_file.exists() {
            return Err(ConfigError::ValuesFileNotFound {
                name: entry.name.clone(),
                path: values_file.clone(),
            });
        }
    }

    if entry.is_local_chart() {
        let chart = entry.chart.as_deref().unwrap_or_default();
        let chart_path = if Path::new(chart).is_absolute() {
            PathBuf::from(chart)
        } else {
            repo_root.join(chart)
        };
        if !chart_path.exists() {
            return Err(ConfigError::LocalChartNotFound {
                name: entry.name.clone(),
                path: chart_path,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
