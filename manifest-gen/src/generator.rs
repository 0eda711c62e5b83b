//! Manifest generation orchestration.
//!
//! One chart is fully processed (built, executed, written) before the next
//! begins. A configuration error aborts the run before any subprocess or
//! filesystem mutation; an execution failure is recorded for its entry and
//! the remaining entries still run.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use manifest_core::{config, ChartEntry};
use manifest_helm::{command, runner};

use crate::error::GenerateError;
use crate::writer;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Settings for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Root for resolving relative local chart paths (usually the CWD).
    pub repo_root: PathBuf,
    /// Output root; manifests land at `<output_dir>/<namespace>/<name>.yaml`.
    pub output_dir: PathBuf,
    /// Cache directory for pulled charts.
    pub cache_dir: PathBuf,
    /// Process only entries whose name is in the set.
    pub filter: Option<BTreeSet<String>>,
    /// Record the would-be commands instead of executing anything.
    pub dry_run: bool,
    /// Remove the output root before processing.
    pub clean: bool,
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Outcome of one chart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartOutcome {
    /// Manifest rendered and written.
    Generated { path: PathBuf },
    /// Dry-run: the command line(s) that would have run.
    WouldGenerate { commands: Vec<String> },
    /// helm or filesystem failure; the run continued with later entries.
    Failed { reason: String },
}

/// Per-chart report row.
#[derive(Debug, Clone, Serialize)]
pub struct ChartReport {
    pub name: String,
    pub namespace: String,
    #[serde(flatten)]
    pub outcome: ChartOutcome,
}

/// Aggregated result of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    /// True when `--clean` was requested but skipped because of dry-run.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub would_clean: bool,
    pub charts: Vec<ChartReport>,
}

impl RunReport {
    /// True only if every processed entry succeeded.
    pub fn success(&self) -> bool {
        !self
            .charts
            .iter()
            .any(|c| matches!(c.outcome, ChartOutcome::Failed { .. }))
    }

    pub fn generated_count(&self) -> usize {
        self.charts
            .iter()
            .filter(|c| matches!(c.outcome, ChartOutcome::Generated { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.charts
            .iter()
            .filter(|c| matches!(c.outcome, ChartOutcome::Failed { .. }))
            .count()
    }

    /// Paths written by this run, for stale-file pruning at commit time.
    pub fn generated_paths(&self) -> BTreeSet<PathBuf> {
        self.charts
            .iter()
            .filter_map(|c| match &c.outcome {
                ChartOutcome::Generated { path } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

/// Drive all chart entries through build → execute → write.
pub fn generate(
    entries: Vec<ChartEntry>,
    opts: &GenerateOptions,
) -> Result<RunReport, GenerateError> {
    let entries = apply_filter(entries, opts.filter.as_ref());

    // Validate everything up front; a configuration error must abort the
    // run before any subprocess executes or the output root is touched.
    for entry in &entries {
        config::validate_entry(entry, &opts.repo_root)?;
    }

    if entries.is_empty() {
        warn!("no charts to generate");
    } else if !opts.dry_run && !runner::helm_available() {
        return Err(GenerateError::HelmNotAvailable);
    }

    let mut would_clean = false;
    if opts.clean {
        if opts.dry_run {
            info!("[dry-run] would remove {}", opts.output_dir.display());
            would_clean = true;
        } else {
            writer::clean_output_root(&opts.output_dir)?;
        }
    }

    let mut charts = Vec::with_capacity(entries.len());
    for entry in &entries {
        info!("generating manifest for {} ({})", entry.name, entry.namespace);
        let outcome = match process_entry(entry, opts) {
            Ok(outcome) => outcome,
            Err(e) => ChartOutcome::Failed {
                reason: e.to_string(),
            },
        };
        charts.push(ChartReport {
            name: entry.name.clone(),
            namespace: entry.namespace.clone(),
            outcome,
        });
    }

    Ok(RunReport {
        generated_at: Utc::now(),
        would_clean,
        charts,
    })
}

fn apply_filter(entries: Vec<ChartEntry>, filter: Option<&BTreeSet<String>>) -> Vec<ChartEntry> {
    match filter {
        Some(names) => entries
            .into_iter()
            .filter(|e| names.contains(&e.name))
            .collect(),
        None => entries,
    }
}

/// Build and run the command(s) for one entry, then write the output.
///
/// Everything helm- or write-related that goes wrong here is a per-chart
/// failure, not a run abort.
fn process_entry(
    entry: &ChartEntry,
    opts: &GenerateOptions,
) -> Result<ChartOutcome, GenerateError> {
    // Always present after helmfile resolution; enforced at load time.
    let chart = entry.chart.as_deref().unwrap_or_default();

    let mut commands = Vec::new();
    let chart_ref = match &entry.repo {
        Some(repo) => {
            let chart_dir = opts.cache_dir.join(command::pulled_chart_dir(chart, repo));
            if opts.dry_run {
                if !chart_dir.exists() {
                    commands.push(
                        command::pull(chart, repo, &opts.cache_dir, entry.version.as_deref())
                            .command_line(),
                    );
                }
                chart_dir
            } else {
                runner::pull_chart(chart, repo, &opts.cache_dir, entry.version.as_deref())?
            }
        }
        None => PathBuf::from(chart),
    };

    let invocation = command::template(
        &entry.name,
        &chart_ref.display().to_string(),
        &entry.namespace,
        entry.version.as_deref(),
        &entry.values,
    );

    if opts.dry_run {
        commands.push(invocation.command_line());
        return Ok(ChartOutcome::WouldGenerate { commands });
    }

    let output = runner::run(&invocation)?;
    let path = writer::write_manifest(
        &opts.output_dir,
        &entry.namespace,
        &entry.name,
        &output.stdout,
    )?;
    info!("{} ({}) -> {}", entry.name, entry.namespace, path.display());
    Ok(ChartOutcome::Generated { path })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
