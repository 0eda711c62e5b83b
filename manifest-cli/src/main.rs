//! manifest-builder — render Kubernetes manifests from Helm charts.
//!
//! # Usage
//!
//! ```text
//! manifest-builder [-c conf] [-o output] [--charts a,b] [--clean] [--dry-run]
//!                  [--commit] [--cache-dir <dir>] [--json] [-v]
//! ```
//!
//! Reads `[[chart]]` entries from every `*.toml` under the config directory
//! (resolving `release = …` references through `helmfile.yaml` when one is
//! present), runs `helm template` once per entry, and writes the rendered
//! output to `<output>/<namespace>/<name>.yaml`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use log::{debug, warn};

use manifest_core::{config, helmfile};
use manifest_gen::{generator, git, ChartOutcome, GenerateOptions, RunReport};

// ---------------------------------------------------------------------------
// CLI surface
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "manifest-builder",
    version,
    about = "Generate Kubernetes manifests from Helm charts",
    long_about = None,
)]
struct Cli {
    /// Configuration directory containing [[chart]] TOML files.
    #[arg(long, short = 'c', default_value = "conf", value_name = "DIR")]
    config_dir: PathBuf,

    /// Output directory for generated manifests.
    #[arg(long, short = 'o', default_value = "output", value_name = "DIR")]
    output_dir: PathBuf,

    /// Comma-separated list of chart names to generate (default: all).
    #[arg(long, value_name = "NAMES")]
    charts: Option<String>,

    /// Remove the output directory before generating.
    #[arg(long)]
    clean: bool,

    /// Print the helm commands without executing them or writing output.
    #[arg(long)]
    dry_run: bool,

    /// Commit generated manifests into the output directory's git repository.
    #[arg(long, conflicts_with = "dry_run")]
    commit: bool,

    /// Cache directory for charts pulled from remote repositories.
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Emit the run report as JSON instead of human-readable output.
    #[arg(long)]
    json: bool,

    /// Show detailed output.
    #[arg(long, short = 'v')]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let repo_root = std::env::current_dir().context("cannot determine current directory")?;
    // join() keeps absolute arguments as-is.
    let config_dir = repo_root.join(&cli.config_dir);
    let output_dir = repo_root.join(&cli.output_dir);
    let cache_dir = match &cli.cache_dir {
        Some(dir) => repo_root.join(dir),
        None => default_cache_dir()?,
    };
    debug!("repository root: {}", repo_root.display());
    debug!("configuration directory: {}", config_dir.display());
    debug!("output directory: {}", output_dir.display());

    let entries = config::load_configs(&config_dir)?;
    let helmfile_path = config_dir.join("helmfile.yaml");
    let helmfile = if helmfile_path.exists() {
        Some(helmfile::load_helmfile(&helmfile_path)?)
    } else {
        None
    };
    let entries = config::resolve_entries(entries, helmfile.as_ref())?;
    debug!("loaded {} chart configuration(s)", entries.len());

    let filter = cli.charts.as_deref().map(parse_chart_filter);
    let opts = GenerateOptions {
        repo_root,
        output_dir,
        cache_dir,
        filter,
        dry_run: cli.dry_run,
        clean: cli.clean,
    };

    let report = generator::generate(entries, &opts)?;

    if opts.filter.is_some() && report.charts.is_empty() {
        bail!("no charts found matching: {}", cli.charts.unwrap_or_default());
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    } else {
        print_report(&report, cli.dry_run);
    }

    if cli.commit && report.success() {
        commit_output(&config_dir, &opts.output_dir, &report)?;
    }

    if !report.success() {
        bail!("{} chart(s) failed", report.failed_count());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn default_cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("could not determine cache directory")?;
    Ok(base.join("manifest-builder").join("charts"))
}

fn parse_chart_filter(names: &str) -> BTreeSet<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_report(report: &RunReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if report.would_clean {
        println!("{prefix}would remove output directory");
    }
    for chart in &report.charts {
        match &chart.outcome {
            ChartOutcome::Generated { path } => println!(
                "{} {} ({}) -> {}",
                "✓".green().bold(),
                chart.name,
                chart.namespace,
                path.display()
            ),
            ChartOutcome::WouldGenerate { commands } => {
                println!(
                    "{prefix}{} {} ({})",
                    "~".yellow().bold(),
                    chart.name,
                    chart.namespace
                );
                for command in commands {
                    println!("  $ {command}");
                }
            }
            ChartOutcome::Failed { reason } => println!(
                "{} {} ({}): {}",
                "✗".red().bold(),
                chart.name,
                chart.namespace,
                reason
            ),
        }
    }

    if dry_run {
        println!("\n{prefix}{} chart(s), nothing executed", report.charts.len());
    } else {
        println!("\nDone! Generated {} manifest(s)", report.generated_count());
    }
}

fn commit_output(config_dir: &Path, output_dir: &Path, report: &RunReport) -> Result<()> {
    if git::is_dirty(config_dir).unwrap_or(false) {
        warn!("config directory has uncommitted changes; recorded config commit may be stale");
    }
    let config_commit = git::head_commit(config_dir)
        .context("failed to resolve config directory git commit")?;
    let committed = git::commit_manifests(
        output_dir,
        env!("CARGO_PKG_VERSION"),
        &config_commit,
        &report.generated_paths(),
    )
    .context("failed to commit generated manifests")?;
    if committed {
        println!("{} committed manifests to {}", "✓".green().bold(), output_dir.display());
    } else {
        println!("Nothing to commit.");
    }
    Ok(())
}
