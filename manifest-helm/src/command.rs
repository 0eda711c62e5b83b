//! Command construction — [`Invocation`] and the helm argument vectors.
//!
//! Argument order for `template` is fixed: release name, chart reference,
//! `--namespace`, optional `--version`, then one `--values` pair per
//! configured file in input order (duplicates preserved, never deduplicated).

use std::fmt;
use std::path::Path;

/// A fully-built external command: program plus ordered argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The equivalent shell command line, used for dry-run display and
    /// error reporting. Arguments containing whitespace are single-quoted.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn quote(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
        format!("'{arg}'")
    } else {
        arg.to_string()
    }
}

// ---------------------------------------------------------------------------
// helm argument vectors
// ---------------------------------------------------------------------------

/// `helm template <release> <chart> --namespace <ns> [--version <v>] --values <f>…`
pub fn template(
    release_name: &str,
    chart_ref: &str,
    namespace: &str,
    version: Option<&str>,
    values: &[impl AsRef<Path>],
) -> Invocation {
    let mut inv = Invocation::new("helm")
        .arg("template")
        .arg(release_name)
        .arg(chart_ref)
        .arg("--namespace")
        .arg(namespace);
    if let Some(version) = version {
        inv = inv.arg("--version").arg(version);
    }
    for file in values {
        inv = inv.arg("--values").arg(file.as_ref().display().to_string());
    }
    inv
}

/// `helm pull` into `dest` with `--untar`.
///
/// OCI repositories are pulled by URL directly; HTTP(S) repositories pull
/// the chart name with `--repo <url>`.
pub fn pull(chart: &str, repo: &str, dest: &Path, version: Option<&str>) -> Invocation {
    let mut inv = Invocation::new("helm").arg("pull");
    inv = if is_oci(repo) {
        inv.arg(repo)
    } else {
        inv.arg(chart).arg("--repo").arg(repo)
    };
    inv = inv
        .arg("--untar")
        .arg("--untardir")
        .arg(dest.display().to_string());
    if let Some(version) = version {
        inv = inv.arg("--version").arg(version);
    }
    inv
}

/// `helm version --short`
pub fn version_probe() -> Invocation {
    Invocation::new("helm").arg("version").arg("--short")
}

fn is_oci(repo: &str) -> bool {
    repo.starts_with("oci://")
}

/// Directory name a pulled chart untars into: the last path segment of the
/// OCI URL, or the chart name for HTTP repositories.
pub fn pulled_chart_dir(chart: &str, repo: &str) -> String {
    if is_oci(repo) {
        repo.rsplit('/').next().unwrap_or(chart).to_string()
    } else {
        chart.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
