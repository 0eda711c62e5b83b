//! Shared fixtures for manifest-builder CLI tests (unix only).

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

const STUB_HELM: &str = r##"#!/bin/sh
cmd="$1"
case "$cmd" in
  version)
    echo "v3.15.2+gstub"
    ;;
  template)
    release="$2"
    case "$release" in
      *fail*)
        echo "simulated helm failure for $release" >&2
        exit 1
        ;;
    esac
    echo "# release: $release"
    echo "# args: $*"
    ;;
  pull)
    chart="$2"
    dest="."
    prev=""
    for a in "$@"; do
      if [ "$prev" = "--untardir" ]; then dest="$a"; fi
      prev="$a"
    done
    mkdir -p "$dest/${chart##*/}"
    ;;
  *)
    exit 0
    ;;
esac
"##;

/// Writes a stub `helm` into `<root>/bin` and returns a PATH value that
/// resolves it first.
pub fn stub_helm_path(root: &Path) -> String {
    use std::os::unix::fs::PermissionsExt;

    let bin = root.join("bin");
    std::fs::create_dir_all(&bin).expect("stub bin dir");
    let script = bin.join("helm");
    std::fs::write(&script, STUB_HELM).expect("write stub helm");
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
        .expect("chmod stub helm");

    let path = std::env::var("PATH").unwrap_or_default();
    format!("{}:{path}", bin.display())
}

/// A workspace with a `conf/` directory holding one TOML file.
pub fn workspace_with_config(config: &str) -> TempDir {
    let root = TempDir::new().expect("tempdir");
    write_config(root.path(), "charts.toml", config);
    root
}

pub fn write_config(root: &Path, name: &str, content: &str) -> PathBuf {
    let conf = root.join("conf");
    std::fs::create_dir_all(&conf).expect("conf dir");
    let path = conf.join(name);
    std::fs::write(&path, content).expect("write config");
    path
}

/// assert_cmd command for the binary, with stub helm on PATH and the
/// workspace root as CWD.
pub fn manifest_builder(root: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("manifest-builder").expect("binary");
    cmd.current_dir(root)
        .env("PATH", stub_helm_path(root))
        .env("NO_COLOR", "1")
        .arg("--cache-dir")
        .arg(root.join("cache"));
    cmd
}
