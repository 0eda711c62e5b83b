use std::path::{Path, PathBuf};

use tempfile::TempDir;

use manifest_core::{load_configs, validate_entry, ChartEntry, ConfigError};

fn write_toml(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(&path, content).expect("write toml");
    path
}

#[test]
fn loads_entries_from_multiple_files_in_sorted_order() {
    let dir = TempDir::new().expect("tempdir");
    write_toml(
        dir.path(),
        "b.toml",
        r#"
[[chart]]
name = "app-b"
namespace = "ns-b"
chart = "./charts/b"
"#,
    );
    write_toml(
        dir.path(),
        "a.toml",
        r#"
[[chart]]
name = "app-a"
namespace = "ns-a"
chart = "./charts/a"
"#,
    );

    let entries = load_configs(dir.path()).expect("load");
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["app-a", "app-b"]);
}

#[test]
fn finds_toml_files_in_subdirectories() {
    let dir = TempDir::new().expect("tempdir");
    write_toml(
        dir.path(),
        "apps/web.toml",
        r#"
[[chart]]
name = "web"
namespace = "frontend"
chart = "./charts/web"
"#,
    );

    let entries = load_configs(dir.path()).expect("load");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "web");
}

#[test]
fn values_resolve_relative_to_their_toml_file() {
    let dir = TempDir::new().expect("tempdir");
    write_toml(
        dir.path(),
        "apps/web.toml",
        r#"
[[chart]]
name = "web"
namespace = "frontend"
chart = "./charts/web"
values = ["web/values.yaml"]
"#,
    );

    let entries = load_configs(dir.path()).expect("load");
    assert_eq!(
        entries[0].values,
        vec![dir.path().join("apps").join("web/values.yaml")]
    );
}

#[test]
fn values_default_to_empty() {
    let dir = TempDir::new().expect("tempdir");
    write_toml(
        dir.path(),
        "config.toml",
        r#"
[[chart]]
name = "myapp"
namespace = "default"
chart = "./charts/myapp"
"#,
    );

    let entries = load_configs(dir.path()).expect("load");
    assert!(entries[0].values.is_empty());
}

#[test]
fn missing_directory_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = load_configs(&dir.path().join("nonexistent")).unwrap_err();
    assert!(matches!(err, ConfigError::DirNotFound { .. }));
}

#[test]
fn empty_directory_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = load_configs(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NoTomlFiles { .. }));
}

#[test]
fn file_without_chart_tables_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    write_toml(dir.path(), "config.toml", "title = \"nothing here\"\n");
    let err = load_configs(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NoCharts { .. }));
}

#[test]
fn missing_required_field_is_a_parse_error() {
    let dir = TempDir::new().expect("tempdir");
    write_toml(
        dir.path(),
        "config.toml",
        r#"
[[chart]]
namespace = "default"
chart = "./charts/myapp"
"#,
    );
    let err = load_configs(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn duplicate_names_across_files_are_rejected() {
    let dir = TempDir::new().expect("tempdir");
    write_toml(
        dir.path(),
        "a.toml",
        r#"
[[chart]]
name = "myapp"
namespace = "ns-a"
chart = "./charts/a"
"#,
    );
    write_toml(
        dir.path(),
        "b.toml",
        r#"
[[chart]]
name = "myapp"
namespace = "ns-b"
chart = "./charts/b"
"#,
    );

    let err = load_configs(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateName { .. }));
}

fn entry_with(chart: &str, values: Vec<PathBuf>) -> ChartEntry {
    ChartEntry {
        name: "myapp".to_string(),
        namespace: "default".to_string(),
        chart: Some(chart.to_string()),
        repo: None,
        release: None,
        version: None,
        values,
    }
}

#[test]
fn validate_rejects_missing_values_file() {
    let root = TempDir::new().expect("tempdir");
    let entry = entry_with("myrepo/myapp", vec![root.path().join("nonexistent.yaml")]);
    let err = validate_entry(&entry, root.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ValuesFileNotFound { .. }));
}

#[test]
fn validate_accepts_existing_values_file() {
    let root = TempDir::new().expect("tempdir");
    let values = root.path().join("values.yaml");
    std::fs::write(&values, "key: value\n").expect("write values");
    let entry = entry_with("myrepo/myapp", vec![values]);
    validate_entry(&entry, root.path()).expect("validate");
}

#[test]
fn validate_rejects_missing_local_chart() {
    let root = TempDir::new().expect("tempdir");
    let entry = entry_with("./charts/myapp", vec![]);
    let err = validate_entry(&entry, root.path()).unwrap_err();
    assert!(matches!(err, ConfigError::LocalChartNotFound { .. }));
}

#[test]
fn validate_accepts_existing_local_chart() {
    let root = TempDir::new().expect("tempdir");
    std::fs::create_dir_all(root.path().join("charts/myapp")).expect("mkdir");
    let entry = entry_with("./charts/myapp", vec![]);
    validate_entry(&entry, root.path()).expect("validate");
}

#[test]
fn validate_skips_remote_chart_references() {
    let root = TempDir::new().expect("tempdir");
    let entry = entry_with("jetstack/cert-manager", vec![]);
    validate_entry(&entry, root.path()).expect("validate");
}
