//! Manifest-builder core library — chart entry types, config loading, errors.
//!
//! Public API surface:
//! - [`types`] — [`ChartEntry`]
//! - [`config`] — load / resolve / validate
//! - [`helmfile`] — `helmfile.yaml` parsing for chart source resolution
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod helmfile;
pub mod types;

pub use config::{load_configs, resolve_entries, validate_entry};
pub use error::ConfigError;
pub use helmfile::{load_helmfile, Helmfile, HelmfileRelease, HelmfileRepository};
pub use types::ChartEntry;
