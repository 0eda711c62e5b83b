//! # manifest-gen
//!
//! Writer and orchestration for rendered manifests.
//!
//! Call [`generate`] to drive every configured chart entry through
//! build → execute → write, collecting per-chart outcomes into a
//! [`RunReport`]. [`git`] holds the helpers for committing the output
//! directory.

pub mod error;
pub mod generator;
pub mod git;
pub mod writer;

pub use error::GenerateError;
pub use generator::{generate, ChartOutcome, ChartReport, GenerateOptions, RunReport};
