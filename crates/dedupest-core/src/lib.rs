//! Core types for dedupest.
//!
//! This crate provides the fundamental data structures shared by the
//! dedupest workspace: run configuration, block digests, per-file records
//! and the final run summary.

mod config;
mod digest;
mod error;
mod record;
mod summary;

pub use config::{BLOCK_ALIGNMENT, RunConfig, RunConfigBuilder};
pub use digest::BlockDigest;
pub use error::{ConfigError, FailureKind, FileFailure};
pub use record::FileRecord;
pub use summary::RunSummary;
