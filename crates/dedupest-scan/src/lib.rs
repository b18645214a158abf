//! Directory enumeration for dedupest.
//!
//! This crate walks a directory tree and produces the flat list of regular
//! files that the estimation engine consumes. Traversal is parallel via
//! jwalk; unreadable entries are collected as non-fatal warnings rather
//! than aborting the walk.
//!
//! # Example
//!
//! ```rust,no_run
//! use dedupest_core::RunConfig;
//! use dedupest_scan::JwalkEnumerator;
//!
//! let config = RunConfig::new("/path/to/scan", 4096);
//! let walked = JwalkEnumerator::new().enumerate(&config).unwrap();
//!
//! println!("Found {} files", walked.files.len());
//! ```

mod walker;

pub use walker::{JwalkEnumerator, WalkedFiles};

// Re-export core types for convenience
pub use dedupest_core::{ConfigError, FileFailure, RunConfig};
