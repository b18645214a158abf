//! Block-level dedup estimation for dedupest.
//!
//! This crate holds the estimation engine: files are partitioned into
//! fixed-size blocks, every block is fingerprinted with a 160-bit SHA-1
//! digest, and a run-scoped [`FingerprintTable`] counts how often each
//! distinct block occurs anywhere in the tree. The resulting
//! [`RunSummary`] reports unique vs. duplicated blocks, the bytes lost to
//! block-boundary rounding, and throughput.
//!
//! # Example
//!
//! ```rust,ignore
//! use dedupest_analyze::DedupEstimator;
//! use dedupest_core::RunConfig;
//! use dedupest_scan::JwalkEnumerator;
//!
//! let config = RunConfig::new("/path/to/scan", 4096);
//! let walked = JwalkEnumerator::new().enumerate(&config).unwrap();
//!
//! let estimator = DedupEstimator::with_config(config);
//! let summary = estimator.estimate(&walked.files);
//!
//! println!("{} of {} blocks are duplicates", summary.duplicate_blocks, summary.total_blocks);
//! println!("Reclaimable: {} bytes", summary.reclaimable_bytes());
//! ```
//!
//! # Memory
//!
//! The fingerprint table keeps one entry per distinct block for the whole
//! run; there is no eviction, since the estimate needs exact global counts.
//! Expect roughly 30 bytes of table per distinct block.

mod engine;
mod table;

pub use engine::{BlockChunks, DedupEstimator};
pub use table::FingerprintTable;

// Re-export core types for convenience
pub use dedupest_core::{BlockDigest, FileFailure, FileRecord, RunConfig, RunSummary};
