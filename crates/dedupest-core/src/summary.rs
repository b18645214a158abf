//! Run summary and derived statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FileFailure;
use crate::record::FileRecord;

/// Aggregate results of a dedup estimation run.
///
/// Computed once, after every file has been processed; read-only thereafter.
/// All totals cover successfully processed files only: failed paths appear
/// solely in [`RunSummary::failed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Block size the run was performed with.
    pub block_size: u64,

    /// Number of files successfully processed.
    pub total_files: u64,

    /// Total bytes streamed from processed files.
    pub total_bytes: u64,

    /// Total blocks fingerprinted.
    pub total_blocks: u64,

    /// Sum of per-file rounding overhead.
    pub total_overhead_bytes: u64,

    /// Number of distinct block fingerprints seen.
    pub unique_blocks: u64,

    /// Blocks whose content was already seen: `total_blocks - unique_blocks`.
    pub duplicate_blocks: u64,

    /// Per-file records for processed files.
    pub files: Vec<FileRecord>,

    /// Files that could not be read.
    pub failed: Vec<FileFailure>,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Fraction of blocks that were unique, as a percentage (0 when no blocks).
    pub fn unique_pct(&self) -> f64 {
        if self.total_blocks == 0 {
            0.0
        } else {
            self.unique_blocks as f64 / self.total_blocks as f64 * 100.0
        }
    }

    /// Fraction of blocks that were duplicates, as a percentage (0 when no blocks).
    pub fn duplicate_pct(&self) -> f64 {
        if self.total_blocks == 0 {
            0.0
        } else {
            self.duplicate_blocks as f64 / self.total_blocks as f64 * 100.0
        }
    }

    /// Bytes a block-level dedup store would not need to keep again.
    ///
    /// Counts every duplicate block at the full block size, so a duplicated
    /// short final block is rounded up. Treat this as an upper bound on the
    /// savings.
    pub fn reclaimable_bytes(&self) -> u64 {
        self.duplicate_blocks * self.block_size
    }

    /// Processing rate in bytes per second (0 when elapsed is zero).
    pub fn throughput_bytes_per_sec(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.total_bytes as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Check if any files failed to process.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total_blocks: u64, unique_blocks: u64) -> RunSummary {
        RunSummary {
            block_size: 512,
            total_files: 1,
            total_bytes: total_blocks * 512,
            total_blocks,
            total_overhead_bytes: 0,
            unique_blocks,
            duplicate_blocks: total_blocks - unique_blocks,
            files: Vec::new(),
            failed: Vec::new(),
            elapsed: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_percentages() {
        let s = summary(4, 3);
        assert_eq!(s.unique_pct(), 75.0);
        assert_eq!(s.duplicate_pct(), 25.0);
    }

    #[test]
    fn test_empty_run_percentages() {
        let s = summary(0, 0);
        assert_eq!(s.unique_pct(), 0.0);
        assert_eq!(s.duplicate_pct(), 0.0);
        assert_eq!(s.throughput_bytes_per_sec(), 0.0);
    }

    #[test]
    fn test_reclaimable_bytes() {
        let s = summary(10, 6);
        assert_eq!(s.reclaimable_bytes(), 4 * 512);
    }

    #[test]
    fn test_throughput() {
        let s = summary(4, 4);
        assert_eq!(s.throughput_bytes_per_sec(), 1024.0);
    }
}
