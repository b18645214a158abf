//! Per-file accounting records.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Block accounting for a single successfully processed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path to the file.
    pub path: PathBuf,

    /// File size in bytes (as streamed).
    pub size_bytes: u64,

    /// Number of blocks the file occupies: `ceil(size / block_size)`.
    pub block_count: u64,

    /// Bytes wasted by rounding the last block up: `block_count * block_size - size`.
    pub overhead_bytes: u64,

    /// Blocks of this file first seen here (anywhere in the tree).
    pub unique_blocks: u64,

    /// Blocks of this file already seen elsewhere.
    pub duplicate_blocks: u64,
}

impl FileRecord {
    /// Create a record for a file of the given size.
    ///
    /// Block count and overhead are derived from the size; the
    /// unique/duplicate tallies start at zero and are filled in as blocks
    /// are classified.
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64, block_size: u64) -> Self {
        let block_count = size_bytes.div_ceil(block_size);
        Self {
            path: path.into(),
            size_bytes,
            block_count,
            overhead_bytes: block_count * block_size - size_bytes,
            unique_blocks: 0,
            duplicate_blocks: 0,
        }
    }
}
