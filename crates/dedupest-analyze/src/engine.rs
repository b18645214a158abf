//! Dedup estimation engine: chunk, fingerprint, account.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, warn};

use dedupest_core::{BlockDigest, FileFailure, FileRecord, RunConfig, RunSummary};

use crate::table::FingerprintTable;

/// Lazy sequence of a file's blocks.
///
/// Yields consecutive chunks of exactly `block_size` bytes, in file order;
/// the final chunk carries only the bytes that remain when the file length
/// is not an exact multiple of the block size. Every chunk is a freshly
/// allocated buffer truncated to the bytes actually read, so a short final
/// block can never pick up stale bytes from an earlier read and is never
/// zero-padded before hashing.
pub struct BlockChunks<R> {
    reader: R,
    block_size: usize,
    done: bool,
}

impl<R: Read> BlockChunks<R> {
    /// Create a chunk iterator over a reader.
    pub fn new(reader: R, block_size: usize) -> Self {
        Self {
            reader,
            block_size,
            done: false,
        }
    }
}

impl<R: Read> Iterator for BlockChunks<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = vec![0u8; self.block_size];
        let mut filled = 0;

        // Short reads are legal mid-block; keep filling until the block is
        // complete or the file ends.
        while filled < self.block_size {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        if filled == 0 {
            self.done = true;
            return None;
        }
        if filled < self.block_size {
            self.done = true;
        }
        buf.truncate(filled);
        Some(Ok(buf))
    }
}

/// Block-level dedup estimator.
///
/// Drives the whole run: streams every file in the list through
/// [`BlockChunks`], records each block in a [`FingerprintTable`] owned by
/// the run, and folds the per-file records into a [`RunSummary`]. A run is
/// atomic from the caller's perspective: it always completes and produces a
/// summary, even if every file fails.
pub struct DedupEstimator {
    config: RunConfig,
}

impl DedupEstimator {
    /// Create an estimator for the given run configuration.
    pub fn with_config(config: RunConfig) -> Self {
        Self { config }
    }

    /// The configuration this estimator runs with.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Estimate dedup savings over a list of file paths.
    ///
    /// Files are hashed in parallel; all fingerprint bookkeeping goes
    /// through one fresh table scoped to this call, so repeated or
    /// concurrent runs never interfere. Per-file read errors are recorded
    /// and skipped, never fatal.
    pub fn estimate(&self, files: &[PathBuf]) -> RunSummary {
        let start = Instant::now();
        let table = FingerprintTable::new();
        let block_size = self.config.block_size;

        let results: Vec<Result<FileRecord, FileFailure>> = match self.thread_pool() {
            Some(pool) => pool.install(|| {
                files
                    .par_iter()
                    .map(|path| process_file(path, block_size, &table))
                    .collect()
            }),
            None => files
                .par_iter()
                .map(|path| process_file(path, block_size, &table))
                .collect(),
        };

        let mut processed = Vec::new();
        let mut failed = Vec::new();
        let mut total_bytes: u64 = 0;
        let mut total_blocks: u64 = 0;
        let mut total_overhead_bytes: u64 = 0;

        for result in results {
            match result {
                Ok(record) => {
                    total_bytes += record.size_bytes;
                    total_blocks += record.block_count;
                    total_overhead_bytes += record.overhead_bytes;
                    processed.push(record);
                }
                Err(failure) => {
                    warn!(path = %failure.path.display(), "{}", failure.message);
                    failed.push(failure);
                }
            }
        }

        let unique_blocks = table.unique_count() as u64;
        debug_assert_eq!(table.total_refs(), total_blocks);

        RunSummary {
            block_size,
            total_files: processed.len() as u64,
            total_bytes,
            total_blocks,
            total_overhead_bytes,
            unique_blocks,
            duplicate_blocks: total_blocks - unique_blocks,
            files: processed,
            failed,
            elapsed: start.elapsed(),
        }
    }

    /// Build a dedicated pool when a thread count was requested.
    fn thread_pool(&self) -> Option<rayon::ThreadPool> {
        if self.config.threads == 0 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!("Falling back to shared thread pool: {e}");
                None
            }
        }
    }
}

/// Stream one file and record its blocks in the table.
///
/// Digests are buffered and committed to the table only after the whole
/// file has streamed cleanly, so a file that fails mid-read contributes
/// nothing: neither to the table nor to the run totals. The file handle is
/// dropped on every exit path.
fn process_file(
    path: &Path,
    block_size: u64,
    table: &FingerprintTable,
) -> Result<FileRecord, FileFailure> {
    let file = File::open(path).map_err(|e| FileFailure::open_error(path, &e))?;

    let mut digests = Vec::new();
    let mut size_bytes: u64 = 0;

    for chunk in BlockChunks::new(file, block_size as usize) {
        let chunk = chunk.map_err(|e| FileFailure::read_error(path, &e))?;
        size_bytes += chunk.len() as u64;
        digests.push(BlockDigest::of(&chunk));
    }

    let mut record = FileRecord::new(path, size_bytes, block_size);
    debug_assert_eq!(record.block_count, digests.len() as u64);

    for digest in digests {
        if table.record_digest(digest) {
            record.unique_blocks += 1;
        } else {
            record.duplicate_blocks += 1;
        }
    }

    debug!(
        path = %record.path.display(),
        bytes = record.size_bytes,
        blocks = record.block_count,
        unique = record.unique_blocks,
        duplicate = record.duplicate_blocks,
        "processed file"
    );

    Ok(record)
}
