//! Global block fingerprint table.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use dedupest_core::BlockDigest;

/// Reference-counted table of every distinct block fingerprint seen so far.
///
/// This is the single source of truth for "have we seen this exact block
/// content before, anywhere in the tree". The table only grows: there is no
/// eviction, because the estimate requires exact global counting. For very
/// large trees its memory footprint (one entry per distinct block) is the
/// dominant resource cost of a run.
///
/// Backed by a sharded concurrent map, so insert-or-increment is atomic per
/// entry and files may be hashed in parallel without extra locking.
#[derive(Debug, Default)]
pub struct FingerprintTable {
    counts: DashMap<BlockDigest, u64>,
}

impl FingerprintTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            counts: DashMap::new(),
        }
    }

    /// Record one block's content. Returns `true` iff the content is new.
    ///
    /// The slice must contain exactly the bytes read for the block; a short
    /// final block is hashed as-is, never padded.
    pub fn record_block(&self, content: &[u8]) -> bool {
        self.record_digest(BlockDigest::of(content))
    }

    /// Record a pre-computed digest. Returns `true` iff it was absent.
    ///
    /// The insert-if-absent check and the increment happen under the entry's
    /// shard lock, so concurrent recorders never lose an update or count the
    /// same content as unique twice.
    pub fn record_digest(&self, digest: BlockDigest) -> bool {
        match self.counts.entry(digest) {
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += 1;
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(1);
                true
            }
        }
    }

    /// Number of distinct block fingerprints recorded.
    pub fn unique_count(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all reference counts, i.e. total blocks recorded.
    pub fn total_refs(&self) -> u64 {
        self.counts.iter().map(|entry| *entry.value()).sum()
    }

    /// Check if no blocks have been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
