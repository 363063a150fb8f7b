//! `cache` — bounded memoization of search sub-results.
//!
//! Many distinct leading word choices converge on the same remaining
//! letters, so sub-results are memoized by the remainder's canonical key.
//!
//! Entries are **position-sensitive**: a result list computed while scanning
//! from group position `S` onward only answers a later lookup with lower
//! bound `L` when `L >= S` (scanning from `S` cannot have seen groups before
//! `S`, so a smaller `L` would have a gap). Such lookups are treated as
//! misses; the caller recomputes in full from `L` and the replacement entry
//! takes the smaller boundary.
//!
//! When the cache grows past its limit, the lowest-hit-count entries are
//! dropped until the overage plus a configured fraction of capacity is
//! reclaimed (approximate least-frequently-used). Eviction is only invoked
//! from safe checkpoints between outer-loop iterations — never mid-recursion.

use crate::search::SubResult;
use log::debug;
use rustc_hash::FxHashMap;

#[derive(Debug)]
struct CacheEntry {
    results: Vec<SubResult>,
    /// Scan-start position the results were computed from.
    boundary: usize,
    hits: u64,
}

/// Per-worker memo of remainder key -> sub-results. Not shared between
/// workers, so no synchronization.
#[derive(Debug)]
pub struct ResultCache {
    entries: FxHashMap<String, CacheEntry>,
    limit: usize,
    clear_fraction: f64,
}

impl ResultCache {
    #[must_use]
    pub fn new(limit: usize, clear_fraction: f64) -> Self {
        Self { entries: FxHashMap::default(), limit, clear_fraction }
    }

    /// Number of cached remainders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the sub-results for `key` with lower bound `min_pos`.
    ///
    /// Returns `None` (a miss) when the key is absent or the stored entry's
    /// boundary is greater than `min_pos`. On a hit the stored results are
    /// filtered down to positions >= `min_pos` and the hit counter bumped.
    #[must_use]
    pub fn lookup(&mut self, key: &str, min_pos: usize) -> Option<Vec<SubResult>> {
        let entry = self.entries.get_mut(key)?;
        entry.hits += 1;
        if entry.boundary > min_pos {
            // Computed from a later start; cannot answer without a gap.
            return None;
        }
        Some(
            entry
                .results
                .iter()
                .filter(|r| r.pos >= min_pos)
                .cloned()
                .collect(),
        )
    }

    /// Store results computed from `boundary` onward.
    ///
    /// A fresh key is inserted; an existing entry is replaced only when the
    /// new boundary is smaller (the replacement strictly supersedes it).
    pub fn insert(&mut self, key: String, results: Vec<SubResult>, boundary: usize) {
        match self.entries.entry(key) {
            std::collections::hash_map::Entry::Vacant(v) => {
                v.insert(CacheEntry { results, boundary, hits: 0 });
            }
            std::collections::hash_map::Entry::Occupied(mut o) => {
                let entry = o.get_mut();
                if boundary < entry.boundary {
                    entry.results = results;
                    entry.boundary = boundary;
                }
            }
        }
    }

    /// Evict low-usage entries if the cache is over its limit.
    ///
    /// Must only be called between sibling iterations at the top level of a
    /// worker's scan; a recursive call in flight may still read any entry.
    pub fn evict_if_over_limit(&mut self) {
        let size = self.entries.len();
        if size <= self.limit {
            return;
        }
        let to_remove =
            (size - self.limit) + (self.limit as f64 * self.clear_fraction) as usize;

        // Histogram of hit counts, lowest tiers evicted first.
        let mut usage: FxHashMap<u64, usize> = FxHashMap::default();
        for entry in self.entries.values() {
            *usage.entry(entry.hits).or_insert(0) += 1;
        }
        let mut tiers: Vec<(u64, usize)> = usage.into_iter().collect();
        tiers.sort_unstable_by_key(|&(hits, _)| hits);

        let mut removed = 0usize;
        let mut cutoff = 0u64; // highest hit count that gets evicted
        for (hits, count) in tiers {
            cutoff = hits;
            removed += count;
            if removed >= to_remove {
                break;
            }
        }
        self.entries.retain(|_, entry| entry.hits > cutoff);
        debug!("cache eviction: {size} -> {} entries (limit {})", self.entries.len(), self.limit);
    }
}
