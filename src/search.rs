//! `search` — the recursive decomposition engine.
//!
//! Given a target letter multiset and a [`WordIndex`], a [`Searcher`]
//! enumerates every unordered sequence of word groups whose letters exactly
//! exhaust the target, then cross-products each group's spellings into full
//! decompositions.
//!
//! # Ordering invariant
//!
//! A decomposition path may only extend through groups whose index is
//! **non-decreasing** relative to the previously chosen group. Each
//! *combination* of groups is therefore discovered exactly once ("cat act"
//! and "act cat" cannot both arise from distinct paths). Equal positions are
//! allowed, so a group — and hence a dictionary word — may be used more than
//! once within one decomposition ("a a" from query "aa").
//!
//! The invariant orders groups, not spellings, and shards interleave freely,
//! so the coordinator still sorts each assembled sequence and dedupes the
//! whole collection at the end.
//!
//! # Strategies
//!
//! Two interchangeable candidate-lookup strategies produce identical sets:
//!
//! - **linear scan**: walk the group list from the lower bound forward,
//!   entering via the length jump table;
//! - **trie walk**: enumerate only the groups reachable from the remainder's
//!   letters, chosen when the remainder's combination space is small
//!   relative to the groups left to scan (`fast_path_relative_speed`).

use crate::cache::ResultCache;
use crate::config::SearchConfig;
use crate::index::WordIndex;
use crate::letters::LetterSet;
use log::trace;

/// Progress observer: `(worker_id, items_processed, items_total)`.
///
/// Invoked at each outer-loop step of a worker's shard scan. Purely
/// observational; it can neither be required for nor affect correctness.
pub type ProgressFn<'a> = dyn Fn(usize, usize, usize) + Sync + 'a;

/// One decomposition of a remainder, tagged with the position of its
/// leading group so cached entries can be filtered by lower bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubResult {
    /// Index of the first group in the decomposition.
    pub pos: usize,
    /// Word spellings, in discovery order (unsorted).
    pub words: Vec<String>,
}

/// A single worker's search state: a read-only index plus a private cache.
pub struct Searcher<'a> {
    index: &'a WordIndex,
    config: &'a SearchConfig,
    cache: ResultCache,
}

impl<'a> Searcher<'a> {
    #[must_use]
    pub fn new(index: &'a WordIndex, config: &'a SearchConfig) -> Self {
        Self {
            index,
            config,
            cache: ResultCache::new(config.cache_limit, config.cache_clear_fraction),
        }
    }

    /// Scan this worker's shard of the outer candidate list, emitting every
    /// complete decomposition through `on_result` (words unordered within
    /// each decomposition).
    ///
    /// Worker `worker_id` of `worker_count` handles group positions
    /// `worker_id, worker_id + worker_count, …` — disjoint interleaved
    /// strides over the same index.
    pub fn search_shard(
        &mut self,
        target: &LetterSet,
        worker_id: usize,
        worker_count: usize,
        progress: Option<&ProgressFn<'_>>,
        on_result: &mut dyn FnMut(Vec<String>),
    ) {
        debug_assert!(worker_id < worker_count);
        let positions: Vec<usize> =
            (worker_id..self.index.groups.len()).step_by(worker_count).collect();
        let shard_total = positions.len();

        for (done, &pos) in positions.iter().enumerate() {
            let group = &self.index.groups[pos];
            if let Some(rest) = target.checked_sub(&group.letters) {
                if rest.is_empty() {
                    for spelling in &group.spellings {
                        on_result(vec![spelling.clone()]);
                    }
                } else {
                    let subs = self.search_remainder(&rest, pos);
                    for sub in &subs {
                        for spelling in &group.spellings {
                            let mut words = Vec::with_capacity(1 + sub.words.len());
                            words.push(spelling.clone());
                            words.extend(sub.words.iter().cloned());
                            on_result(words);
                        }
                    }
                }
            }

            // Safe checkpoint: no recursive call is in flight here.
            if self.config.caching_enabled {
                self.cache.evict_if_over_limit();
            }
            if let Some(report) = progress {
                report(worker_id, done + 1, shard_total);
            }
        }

        // Final tick so every worker ends at 100%, including one whose
        // shard is empty and never entered the loop.
        if let Some(report) = progress {
            report(worker_id, shard_total, shard_total);
        }
    }

    /// Enumerate every decomposition of `remainder` using only groups at
    /// positions >= `min_pos`.
    ///
    /// `remainder` must be non-empty; the base case (letters exhausted)
    /// is handled one level up, where a group's spellings become
    /// single-word results.
    fn search_remainder(&mut self, remainder: &LetterSet, min_pos: usize) -> Vec<SubResult> {
        debug_assert!(!remainder.is_empty());

        let cache_key = if self.config.caching_enabled {
            let key = remainder.key();
            if let Some(hit) = self.cache.lookup(&key, min_pos) {
                return hit;
            }
            Some(key)
        } else {
            None
        };

        let candidates = self.candidate_positions(remainder, min_pos);
        let mut results = Vec::new();

        for pos in candidates {
            let group = &self.index.groups[pos];
            let Some(rest) = remainder.checked_sub(&group.letters) else {
                continue;
            };
            if rest.is_empty() {
                for spelling in &group.spellings {
                    results.push(SubResult { pos, words: vec![spelling.clone()] });
                }
            } else {
                for sub in self.search_remainder(&rest, pos) {
                    for spelling in &group.spellings {
                        let mut words = Vec::with_capacity(1 + sub.words.len());
                        words.push(spelling.clone());
                        words.extend(sub.words.iter().cloned());
                        results.push(SubResult { pos, words });
                    }
                }
            }
        }

        if let Some(key) = cache_key {
            self.cache.insert(key, results.clone(), min_pos);
        }
        results
    }

    /// Pick a lookup strategy and return candidate group positions, in
    /// ascending order. Selection is purely a performance heuristic; both
    /// strategies yield the same set.
    fn candidate_positions(&self, remainder: &LetterSet, min_pos: usize) -> Vec<usize> {
        let groups_remaining = self.index.groups_remaining(min_pos, remainder.total());

        let use_trie = self.config.fast_path_enabled
            && (remainder.combination_count() as f64)
                < groups_remaining as f64 * self.config.fast_path_relative_speed;

        if use_trie {
            trace!(
                "trie walk: {} combinations vs {groups_remaining} groups",
                remainder.combination_count()
            );
            let mut positions = self.index.reachable_positions(remainder, min_pos);
            positions.sort_unstable();
            positions
        } else {
            let start = min_pos.max(self.index.first_index_for(remainder.total()));
            (start..self.index.groups.len())
                .filter(|&i| remainder.contains(&self.index.groups[i].letters))
                .collect()
        }
    }
}
