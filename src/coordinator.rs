//! `coordinator` — fork-join sharding of the outer search.
//!
//! The outer candidate scan is embarrassingly parallel: worker `t` of `N`
//! handles group positions `t, t+N, t+2N, …`. Each worker builds its own
//! pre-filtered [`WordIndex`] and owns a private result cache, so no state
//! is shared between workers. Results stream back over a bounded channel in
//! fixed-size batches; the coordinator blocks on the channel until every
//! sender disconnects (no poll-and-sleep loop), then joins the workers and
//! runs one global sort + dedupe pass.
//!
//! A worker that terminates abnormally is a fatal error, distinct from a
//! worker that simply found nothing.

use crate::config::SearchConfig;
use crate::errors::SolveError;
use crate::index::WordIndex;
use crate::letters::LetterSet;
use crate::search::{ProgressFn, Searcher};
use itertools::Itertools;
use log::{debug, info};
use std::sync::mpsc;
use std::thread;

/// Enumerate every decomposition of `query` into words from `words`.
///
/// The query is lowercased and stripped of non-alphabetic characters before
/// matching; an empty normalized query yields an empty result set. The
/// returned list is duplicate-free and sorted, and each entry is a
/// space-joined, alphabetically ordered word sequence whose combined
/// letters exactly equal the query's.
///
/// `progress`, when given, is invoked from every worker thread with
/// `(worker_id, items_processed, items_total)`.
///
/// # Errors
///
/// Returns [`SolveError::Config`] for an invalid configuration and
/// [`SolveError::WorkerPanicked`] if any worker terminates abnormally
/// (in which case no partial results are returned).
pub fn solve(
    query: &str,
    words: &[String],
    config: &SearchConfig,
    progress: Option<&ProgressFn<'_>>,
) -> Result<Vec<String>, SolveError> {
    config.validate()?;

    let target = LetterSet::from_text(query);
    if target.is_empty() {
        return Ok(Vec::new());
    }
    info!(
        "solving {} letters with {} workers (cache: {})",
        target.total(),
        config.worker_count,
        if config.caching_enabled { "on" } else { "off" }
    );

    let worker_count = config.worker_count;
    let (tx, rx) = mpsc::sync_channel::<Vec<Vec<String>>>(worker_count * 2);

    let mut raw: Vec<Vec<String>> = Vec::new();
    let mut failed: Option<usize> = None;

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let tx = tx.clone();
            handles.push((
                worker_id,
                scope.spawn(move || {
                    // Each worker owns its index and cache; the filter
                    // collapses the dictionary to words reachable from
                    // the query.
                    let index = WordIndex::build(words, Some(&target));
                    let mut searcher = Searcher::new(&index, config);
                    let mut batch: Vec<Vec<String>> =
                        Vec::with_capacity(config.result_batch_size);

                    searcher.search_shard(
                        &target,
                        worker_id,
                        worker_count,
                        progress,
                        &mut |decomposition| {
                            batch.push(decomposition);
                            if batch.len() >= config.result_batch_size {
                                let full = std::mem::replace(
                                    &mut batch,
                                    Vec::with_capacity(config.result_batch_size),
                                );
                                // The receiver lives until every worker is
                                // done, so a send failure is unreachable.
                                let _ = tx.send(full);
                            }
                        },
                    );
                    if !batch.is_empty() {
                        let _ = tx.send(batch);
                    }
                    debug!("worker {worker_id} finished");
                }),
            ));
        }
        // The coordinator's clone must drop so the drain loop terminates
        // once all workers disconnect.
        drop(tx);

        for batch in rx {
            raw.extend(batch);
        }

        for (worker_id, handle) in handles {
            if handle.join().is_err() && failed.is_none() {
                failed = Some(worker_id);
            }
        }
    });

    if let Some(worker_id) = failed {
        return Err(SolveError::WorkerPanicked { worker_id });
    }
    Ok(finalize(raw))
}

/// Solve with the default configuration and no progress reporting.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_with_defaults(query: &str, words: &[String]) -> Result<Vec<String>, SolveError> {
    solve(query, words, &SearchConfig::default(), None)
}

/// Canonicalize raw decompositions: sort words within each entry, join with
/// spaces, then sort and dedupe the whole collection.
fn finalize(raw: Vec<Vec<String>>) -> Vec<String> {
    raw.into_iter()
        .map(|mut entry| {
            entry.sort();
            entry.join(" ")
        })
        .sorted()
        .dedup()
        .collect()
}
