//! Integration tests for the anagrind solver.
//!
//! These verify the complete pipeline — dictionary loading, index
//! construction, the recursive search under every configuration, and the
//! final merge — against an independent brute-force enumerator and against
//! hand-checked examples.

use anagrind::config::SearchConfig;
use anagrind::coordinator::{solve, solve_with_defaults};
use anagrind::letters::LetterSet;
use anagrind::word_list::WordList;

/// Load the fixture dictionary.
fn load_test_dictionary() -> Vec<String> {
    WordList::load_from_path("tests/fixtures/test_dictionary.txt")
        .expect("failed to read test dictionary")
        .words
}

fn dict(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| (*s).to_string()).collect()
}

/// Independent reference enumerator: recursive scan over the plain sorted
/// word list with a non-decreasing word index (allowing reuse), no groups,
/// no trie, no cache, no sharding.
fn brute_force(words: &[String], query: &str) -> Vec<String> {
    fn recurse(
        words: &[String],
        remaining: &LetterSet,
        start: usize,
        chosen: &mut Vec<String>,
        out: &mut Vec<String>,
    ) {
        if remaining.is_empty() {
            out.push(chosen.join(" "));
            return;
        }
        for i in start..words.len() {
            let letters = LetterSet::from_text(&words[i]);
            if let Some(rest) = remaining.checked_sub(&letters) {
                chosen.push(words[i].clone());
                recurse(words, &rest, i, chosen, out);
                chosen.pop();
            }
        }
    }

    let mut sorted = words.to_vec();
    sorted.sort();
    let target = LetterSet::from_text(query);
    let mut out = Vec::new();
    if !target.is_empty() {
        recurse(&sorted, &target, 0, &mut Vec::new(), &mut out);
    }
    out.sort();
    out.dedup();
    out
}

mod worked_examples {
    use super::*;

    #[test]
    fn test_cat_with_single_letters() {
        let words = dict(&["cat", "act", "a", "t", "c"]);
        let found = solve_with_defaults("cat", &words).unwrap();
        assert!(found.contains(&"act".to_string()));
        assert!(found.contains(&"cat".to_string()));
        assert_eq!(found, vec!["a c t", "act", "cat"]);
    }

    #[test]
    fn test_listen_anagram_family() {
        let words = dict(&["listen", "silent", "enlist"]);
        let found = solve_with_defaults("listen", &words).unwrap();
        assert_eq!(found, vec!["enlist", "listen", "silent"]);
    }

    #[test]
    fn test_empty_query() {
        let words = dict(&["cat", "dog"]);
        assert!(solve_with_defaults("", &words).unwrap().is_empty());
    }

    #[test]
    fn test_non_alphabetic_characters_ignored() {
        let words = dict(&["cat", "act", "a", "t", "c"]);
        let plain = solve_with_defaults("cat", &words).unwrap();
        assert_eq!(solve_with_defaults("c3a!t", &words).unwrap(), plain);
        assert_eq!(solve_with_defaults("  C A T?", &words).unwrap(), plain);
    }
}

mod output_properties {
    use super::*;

    fn fixture_solution() -> (Vec<String>, Vec<String>) {
        let words = load_test_dictionary();
        let found = solve_with_defaults("silentnit", &words).unwrap();
        (words, found)
    }

    #[test]
    fn test_round_trip_letters_match_query() {
        let (_, found) = fixture_solution();
        let target = LetterSet::from_text("silentnit");
        assert!(!found.is_empty());
        for entry in &found {
            assert_eq!(
                LetterSet::from_text(entry),
                target,
                "entry '{entry}' does not use exactly the query letters"
            );
        }
    }

    #[test]
    fn test_no_duplicate_entries() {
        let (_, found) = fixture_solution();
        let mut deduped = found.clone();
        deduped.dedup();
        assert_eq!(found, deduped);
    }

    #[test]
    fn test_output_is_sorted() {
        let (_, found) = fixture_solution();
        let mut sorted = found.clone();
        sorted.sort();
        assert_eq!(found, sorted);
    }

    #[test]
    fn test_words_within_entries_are_sorted() {
        let (_, found) = fixture_solution();
        for entry in &found {
            let words: Vec<&str> = entry.split(' ').collect();
            let mut sorted = words.clone();
            sorted.sort_unstable();
            assert_eq!(words, sorted, "entry '{entry}' is not alphabetically ordered");
        }
    }

    #[test]
    fn test_matches_brute_force_on_fixture() {
        let (words, found) = fixture_solution();
        assert_eq!(found, brute_force(&words, "silentnit"));
    }
}

mod configuration_matrix {
    use super::*;

    const QUERY: &str = "ratcat";

    fn matrix_dictionary() -> Vec<String> {
        dict(&["act", "cat", "rat", "tar", "art", "at", "ta", "a", "t", "c", "r", "tact"])
    }

    #[test]
    fn test_completeness_across_every_configuration() {
        let words = matrix_dictionary();
        let expected = brute_force(&words, QUERY);
        assert!(!expected.is_empty());

        for worker_count in [1, 2, 3, 5] {
            for fast_path_enabled in [false, true] {
                for caching_enabled in [false, true] {
                    let config = SearchConfig {
                        worker_count,
                        fast_path_enabled,
                        caching_enabled,
                        ..Default::default()
                    };
                    let found = solve(QUERY, &words, &config, None).unwrap();
                    assert_eq!(
                        found, expected,
                        "workers={worker_count} fast_path={fast_path_enabled} cache={caching_enabled}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_sharding_invariance() {
        let words = load_test_dictionary();
        let baseline = solve_with_defaults("tinselsit", &words).unwrap();
        for worker_count in [2, 4, 9] {
            let config = SearchConfig { worker_count, ..Default::default() };
            assert_eq!(solve("tinselsit", &words, &config, None).unwrap(), baseline);
        }
    }

    #[test]
    fn test_strategy_equivalence() {
        let words = load_test_dictionary();
        // Force the heuristic both ways: an enormous factor always picks the
        // trie walk, a disabled fast path never does.
        let always_trie = SearchConfig {
            fast_path_enabled: true,
            fast_path_relative_speed: 1e12,
            ..Default::default()
        };
        let never_trie = SearchConfig { fast_path_enabled: false, ..Default::default() };
        assert_eq!(
            solve("tinselsit", &words, &always_trie, None).unwrap(),
            solve("tinselsit", &words, &never_trie, None).unwrap()
        );
    }

    #[test]
    fn test_cache_transparency_including_tiny_limits() {
        let words = load_test_dictionary();
        let baseline = solve_with_defaults("tinselsit", &words).unwrap();
        for cache_limit in [1, 2, 100, 1_000_000] {
            let config = SearchConfig {
                caching_enabled: true,
                cache_limit,
                ..Default::default()
            };
            assert_eq!(
                solve("tinselsit", &words, &config, None).unwrap(),
                baseline,
                "cache_limit={cache_limit}"
            );
        }
    }

    #[test]
    fn test_everything_on_at_once_matches_brute_force() {
        let words = load_test_dictionary();
        let config = SearchConfig {
            worker_count: 4,
            caching_enabled: true,
            cache_limit: 10,
            cache_clear_fraction: 0.5,
            fast_path_enabled: true,
            result_batch_size: 3,
            ..Default::default()
        };
        let found = solve("listensit", &words, &config, None).unwrap();
        assert_eq!(found, brute_force(&words, "listensit"));
    }
}

mod dictionary_loading {
    use super::*;

    #[test]
    fn test_fixture_skips_entries_outside_a_to_z() {
        let words = load_test_dictionary();
        assert!(!words.iter().any(|w| w.contains('\'') || w.contains('-')));
        assert!(!words.contains(&"café".to_string()));
        assert!(words.contains(&"listen".to_string()));
    }

    #[test]
    fn test_missing_dictionary_is_fatal() {
        let err = WordList::load_from_path("tests/fixtures/no_such_file.txt").unwrap_err();
        assert_eq!(err.code(), "D001");
        assert!(err.display_detailed().contains("D001"));
    }
}

mod progress_reporting {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_progress_is_observational_only() {
        let words = dict(&["cat", "act", "a", "t", "c"]);
        let calls: Mutex<usize> = Mutex::new(0);
        let meter = |_w: usize, _i: usize, _n: usize| {
            *calls.lock().unwrap() += 1;
        };
        let config = SearchConfig { worker_count: 2, ..Default::default() };
        let with_meter = solve("cat", &words, &config, Some(&meter)).unwrap();
        let without = solve("cat", &words, &config, None).unwrap();
        assert_eq!(with_meter, without);
        assert!(*calls.lock().unwrap() > 0);
    }

    #[test]
    fn test_worker_failure_is_fatal_not_empty() {
        // A worker that dies mid-search must surface as an error, never as
        // "that worker found nothing". The panic is injected through the
        // progress callback, which runs on the worker's own thread.
        let words = dict(&["cat", "act", "a", "t", "c", "at", "ta"]);
        let blow_up = |w: usize, _i: usize, _n: usize| {
            assert!(w != 1, "injected failure in worker 1");
        };
        let config = SearchConfig { worker_count: 2, ..Default::default() };
        let err = solve("cat", &words, &config, Some(&blow_up)).unwrap_err();
        assert_eq!(err.code(), "S002");
        assert!(err.to_string().contains("worker 1"));
    }

    #[test]
    fn test_progress_counts_cover_each_shard() {
        let words = dict(&["cat", "act", "a", "t", "c", "at", "ta"]);
        let seen: Mutex<Vec<(usize, usize, usize)>> = Mutex::new(Vec::new());
        let meter = |w: usize, i: usize, n: usize| {
            seen.lock().unwrap().push((w, i, n));
        };
        let config = SearchConfig { worker_count: 2, ..Default::default() };
        solve("cat", &words, &config, Some(&meter)).unwrap();

        let seen = seen.into_inner().unwrap();
        for worker_id in 0..2 {
            let steps: Vec<_> = seen.iter().filter(|(w, _, _)| *w == worker_id).collect();
            assert!(!steps.is_empty(), "worker {worker_id} never reported");
            let (_, last, total) = steps.last().unwrap();
            assert_eq!(last, total, "worker {worker_id} did not finish its shard");
        }
    }
}
