//! `index` — anagram-class word index with pruning structures.
//!
//! Dictionary words are grouped by canonical key, so all spellings of one
//! anagram class ("cat", "act") live in a single [`WordGroup`]. The groups
//! are sorted by descending key length (consuming more letters first prunes
//! branching fastest), with ascending key as a deterministic tie-break.
//!
//! Two structures accelerate the search over the sorted groups:
//!
//! - a **length jump table**: for a remainder of `n` letters, the first
//!   group index whose key is no longer than `n` — everything before it is
//!   too long to fit and can be skipped wholesale;
//! - a **prefix trie** over canonical keys: a walk descends one letter at a
//!   time, restricted to letters present in the remainder, so it visits
//!   only *reachable* groups instead of scanning the whole index.
//!
//! A `WordIndex` is built once per query (pre-filtered to words containable
//! in the query) and never mutated afterwards, so workers can each own one
//! without synchronization.

use crate::letters::{LetterSet, ALPHABET_SIZE};

/// Sentinel for "no child" / "no group" in the trie arena.
const NONE: u32 = u32::MAX;

/// One anagram-equivalence class: a canonical key, its letter multiset,
/// and every dictionary spelling sharing that key. Immutable once built.
#[derive(Debug, Clone)]
pub struct WordGroup {
    /// Canonical sorted-letter key, e.g. `"act"`.
    pub key: String,
    /// Letter multiset shared by all spellings.
    pub letters: LetterSet,
    /// Original spellings, sorted alphabetically, e.g. `["act", "cat"]`.
    pub spellings: Vec<String>,
}

#[derive(Debug, Clone)]
struct TrieNode {
    children: [u32; ALPHABET_SIZE],
    /// Index of the group whose full key ends at this node, if any.
    group: u32,
}

impl TrieNode {
    fn new() -> Self {
        Self { children: [NONE; ALPHABET_SIZE], group: NONE }
    }
}

/// Immutable index over the word groups reachable from one query.
#[derive(Debug, Clone)]
pub struct WordIndex {
    /// Groups sorted by descending key length, then ascending key.
    pub groups: Vec<WordGroup>,
    /// `jump[n]` = first index whose key length is <= n.
    jump: Vec<usize>,
    /// Trie arena; node 0 is the root (present even when `groups` is empty).
    trie: Vec<TrieNode>,
}

impl WordIndex {
    /// Build an index from a word list.
    ///
    /// When `filter` is given, only words whose letters are a sub-multiset
    /// of it are indexed. This collapses a large dictionary to the words
    /// actually reachable from the query and is what keeps the search
    /// tractable.
    #[must_use]
    pub fn build(words: &[String], filter: Option<&LetterSet>) -> WordIndex {
        // Group spellings by canonical key. BTreeMap gives a deterministic
        // grouping order independent of hash state.
        let mut by_key: std::collections::BTreeMap<String, (LetterSet, Vec<String>)> =
            std::collections::BTreeMap::new();
        for word in words {
            let letters = LetterSet::from_text(word);
            if letters.is_empty() {
                continue;
            }
            if let Some(target) = filter {
                if !target.contains(&letters) {
                    continue;
                }
            }
            by_key
                .entry(letters.key())
                .or_insert_with(|| (letters, Vec::new()))
                .1
                .push(word.clone());
        }

        let mut groups: Vec<WordGroup> = by_key
            .into_iter()
            .map(|(key, (letters, mut spellings))| {
                spellings.sort();
                spellings.dedup();
                WordGroup { key, letters, spellings }
            })
            .collect();

        // Longest keys first; ascending key breaks ties deterministically.
        groups.sort_by(|a, b| {
            b.key.len().cmp(&a.key.len()).then_with(|| a.key.cmp(&b.key))
        });

        let max_len = groups.first().map_or(0, |g| g.key.len());
        let jump = (0..=max_len)
            .map(|n| groups.partition_point(|g| g.key.len() > n))
            .collect();

        let mut trie = vec![TrieNode::new()];
        for (gi, group) in groups.iter().enumerate() {
            let mut node = 0usize;
            for b in group.key.bytes() {
                let slot = (b - b'a') as usize;
                let next = trie[node].children[slot];
                node = if next == NONE {
                    trie.push(TrieNode::new());
                    let fresh = (trie.len() - 1) as u32;
                    trie[node].children[slot] = fresh;
                    fresh as usize
                } else {
                    next as usize
                };
            }
            // Keys are unique after grouping, so no terminal collisions.
            debug_assert_eq!(trie[node].group, NONE);
            trie[node].group = gi as u32;
        }

        WordIndex { groups, jump, trie }
    }

    /// First group index whose key fits within `remaining` letters.
    ///
    /// Groups before this index are all too long for the remainder and the
    /// linear scan starts here (or at the caller's lower bound, whichever
    /// is later).
    #[must_use]
    pub fn first_index_for(&self, remaining: u32) -> usize {
        let remaining = remaining as usize;
        if remaining >= self.jump.len() {
            0
        } else {
            self.jump[remaining]
        }
    }

    /// Number of groups a linear scan from `min_pos` would still consider
    /// for a remainder of `remaining` letters. Drives strategy selection.
    #[must_use]
    pub fn groups_remaining(&self, min_pos: usize, remaining: u32) -> usize {
        let start = min_pos.max(self.first_index_for(remaining));
        self.groups.len().saturating_sub(start)
    }

    /// Collect the positions of every group whose letters are a sub-multiset
    /// of `remainder` and whose position is >= `min_pos`, by walking the
    /// key trie.
    ///
    /// The walk descends only through letters with a nonzero remaining
    /// count, so its cost scales with the remainder's combination space
    /// rather than with the number of groups.
    #[must_use]
    pub fn reachable_positions(&self, remainder: &LetterSet, min_pos: usize) -> Vec<usize> {
        let mut found = Vec::new();
        self.walk(0, *remainder, min_pos, &mut found);
        found
    }

    fn walk(&self, node: usize, remainder: LetterSet, min_pos: usize, found: &mut Vec<usize>) {
        let n = &self.trie[node];
        if n.group != NONE && (n.group as usize) >= min_pos {
            found.push(n.group as usize);
        }
        for slot in 0..ALPHABET_SIZE {
            if remainder.count(slot) == 0 {
                continue;
            }
            let child = n.children[slot];
            if child != NONE {
                self.walk(child as usize, remainder.without_one(slot), min_pos, found);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_build_groups_anagrams_together() {
        let index = WordIndex::build(&words(&["cat", "act", "dog"]), None);
        assert_eq!(index.groups.len(), 2);
        let act = index.groups.iter().find(|g| g.key == "act").unwrap();
        assert_eq!(act.spellings, vec!["act", "cat"]);
    }

    #[test]
    fn test_build_sorts_longest_key_first() {
        let index = WordIndex::build(&words(&["a", "cat", "at", "horse"]), None);
        let lens: Vec<usize> = index.groups.iter().map(|g| g.key.len()).collect();
        assert_eq!(lens, vec![5, 3, 2, 1]);
    }

    #[test]
    fn test_build_tie_break_is_ascending_key() {
        let index = WordIndex::build(&words(&["cab", "tan", "bed"]), None);
        let keys: Vec<&str> = index.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["abc", "ant", "bde"]);
    }

    #[test]
    fn test_filter_drops_unreachable_words() {
        let target = LetterSet::from_text("cat");
        let index = WordIndex::build(&words(&["cat", "act", "cc", "dog", "a", "t"]), Some(&target));
        let keys: Vec<&str> = index.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["act", "a", "t"]);
    }

    #[test]
    fn test_first_index_for_skips_long_keys() {
        let index = WordIndex::build(&words(&["horse", "cat", "at", "a"]), None);
        // keys: horse(5), act(3), at(2), a(1)
        assert_eq!(index.first_index_for(5), 0);
        assert_eq!(index.first_index_for(4), 1); // skip "ehors"
        assert_eq!(index.first_index_for(3), 1);
        assert_eq!(index.first_index_for(2), 2);
        assert_eq!(index.first_index_for(1), 3);
        assert_eq!(index.first_index_for(0), 4);
        // remainders larger than the longest key start from the top
        assert_eq!(index.first_index_for(99), 0);
    }

    #[test]
    fn test_groups_remaining_respects_lower_bound() {
        let index = WordIndex::build(&words(&["horse", "cat", "at", "a"]), None);
        assert_eq!(index.groups_remaining(0, 5), 4);
        assert_eq!(index.groups_remaining(0, 2), 2);
        assert_eq!(index.groups_remaining(3, 5), 1);
        assert_eq!(index.groups_remaining(4, 5), 0);
    }

    #[test]
    fn test_reachable_positions_matches_linear_scan() {
        let index = WordIndex::build(
            &words(&["cat", "act", "at", "ta", "a", "t", "c", "dog", "cc"]),
            None,
        );
        let remainder = LetterSet::from_text("cat");
        for min_pos in 0..=index.groups.len() {
            let mut scan: Vec<usize> = (min_pos..index.groups.len())
                .filter(|&i| remainder.contains(&index.groups[i].letters))
                .collect();
            let mut walked = index.reachable_positions(&remainder, min_pos);
            scan.sort_unstable();
            walked.sort_unstable();
            assert_eq!(walked, scan, "min_pos={min_pos}");
        }
    }

    #[test]
    fn test_reachable_positions_empty_remainder() {
        let index = WordIndex::build(&words(&["cat", "a"]), None);
        assert!(index.reachable_positions(&LetterSet::from_text(""), 0).is_empty());
    }

    #[test]
    fn test_build_empty_wordlist() {
        let index = WordIndex::build(&[], None);
        assert!(index.groups.is_empty());
        assert_eq!(index.first_index_for(10), 0);
        assert!(index.reachable_positions(&LetterSet::from_text("abc"), 0).is_empty());
    }
}
