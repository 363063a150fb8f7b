//! `letters` — fixed-alphabet letter multisets.
//!
//! A [`LetterSet`] counts how many times each of the 26 lowercase ASCII
//! letters occurs in a piece of text. It is the currency of the whole
//! solver: the query becomes a `LetterSet`, every dictionary word becomes
//! one, and the recursive search repeatedly subtracts word sets from the
//! remaining query set.
//!
//! Counts live in a fixed `[u32; 26]` array rather than a map, so iteration
//! order is always alphabetical and canonical keys are deterministic.

/// Number of letters in the supported alphabet (lowercase ASCII).
pub const ALPHABET_SIZE: usize = 26;

/// A multiset of lowercase letters, stored as per-letter counts.
///
/// Two `LetterSet`s are equal iff every letter count matches, which is
/// equivalent to their canonical keys being equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LetterSet {
    counts: [u32; ALPHABET_SIZE],
}

impl LetterSet {
    /// Build a `LetterSet` from free text.
    ///
    /// Characters are lowercased first; anything outside a–z is dropped.
    /// `"c3a!T"` therefore produces the same set as `"cat"`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut counts = [0u32; ALPHABET_SIZE];
        for c in text.chars() {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() {
                counts[(c as u8 - b'a') as usize] += 1;
            }
        }
        Self { counts }
    }

    /// Total number of letters in the multiset.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// True when no letters remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Count for a single letter slot (0 = 'a' … 25 = 'z').
    ///
    /// # Panics
    /// Panics if `slot >= ALPHABET_SIZE`.
    #[must_use]
    pub fn count(&self, slot: usize) -> u32 {
        debug_assert!(slot < ALPHABET_SIZE, "letter slot {slot} out of range");
        self.counts[slot]
    }

    /// Subset test with remainder.
    ///
    /// Returns `Some(self - other)` when every letter of `other` is available
    /// in `self`, otherwise `None`. The remainder never holds negative
    /// counts; slots simply reach zero.
    #[must_use]
    pub fn checked_sub(&self, other: &LetterSet) -> Option<LetterSet> {
        let mut counts = [0u32; ALPHABET_SIZE];
        for i in 0..ALPHABET_SIZE {
            counts[i] = self.counts[i].checked_sub(other.counts[i])?;
        }
        Some(LetterSet { counts })
    }

    /// True when `other` is a sub-multiset of `self`.
    #[must_use]
    pub fn contains(&self, other: &LetterSet) -> bool {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .all(|(have, need)| have >= need)
    }

    /// Remove one occurrence of the letter in `slot`.
    ///
    /// Used by the trie walk, which always checks `count(slot) > 0` first.
    #[must_use]
    pub fn without_one(&self, slot: usize) -> LetterSet {
        debug_assert!(self.counts[slot] > 0, "removing letter with zero count");
        let mut counts = self.counts;
        counts[slot] -= 1;
        LetterSet { counts }
    }

    /// Canonical key: each letter repeated by its count, in alphabetical
    /// order, concatenated. `"cat"` and `"act"` both yield `"act"`.
    #[must_use]
    pub fn key(&self) -> String {
        let mut key = String::with_capacity(self.total() as usize);
        for (i, &n) in self.counts.iter().enumerate() {
            for _ in 0..n {
                key.push((b'a' + i as u8) as char);
            }
        }
        key
    }

    /// Size of the sub-multiset space: the saturating product of
    /// `count + 1` over all letters.
    ///
    /// This is the number of distinct letter combinations reachable from
    /// this set, and bounds the work of a trie walk. The search engine
    /// compares it against the number of word groups left to scan when
    /// choosing a lookup strategy.
    #[must_use]
    pub fn combination_count(&self) -> u64 {
        self.counts
            .iter()
            .filter(|&&n| n > 0)
            .fold(1u64, |acc, &n| acc.saturating_mul(u64::from(n) + 1))
    }
}
