//! `word_list` — Module to load and preprocess the dictionary for the solver.
//!
//! The input format is a newline-delimited list of words, one per line.
//! The parsing logic:
//! - Each line is trimmed and lowercased.
//! - Empty lines are skipped.
//! - Entries containing any character outside a–z after lowercasing are
//!   **silently skipped** (a single `warn!` reports how many were dropped).
//!   This mirrors how scored word lists are usually loaded: a handful of
//!   hyphenated or accented entries should not abort an otherwise good
//!   dictionary. The policy is skip-and-count, never reject-the-load.
//! - The final list is deduplicated and sorted alphabetically.
//!
//! Loading from a path is the only fallible step; an unreadable file is
//! fatal before any search begins.

use crate::errors::DictionaryError;
use log::warn;

/// A processed, ready-to-use dictionary.
///
/// The `words` vector contains all valid entries (lowercase a–z only,
/// deduplicated, sorted alphabetically).
#[derive(Debug, Clone)]
pub struct WordList {
    /// List of lowercase words. Example: `["able", "acid", "acorn", ...]`
    pub words: Vec<String>,
}

impl WordList {
    /// Parse a raw dictionary from an in-memory string.
    ///
    /// Skips empty lines and entries with characters outside a–z; the rest
    /// are lowercased, deduplicated, and sorted.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> WordList {
        let mut skipped = 0usize;
        let mut words: Vec<String> = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();
                if line.is_empty() {
                    return None;
                }
                let word = line.to_lowercase();
                if word.chars().all(|c| c.is_ascii_lowercase()) {
                    Some(word)
                } else {
                    skipped += 1;
                    None
                }
            })
            .collect();

        if skipped > 0 {
            warn!("skipped {skipped} dictionary entries with characters outside a-z");
        }

        // sort + dedup: we want a sorted Vec anyway, and dedup() only
        // removes adjacent duplicates
        words.sort();
        words.dedup();

        WordList { words }
    }

    /// Read a dictionary file from `path` and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Io`] if the file cannot be read.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<WordList, DictionaryError> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| DictionaryError::Io {
            path: path_ref.display().to_string(),
            source: e,
        })?;
        Ok(Self::parse_from_str(&data))
    }
}
