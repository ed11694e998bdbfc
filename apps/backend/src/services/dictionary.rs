//! Word list lookups for scoring.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::errors::domain::{DomainError, PreconditionKind};
use crate::storage::Storage;

/// A dictionary-valid word found within a line of letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundWord {
    pub word: String,
    /// Inclusive start offset within the line
    pub start: usize,
    /// Exclusive end offset within the line
    pub end: usize,
}

#[derive(Default)]
struct WordSet {
    words: HashSet<String>,
    loaded: bool,
}

/// Case-insensitive dictionary; words shorter than 2 characters are never
/// valid. Lookups on an unloaded dictionary answer false rather than
/// erroring, so a missing word list degrades to zero scores.
pub struct DictionaryService {
    storage: Arc<dyn Storage>,
    inner: RwLock<WordSet>,
}

impl DictionaryService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            inner: RwLock::new(WordSet::default()),
        }
    }

    /// Load the word list previously saved to storage.
    pub async fn load_from_storage(&self) -> Result<(), DomainError> {
        let words = self.storage.get_dictionary_words().await?;
        if words.is_empty() {
            return Err(DomainError::precondition(
                PreconditionKind::DictionaryNotLoaded,
                "no dictionary words in storage",
            ));
        }
        self.load_words(&words);
        Ok(())
    }

    /// Load a word list file (one word per line) and persist it to storage
    /// for future runs.
    pub async fn load_from_file(&self, path: &Path) -> Result<(), DomainError> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|err| {
            DomainError::invalid_input(format!(
                "cannot read dictionary file {}: {err}",
                path.display()
            ))
        })?;

        let words: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        self.storage.save_dictionary_words(&words).await?;
        self.load_words(&words);
        Ok(())
    }

    /// Replace the in-memory word set.
    pub fn load_words(&self, words: &[String]) {
        let mut inner = self.inner.write();
        inner.words = words.iter().map(|w| w.to_lowercase()).collect();
        inner.loaded = true;
        info!(word_count = inner.words.len(), "dictionary loaded");
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.read().loaded
    }

    pub fn word_count(&self) -> usize {
        self.inner.read().words.len()
    }

    /// True when the word is in the dictionary. Case-insensitive; always
    /// false for words shorter than 2 characters or before loading.
    pub fn is_valid_word(&self, word: &str) -> bool {
        if word.chars().count() < 2 {
            return false;
        }
        let inner = self.inner.read();
        inner.loaded && inner.words.contains(&word.to_lowercase())
    }

    /// All dictionary-valid contiguous substrings of length >= 2 within a
    /// line of cells. Empty cells break words.
    pub fn find_all_substring_words(&self, letters: &[Option<char>]) -> Vec<FoundWord> {
        let inner = self.inner.read();
        if !inner.loaded {
            return Vec::new();
        }

        let mut results = Vec::new();
        let n = letters.len();
        for start in 0..n {
            for end in (start + 2)..=n {
                let Some(candidate) = collect_word(&letters[start..end]) else {
                    // A gap makes every longer window from this start invalid too.
                    break;
                };
                if inner.words.contains(&candidate.to_lowercase()) {
                    results.push(FoundWord {
                        word: candidate,
                        start,
                        end,
                    });
                }
            }
        }
        results
    }
}

fn collect_word(cells: &[Option<char>]) -> Option<String> {
    cells.iter().copied().collect()
}
