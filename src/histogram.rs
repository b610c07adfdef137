//! Persistent word-frequency histogram.
//!
//! The histogram file is a flat JSON object `{"word": count, ...}`. Every
//! [`Histogram::update`] re-applies the ignore-list and the minimum length to
//! the whole mapping, so tightening either rule prunes old entries on the next
//! update.

use crate::config::Config;
use crate::error::Result;
use crate::splitter::WordSplitter;
use crate::storage;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Word → occurrence count
pub type WordCounts = BTreeMap<String, u64>;

/// Tokenize `text`, lower-case each token and count occurrences.
pub fn count_words(splitter: &dyn WordSplitter, text: &str) -> WordCounts {
    let mut counts = WordCounts::new();
    for word in splitter.split(text) {
        let count = counts.entry(word.to_lowercase()).or_insert(0);
        *count = count.saturating_add(1);
    }
    counts
}

#[derive(Debug, Clone)]
pub struct Histogram {
    counts: WordCounts,
    path: PathBuf,
    ignores: BTreeSet<String>,
    min_length: usize,
}

impl Histogram {
    /// Empty histogram bound to `config`'s file and filtering rules.
    pub fn new(config: &Config) -> Result<Histogram> {
        Ok(Histogram {
            counts: WordCounts::new(),
            path: config.hist_path()?,
            ignores: config.ignores.clone(),
            min_length: config.min_length,
        })
    }

    /// Read the histogram from `config.hist_file`; a missing file is empty.
    pub fn load(config: &Config) -> Result<Histogram> {
        let mut histogram = Histogram::new(config)?;
        if let Some(counts) = storage::read_json(&histogram.path)? {
            histogram.counts = counts;
        }
        debug!(
            path = %histogram.path.display(),
            words = histogram.counts.len(),
            "loaded histogram"
        );
        Ok(histogram)
    }

    /// Merge `counts` additively, then drop ignored and too-short words.
    pub fn update(&mut self, counts: WordCounts) -> &mut Self {
        for (word, count) in counts {
            let total = self.counts.entry(word).or_insert(0);
            *total = total.saturating_add(count);
        }

        for word in &self.ignores {
            self.counts.remove(word);
        }

        let min_length = self.min_length;
        self.counts.retain(|word, _| word.chars().count() >= min_length);
        self
    }

    /// Overwrite the histogram file with the current mapping.
    pub fn save(&self) -> Result<()> {
        storage::write_json(&self.path, &self.counts, false)?;
        debug!(
            path = %self.path.display(),
            words = self.counts.len(),
            "saved histogram"
        );
        Ok(())
    }

    pub fn counts(&self) -> &WordCounts {
        &self.counts
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `limit` most frequent words, highest count first. Equal counts
    /// keep alphabetical order. `None` returns every word.
    pub fn most_common(&self, limit: Option<usize>) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }

    /// Sum of all counts, capped at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |sum, count| sum.saturating_add(*count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::DefaultSplitter;
    use std::fs;

    fn config_in(dir: &Path, ignores: &[&str], min_length: usize) -> Config {
        Config {
            ignores: ignores.iter().map(|s| s.to_string()).collect(),
            hist_file: dir.join("counts.json").to_string_lossy().into_owned(),
            min_length,
            ..Config::default()
        }
    }

    fn counts(items: &[(&str, u64)]) -> WordCounts {
        items.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_count_words_lowercases() {
        let counted = count_words(&DefaultSplitter, "The cat saw THE dog. the end 42");
        assert_eq!(
            counted,
            counts(&[("the", 3), ("cat", 1), ("saw", 1), ("dog", 1), ("end", 1)])
        );
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let histogram = Histogram::load(&config_in(dir.path(), &[], 0)).unwrap();
        assert!(histogram.counts().is_empty());
        assert_eq!(histogram.total(), 0);
    }

    #[test]
    fn test_merge_is_additive() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), &[], 0);

        let mut twice = Histogram::new(&config).unwrap();
        twice.update(counts(&[("a", 2)])).update(counts(&[("a", 3)]));

        let mut once = Histogram::new(&config).unwrap();
        once.update(counts(&[("a", 5)]));

        assert_eq!(twice.counts(), once.counts());
        assert_eq!(twice.counts()["a"], 5);
    }

    #[test]
    fn test_update_filters_new_and_existing_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.json");
        fs::write(&path, r#"{"cat": 4, "elephant": 1, "the": 9, "zebra": 2}"#).unwrap();

        let config = config_in(dir.path(), &["zebra"], 4);
        let mut histogram = Histogram::load(&config).unwrap();
        assert_eq!(histogram.counts().len(), 4);

        histogram.update(counts(&[("dog", 1), ("giraffe", 2), ("zebra", 1)]));
        assert_eq!(histogram.counts(), &counts(&[("elephant", 1), ("giraffe", 2)]));
        for word in histogram.counts().keys() {
            assert!(word.chars().count() >= 4);
            assert!(!config.ignores.contains(word));
        }
    }

    #[test]
    fn test_min_length_counts_characters_not_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut histogram = Histogram::new(&config_in(dir.path(), &[], 4)).unwrap();
        histogram.update(counts(&[("日本語", 1), ("ことば", 1)]));
        assert!(histogram.counts().is_empty());

        histogram.update(counts(&[("こんにちは", 1)]));
        assert_eq!(histogram.counts().len(), 1);
    }

    #[test]
    fn test_ignores_match_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let mut histogram = Histogram::new(&config_in(dir.path(), &["Paris"], 0)).unwrap();
        histogram.update(counts(&[("paris", 1)]));
        assert_eq!(histogram.counts()["paris"], 1);
    }

    #[test]
    fn test_update_with_empty_counts_still_filters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.json");
        fs::write(&path, r#"{"word": 1, "longerword": 1}"#).unwrap();

        let mut histogram = Histogram::load(&config_in(dir.path(), &["word"], 0)).unwrap();
        histogram.update(WordCounts::new());
        assert_eq!(histogram.counts(), &counts(&[("longerword", 1)]));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), &[], 0);
        let mut histogram = Histogram::load(&config).unwrap();
        histogram.update(counts(&[("apple", 3), ("banana", 1)]));
        histogram.save().unwrap();

        let reloaded = Histogram::load(&config).unwrap();
        assert_eq!(reloaded.counts(), histogram.counts());
        assert_eq!(reloaded.path(), dir.path().join("counts.json"));
    }

    #[test]
    fn test_saved_file_is_flat_object() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), &[], 0);
        let mut histogram = Histogram::new(&config).unwrap();
        histogram.update(counts(&[("apple", 3)]));
        histogram.save().unwrap();

        let raw = fs::read_to_string(dir.path().join("counts.json")).unwrap();
        assert_eq!(raw, r#"{"apple":3}"#);
    }

    #[test]
    fn test_most_common_order_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut histogram = Histogram::new(&config_in(dir.path(), &[], 0)).unwrap();
        histogram.update(counts(&[("pear", 2), ("apple", 5), ("fig", 2), ("kiwi", 1)]));

        assert_eq!(
            histogram.most_common(None),
            vec![("apple", 5), ("fig", 2), ("pear", 2), ("kiwi", 1)]
        );
        assert_eq!(histogram.most_common(Some(2)), vec![("apple", 5), ("fig", 2)]);
        assert!(histogram.most_common(Some(0)).is_empty());
        assert_eq!(histogram.total(), 10);
    }

    #[test]
    fn test_update_saturates_at_max_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut histogram = Histogram::new(&config_in(dir.path(), &[], 0)).unwrap();
        histogram.update(counts(&[("apple", u64::MAX), ("pear", 1)]));
        histogram.update(counts(&[("apple", 5), ("pear", 1)]));

        assert_eq!(histogram.counts()["apple"], u64::MAX);
        assert_eq!(histogram.counts()["pear"], 2);
        assert_eq!(histogram.total(), u64::MAX);
    }
}
