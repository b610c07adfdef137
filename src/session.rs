//! One translate-and-record operation.
//!
//! The session calls the translator once, picks the side of the translation
//! to count, and performs a single read-modify-write of the histogram. A
//! failed translation returns before the histogram is touched.

use crate::config::Config;
use crate::error::Result;
use crate::histogram::{Histogram, WordCounts, count_words};
use crate::lang::base_language;
use crate::mt::{MachineTranslator, Translation};
use crate::splitter::SplitterRegistry;
use std::path::PathBuf;
use tracing::{debug, info};

/// Which text of a translation was tokenized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountTarget {
    /// The text the user typed
    Source,
    /// The translation
    Result,
}

/// Input of [`TranslationSession::translate`]
#[derive(Debug, Clone, Default)]
pub struct SessionRequest {
    pub text: String,
    /// Empty lets the provider detect the language
    pub source_lang: String,
    pub target_lang: String,
    pub count_lang: String,
    /// `None` uses the default config location
    pub config_file: Option<PathBuf>,
}

/// A translation together with what it contributed to the histogram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedTranslation {
    pub translation: Translation,
    pub count_target: CountTarget,
    /// Language whose splitter produced `counts`
    pub count_lang: String,
    /// Words of this call, before filtering
    pub counts: WordCounts,
    /// Histogram after merge and filtering
    pub total_counts: WordCounts,
}

impl std::ops::Deref for CountedTranslation {
    type Target = Translation;

    fn deref(&self) -> &Translation {
        &self.translation
    }
}

/// Decide which side to count and in which language.
///
/// The translation is counted only when the base of the target language
/// equals `count_lang`. Otherwise the source text is counted in the source
/// language, whatever `count_lang` asked for.
pub fn choose_count_side<'a>(
    translation: &'a Translation,
    count_lang: &'a str,
) -> (CountTarget, &'a str, &'a str) {
    if base_language(&translation.target_lang).eq_ignore_ascii_case(count_lang) {
        (CountTarget::Result, count_lang, translation.result_text.as_str())
    } else {
        (
            CountTarget::Source,
            translation.source_lang.as_str(),
            translation.source_text.as_str(),
        )
    }
}

pub struct TranslationSession<'t, T: MachineTranslator + ?Sized> {
    translator: &'t T,
    splitters: SplitterRegistry,
}

impl<'t, T: MachineTranslator + ?Sized> TranslationSession<'t, T> {
    pub fn new(translator: &'t T) -> Self {
        TranslationSession {
            translator,
            splitters: SplitterRegistry::default(),
        }
    }

    pub fn with_splitters(mut self, splitters: SplitterRegistry) -> Self {
        self.splitters = splitters;
        self
    }

    pub async fn translate(&self, request: &SessionRequest) -> Result<CountedTranslation> {
        let source_lang = Some(request.source_lang.as_str()).filter(|s| !s.is_empty());
        let translation = self
            .translator
            .translate(&request.text, source_lang, &request.target_lang)
            .await?;
        debug!(
            provider = self.translator.provider_name(),
            source = %translation.source_lang,
            target = %translation.target_lang,
            "translated"
        );

        let (count_target, count_lang, text) = choose_count_side(&translation, &request.count_lang);
        debug!(?count_target, count_lang, "counting words");
        let counts = count_words(self.splitters.get(count_lang), text);
        let count_lang = count_lang.to_string();

        let config = Config::load(request.config_file.as_deref())?;
        let mut histogram = Histogram::load(&config)?;
        histogram.update(counts.clone());
        histogram.save()?;
        info!(
            new_words = counts.len(),
            histogram_words = histogram.counts().len(),
            "histogram updated"
        );

        Ok(CountedTranslation {
            translation,
            count_target,
            count_lang,
            counts,
            total_counts: histogram.counts().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeeplerError;
    use crate::mt::{MockMode, MockTranslator, MtError};
    use std::collections::HashMap;
    use std::path::Path;

    fn setup(dir: &Path, min_length: usize) -> PathBuf {
        let config_file = dir.join("config.json");
        Config {
            hist_file: dir.join("counts.json").to_string_lossy().into_owned(),
            min_length,
            ..Config::default()
        }
        .save(Some(&config_file))
        .unwrap();
        config_file
    }

    fn mock_ja() -> MockTranslator {
        let mut map = HashMap::new();
        map.insert(
            ("Good morning, good friends".to_string(), "JA".to_string()),
            "おはよう 友達 友達".to_string(),
        );
        MockTranslator::new(MockMode::Mappings(map))
    }

    fn request(config_file: PathBuf, count_lang: &str) -> SessionRequest {
        SessionRequest {
            text: "Good morning, good friends".to_string(),
            source_lang: "EN".to_string(),
            target_lang: "JA".to_string(),
            count_lang: count_lang.to_string(),
            config_file: Some(config_file),
        }
    }

    #[test]
    fn test_choose_count_side_target_match() {
        let translation = Translation {
            source_lang: "EN".to_string(),
            target_lang: "EN-US".to_string(),
            source_text: "Hallo".to_string(),
            result_text: "Hello".to_string(),
        };
        assert_eq!(
            choose_count_side(&translation, "en"),
            (CountTarget::Result, "en", "Hello")
        );
    }

    #[test]
    fn test_choose_count_side_falls_back_to_source_language() {
        let translation = Translation {
            source_lang: "DE".to_string(),
            target_lang: "JA".to_string(),
            source_text: "Hallo".to_string(),
            result_text: "こんにちは".to_string(),
        };
        // FR names neither side, the source is still counted as DE
        assert_eq!(
            choose_count_side(&translation, "FR"),
            (CountTarget::Source, "DE", "Hallo")
        );
    }

    #[tokio::test]
    async fn test_count_lang_not_target_counts_source() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = setup(dir.path(), 0);
        let mock = mock_ja();

        let result = TranslationSession::new(&mock)
            .translate(&request(config_file, "EN"))
            .await
            .unwrap();

        assert_eq!(result.count_target, CountTarget::Source);
        assert_eq!(result.count_lang, "EN");
        assert_eq!(result.counts["good"], 2);
        assert_eq!(result.counts["morning"], 1);
        assert_eq!(result.counts["friends"], 1);
        assert_eq!(result.result_text, "おはよう 友達 友達");
    }

    #[tokio::test]
    async fn test_count_lang_equal_to_target_counts_translation() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = setup(dir.path(), 0);
        let mock = mock_ja();

        let result = TranslationSession::new(&mock)
            .translate(&request(config_file, "JA"))
            .await
            .unwrap();

        assert_eq!(result.count_target, CountTarget::Result);
        assert_eq!(result.count_lang, "JA");
        assert_eq!(result.counts["友達"], 2);
        assert_eq!(result.counts["おはよう"], 1);
        assert!(!result.counts.contains_key("good"));
    }

    #[tokio::test]
    async fn test_histogram_accumulates_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = setup(dir.path(), 5);
        let mock = mock_ja();
        let session = TranslationSession::new(&mock);

        session.translate(&request(config_file.clone(), "EN")).await.unwrap();
        let second = session.translate(&request(config_file.clone(), "EN")).await.unwrap();

        // "good" has 4 chars and is filtered from the histogram but not from the call counts
        assert_eq!(second.counts["good"], 2);
        assert!(!second.total_counts.contains_key("good"));
        assert_eq!(second.total_counts["morning"], 2);
        assert_eq!(second.total_counts["friends"], 2);

        let config = Config::load(Some(&config_file)).unwrap();
        let on_disk = Histogram::load(&config).unwrap();
        assert_eq!(on_disk.counts(), &second.total_counts);
    }

    #[tokio::test]
    async fn test_failed_translation_leaves_histogram_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = setup(dir.path(), 0);
        let mock = MockTranslator::new(MockMode::Error(MtError::Auth("bad key".to_string())));

        let result = TranslationSession::new(&mock)
            .translate(&request(config_file, "EN"))
            .await;

        assert!(matches!(result, Err(DeeplerError::Translation(MtError::Auth(_)))));
        assert!(!dir.path().join("counts.json").exists());
    }

    #[tokio::test]
    async fn test_auto_detected_source_used_for_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = setup(dir.path(), 0);
        let mock = MockTranslator::new(MockMode::Suffix).detecting("DE");

        let mut req = request(config_file, "EN");
        req.text = "Guten Morgen".to_string();
        req.source_lang = String::new();

        let result = TranslationSession::new(&mock).translate(&req).await.unwrap();
        assert_eq!(result.source_lang, "DE");
        assert_eq!(result.count_target, CountTarget::Source);
        assert_eq!(result.count_lang, "DE");
        assert_eq!(result.counts["guten"], 1);
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = setup(dir.path(), 0);
        let mock = mock_ja();
        let translator: &dyn MachineTranslator = &mock;

        let result = TranslationSession::new(translator)
            .translate(&request(config_file, "JA"))
            .await
            .unwrap();
        assert_eq!(result.count_target, CountTarget::Result);
        assert_eq!(mock.calls(), 1);
    }
}
