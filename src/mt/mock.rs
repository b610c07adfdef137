//! Mock Machine Translator for testing
//!
//! A deterministic, API-free translator for exercising the translate-and-count
//! pipeline without an auth key or network access.
//!
//! # Example
//!
//! ```ignore
//! use deepler::mt::{MachineTranslator, MockMode, MockTranslator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", Some("EN"), "JA").await.unwrap();
//!     assert_eq!(result.result_text, "hello_ja");
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, Translation};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the lower-cased target: "hello" → "hello_ja"
    Suffix,

    /// Use predefined mappings for realistic translations
    /// (text, target_lang) → translation, falling back to `Suffix`
    Mappings(HashMap<(String, String), String>),

    /// Simulate provider errors
    Error(MtError),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    /// Language reported when the caller asks for auto-detection
    detected_lang: String,
    calls: AtomicUsize,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            detected_lang: "EN".to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Report `lang` as the detected source language
    pub fn detecting(mut self, lang: &str) -> Self {
        self.detected_lang = lang.to_uppercase();
        self
    }

    /// Number of `translate` calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn apply_translation(&self, text: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target.to_lowercase())),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_uppercase());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target.to_lowercase())))
            }
            MockMode::Error(err) => Err(err.clone()),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: &str,
    ) -> MtResult<Translation> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let result_text = self.apply_translation(text, target_lang)?;
        let source_lang = match source_lang.filter(|s| !s.is_empty()) {
            Some(source) => source.to_uppercase(),
            None => self.detected_lang.clone(),
        };

        Ok(Translation {
            source_lang,
            target_lang: target_lang.to_uppercase(),
            source_text: text.to_string(),
            result_text,
        })
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
