//! Word tokenization for the histogram.
//!
//! Tokenizers are chosen per language through a [`SplitterRegistry`]. Every
//! language currently resolves to [`DefaultSplitter`]; a language-specific
//! splitter only has to be registered to take over, callers keep asking the
//! registry by tag.

use crate::lang::base_language;
use std::collections::HashMap;
use std::sync::Arc;

/// Splits text into word tokens.
///
/// The returned iterator borrows `text` and is lazy; calling `split` again
/// starts over.
pub trait WordSplitter: Send + Sync {
    fn split<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a>;
}

/// Every non-alphanumeric character separates words; purely numeric runs are
/// dropped since they carry no vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSplitter;

impl WordSplitter for DefaultSplitter {
    fn split<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(
            text.split(|c: char| !c.is_alphanumeric())
                .filter(|word| !word.is_empty() && !word.chars().all(char::is_numeric)),
        )
    }
}

/// Language tag → splitter lookup.
///
/// Tags are matched on their base language, case-insensitively, so `EN-US`
/// and `en` share a splitter. Unknown tags get the fallback.
#[derive(Clone)]
pub struct SplitterRegistry {
    by_lang: HashMap<String, Arc<dyn WordSplitter>>,
    fallback: Arc<dyn WordSplitter>,
}

impl Default for SplitterRegistry {
    fn default() -> Self {
        SplitterRegistry {
            by_lang: HashMap::new(),
            fallback: Arc::new(DefaultSplitter),
        }
    }
}

impl std::fmt::Debug for SplitterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut langs: Vec<&String> = self.by_lang.keys().collect();
        langs.sort();
        f.debug_struct("SplitterRegistry")
            .field("languages", &langs)
            .finish()
    }
}

impl SplitterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(lang: &str) -> String {
        base_language(lang).to_uppercase()
    }

    /// Use `splitter` for `lang` and all its regional variants.
    pub fn register(&mut self, lang: &str, splitter: Arc<dyn WordSplitter>) -> &mut Self {
        self.by_lang.insert(Self::key(lang), splitter);
        self
    }

    pub fn get(&self, lang: &str) -> &dyn WordSplitter {
        self.by_lang
            .get(&Self::key(lang))
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    pub fn split<'a>(&self, lang: &str, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        self.get(lang).split(text)
    }
}

/// Split with the splitter the default registry picks for `lang`.
pub fn split<'a>(lang: &str, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
    SplitterRegistry::default().split(lang, text)
}
