//! Machine Translation trait and utilities
//!
//! This module defines the `MachineTranslator` trait for provider abstraction,
//! so the word-accounting pipeline never depends on a concrete backend
//! (DeepL, mock, ...).
//!
//! # Example
//!
//! ```ignore
//! use deepler::mt::{DeepLProvider, MachineTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DeepLProvider::from_env()?;
//!     let translation = provider.translate("Hello, world!", Some("EN"), "JA").await?;
//!     println!("{}", translation.result_text);
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use async_trait::async_trait;

/// Output of a single translation call.
///
/// Languages are the ones the provider actually used, which differ from the
/// request when the source language was auto-detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub source_lang: String,
    pub target_lang: String,
    pub source_text: String,
    pub result_text: String,
}

/// Generic trait for machine translation providers
///
/// Implementations of this trait handle the actual translation work,
/// whether through an API (DeepL) or deterministic logic (Mock).
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate `text` into `target_lang`
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_lang` - Source language code, `None` to let the provider detect it
    /// * `target_lang` - Target language code (e.g., "JA", "EN-US")
    ///
    /// # Returns
    ///
    /// * `Ok(Translation)` - The translated text with the resolved languages
    /// * `Err(MtError)` - If translation fails
    async fn translate(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: &str,
    ) -> MtResult<Translation>;

    /// Get the name of this translation provider
    ///
    /// Used for logging to identify which provider handled a translation.
    fn provider_name(&self) -> &str;
}

/// Validate that a language code is in acceptable format
///
/// Checks that the code is non-empty and contains only ASCII letters,
/// digits and hyphens (`EN`, `EN-US`, `ZH-HANS`).
///
/// # Example
///
/// ```ignore
/// validate_locale("EN-US")?; // OK
/// validate_locale("invalid@code").unwrap_err(); // Error
/// ```
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale(
            "Locale code is empty".to_string(),
        ));
    }

    if !locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}
