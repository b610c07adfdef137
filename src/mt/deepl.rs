//! DeepL API provider for machine translation
//!
//! This module integrates with the DeepL REST API v2.
//!
//! # Authentication
//!
//! The provider loads the auth key from the `DEEPL_AUTH_KEY` environment
//! variable or takes it explicitly. Keys of the free plan end in `:fx` and are
//! routed to `api-free.deepl.com`, all other keys to `api.deepl.com`.
//!
//! # Example
//!
//! ```ignore
//! use deepler::mt::{DeepLProvider, MachineTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DeepLProvider::from_env()?;
//!     let translation = provider.translate("Hello, world!", None, "JA").await?;
//!     println!("{} ({})", translation.result_text, translation.source_lang);
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, Translation, validate_locale};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::str::FromStr;
use tracing::debug;

/// Environment variable holding the DeepL auth key
pub const DEEPL_AUTH_KEY: &str = "DEEPL_AUTH_KEY";

const FREE_API_URL: &str = "https://api-free.deepl.com/v2";
const PRO_API_URL: &str = "https://api.deepl.com/v2";

/// Whether the translation should lean towards formal or informal language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formality {
    Less,
    More,
}

impl Formality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Formality::Less => "less",
            Formality::More => "more",
        }
    }
}

impl FromStr for Formality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "less" => Ok(Formality::Less),
            "more" => Ok(Formality::More),
            other => Err(format!("unknown formality '{}', expected less or more", other)),
        }
    }
}

/// How DeepL splits the input into sentences before translating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSentences {
    /// `0`: treat the whole input as one sentence
    Off,
    /// `1`: split on punctuation and newlines
    On,
    /// `nonewlines`: split on punctuation only
    NoNewlines,
}

impl SplitSentences {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitSentences::Off => "0",
            SplitSentences::On => "1",
            SplitSentences::NoNewlines => "nonewlines",
        }
    }
}

impl FromStr for SplitSentences {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "0" => Ok(SplitSentences::Off),
            "1" => Ok(SplitSentences::On),
            "nonewlines" => Ok(SplitSentences::NoNewlines),
            other => Err(format!(
                "unknown split-sentences value '{}', expected 0, 1 or nonewlines",
                other
            )),
        }
    }
}

/// Provider-specific request flags. Unset fields are left out of the request
/// so DeepL applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    pub formality: Option<Formality>,
    pub preserve_formatting: bool,
    pub split_sentences: Option<SplitSentences>,
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    detected_source_language: String,
    text: String,
}

/// DeepL API v2 provider
#[derive(Clone)]
pub struct DeepLProvider {
    /// Auth key sent in the `Authorization` header
    auth_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL, `/translate` is appended per request
    base_url: String,
    options: TranslateOptions,
}

impl DeepLProvider {
    /// DeepL rejects request bodies above 128 KiB
    const MAX_REQUEST_BYTES: usize = 128 * 1024;

    /// Create a new DeepLProvider with an explicit auth key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If the key is empty or HTTP client creation fails
    pub fn new(auth_key: String) -> MtResult<Self> {
        let auth_key = auth_key.trim().to_string();
        if auth_key.is_empty() {
            return Err(MtError::Auth("auth key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = Self::base_url_for_key(&auth_key).to_string();
        Ok(Self {
            auth_key,
            client,
            base_url,
            options: TranslateOptions::default(),
        })
    }

    /// Create a DeepLProvider from the `DEEPL_AUTH_KEY` environment variable
    pub fn from_env() -> MtResult<Self> {
        Self::from_env_var(DEEPL_AUTH_KEY)
    }

    fn from_env_var(name: &str) -> MtResult<Self> {
        let auth_key = std::env::var(name)
            .map_err(|_| MtError::Auth(format!("{} environment variable not set", name)))?;

        Self::new(auth_key)
    }

    pub fn with_options(mut self, options: TranslateOptions) -> Self {
        self.options = options;
        self
    }

    /// Point the provider at another endpoint (a proxy or a local test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn base_url_for_key(auth_key: &str) -> &'static str {
        if auth_key.ends_with(":fx") {
            FREE_API_URL
        } else {
            PRO_API_URL
        }
    }

    /// Build the JSON body for `/v2/translate`
    fn request_body(&self, text: &str, source_lang: Option<&str>, target_lang: &str) -> Value {
        let mut body = Map::new();
        body.insert("text".to_string(), json!([text]));
        body.insert("target_lang".to_string(), json!(target_lang.to_uppercase()));
        if let Some(source) = source_lang {
            body.insert("source_lang".to_string(), json!(source.to_uppercase()));
        }
        if let Some(formality) = self.options.formality {
            body.insert("formality".to_string(), json!(formality.as_str()));
        }
        if self.options.preserve_formatting {
            body.insert("preserve_formatting".to_string(), json!(true));
        }
        if let Some(split) = self.options.split_sentences {
            body.insert("split_sentences".to_string(), json!(split.as_str()));
        }
        Value::Object(body)
    }

    /// Map a non-success HTTP status to the matching error kind
    fn error_for_status(status: u16, body: &str) -> MtError {
        match status {
            401 | 403 => {
                MtError::Auth(format!("DeepL rejected the auth key ({}): {}", status, body))
            }
            456 => MtError::QuotaExceeded(format!("DeepL quota exceeded: {}", body)),
            429 => MtError::RateLimited(format!("DeepL rate limit hit: {}", body)),
            400 if body.to_lowercase().contains("lang") => {
                MtError::InvalidLocale(format!("DeepL rejected the language pair: {}", body))
            }
            _ => MtError::Translation(format!("DeepL API error ({}): {}", status, body)),
        }
    }

    /// Pull the first translation out of a parsed response
    fn into_translation(
        response: DeepLResponse,
        text: &str,
        source_lang: Option<&str>,
        target_lang: &str,
    ) -> MtResult<Translation> {
        let first = response.translations.into_iter().next().ok_or_else(|| {
            MtError::Translation("Invalid API response: empty 'translations' array".to_string())
        })?;

        let source_lang = match source_lang {
            Some(source) => source.to_uppercase(),
            None => first.detected_source_language.to_uppercase(),
        };

        Ok(Translation {
            source_lang,
            target_lang: target_lang.to_uppercase(),
            source_text: text.to_string(),
            result_text: first.text,
        })
    }
}

impl std::fmt::Debug for DeepLProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLProvider")
            .field("auth_key", &"***")
            .field("base_url", &self.base_url)
            .field("options", &self.options)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for DeepLProvider {
    async fn translate(
        &self,
        text: &str,
        source_lang: Option<&str>,
        target_lang: &str,
    ) -> MtResult<Translation> {
        let source_lang = source_lang.filter(|s| !s.is_empty());
        if let Some(source) = source_lang {
            validate_locale(source)?;
        }
        validate_locale(target_lang)?;

        if text.is_empty() {
            return Ok(Translation {
                source_lang: source_lang.unwrap_or_default().to_uppercase(),
                target_lang: target_lang.to_uppercase(),
                source_text: String::new(),
                result_text: String::new(),
            });
        }

        if text.len() > Self::MAX_REQUEST_BYTES {
            return Err(MtError::Translation(format!(
                "Text exceeds maximum request size of {} bytes",
                Self::MAX_REQUEST_BYTES
            )));
        }

        let url = format!("{}/translate", self.base_url);
        let body = self.request_body(text, source_lang, target_lang);
        debug!(%url, target_lang, ?source_lang, "sending DeepL request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.auth_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Self::error_for_status(status.as_u16(), &error_text));
        }

        let parsed: DeepLResponse = response.json().await.map_err(|e| {
            MtError::Translation(format!("Failed to parse API response: {}", e))
        })?;

        Self::into_translation(parsed, text, source_lang, target_lang)
    }

    fn provider_name(&self) -> &str {
        "DeepL"
    }
}
