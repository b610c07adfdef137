//! deepler: translate text with DeepL and keep a word-frequency histogram.
//!
//! Each `translate` call tokenizes one side of the translation, merges the
//! word counts into a histogram stored as JSON, and prunes it with the
//! ignore-list and minimum word length from the config.
//!
//! ```ignore
//! use deepler::mt::MockTranslator;
//! use deepler::session::{SessionRequest, TranslationSession};
//!
//! let translator = MockTranslator::new(deepler::mt::MockMode::Suffix);
//! let result = TranslationSession::new(&translator)
//!     .translate(&SessionRequest {
//!         text: "Hello world".to_string(),
//!         source_lang: "EN".to_string(),
//!         target_lang: "JA".to_string(),
//!         count_lang: "EN".to_string(),
//!         config_file: None,
//!     })
//!     .await?;
//! println!("{:?}", result.total_counts);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod histogram;
pub mod lang;
pub mod mt;
pub mod session;
pub mod splitter;
pub mod storage;


pub use config::{Config, ConfigUpdate};
pub use error::{DeeplerError, Result};
pub use histogram::{Histogram, WordCounts};
pub use session::{CountTarget, CountedTranslation, SessionRequest, TranslationSession};
pub use splitter::{DefaultSplitter, SplitterRegistry, WordSplitter};
