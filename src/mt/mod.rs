/// Machine Translation Module
///
/// The translation collaborator of the word-accounting pipeline. Everything
/// the session needs from a provider goes through the narrow
/// [`MachineTranslator`] trait: text and languages in, a [`Translation`] with
/// the resolved languages out.
///
/// # Overview
///
/// 1. **MT Trait** - `MachineTranslator` and the `Translation` value
/// 2. **DeepL Provider** - the real backend, talking to the DeepL REST API
/// 3. **Mock Provider** - deterministic backend for tests
pub mod deepl;
pub mod error;
pub mod mock;
pub mod translator;

pub use deepl::{DEEPL_AUTH_KEY, DeepLProvider, Formality, SplitSentences, TranslateOptions};
pub use error::{MtError, MtResult};
pub use mock::{MockMode, MockTranslator};
pub use translator::{MachineTranslator, Translation, validate_locale};
