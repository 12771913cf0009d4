//! Phrase search over lemmatized text.
//!
//! ```text
//! text ──► normalize ──► tokenize/lemmatize ──► sublist match ──► original spans
//!           (translit,     (per-language         (per phrase)
//!            hyphens)       lemmatizer)
//! ```
//!
//! [`PhraseFinder`] is the entry point; [`LanguageResources`] owns the
//! per-language lemmatizers and loads them on first use.

pub mod config;
pub mod detect;
pub mod error;
pub mod finder;
pub mod highlight;
pub mod resources;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::{FinderConfig, LanguageConfig};
pub use detect::{language_name, LanguageDetector, WhatlangDetector};
pub use error::{FinderError, FinderResult};
pub use finder::{FindRequest, PhraseFinder, PhraseMatches};
pub use highlight::highlight;
pub use resources::{
    Analysis, LanguagePipeline, LanguageResources, LemmatizerLoader, LexiconSource,
    ResourcesBuilder,
};

// Re-exported so callers need only this crate for the common types
pub use phrasal_parser::LanguageProfile;
pub use phrasal_protocol::{Span, Token};
