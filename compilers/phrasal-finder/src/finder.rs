use std::sync::Arc;

use indexmap::IndexMap;
use phrasal_parser::find_sublist_indexes;
use phrasal_protocol::{Span, Token};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FinderConfig;
use crate::error::{FinderError, FinderResult};
use crate::resources::LanguageResources;

/// Phrase (as given by the caller) -> inclusive `[start, end]` character
/// spans in the original text, in the order they occur. Phrases keep the
/// order of the request.
pub type PhraseMatches = IndexMap<String, Vec<[usize; 2]>>;

/// Library-level request: the text, the phrases to look for and,
/// optionally, the language of both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindRequest {
    pub text: String,
    pub phrases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl FindRequest {
    /// Parse a JSON request. Wrong shapes (a number where a phrase should
    /// be, a missing `text`, ...) are rejected, never coerced.
    pub fn from_json(input: &str) -> FinderResult<Self> {
        serde_json::from_str(input).map_err(|e| FinderError::InvalidRequest(e.to_string()))
    }
}

/// Finds known phrases in text regardless of inflection, Latin-keyboard
/// spelling and hyphenated prefixes.
#[derive(Debug, Clone)]
pub struct PhraseFinder {
    resources: Arc<LanguageResources>,
}

impl PhraseFinder {
    pub fn new(resources: Arc<LanguageResources>) -> Self {
        Self { resources }
    }

    pub fn from_config(config: &FinderConfig) -> FinderResult<Self> {
        Ok(Self::new(Arc::new(LanguageResources::from_config(config)?)))
    }

    pub fn resources(&self) -> &LanguageResources {
        &self.resources
    }

    /// ISO 639-1 code of the text's language. May name a language that is
    /// not configured.
    pub fn detect_language(&self, text: &str) -> String {
        self.resources.detect_language(text)
    }

    /// Lemmas of `text` in order, after normalization.
    pub fn lemmatize(&self, text: &str, language: &str) -> FinderResult<Vec<String>> {
        Ok(self.tokenize(text, language)?.into_iter().map(|t| t.lemma).collect())
    }

    /// Tokens of `text`. Spans refer to the normalized text.
    pub fn tokenize(&self, text: &str, language: &str) -> FinderResult<Vec<Token>> {
        Ok(self.resources.pipeline(language)?.analyze(text).tokens)
    }

    /// Locate every phrase in `text`.
    ///
    /// Without a `language` the text's language is detected first. Every
    /// phrase gets an entry, empty when it does not occur. A phrase given
    /// twice keeps a single entry, at its first position.
    pub fn find_phrases<S: AsRef<str>>(
        &self,
        text: &str,
        phrases: &[S],
        language: Option<&str>,
    ) -> FinderResult<PhraseMatches> {
        let language = match language {
            Some(language) => language.to_string(),
            None => self.detect_language(text),
        };

        if !self.resources.is_configured(&language) {
            return Err(self.resources.unknown_language(&language));
        }

        let pipeline = self.resources.pipeline(&language)?;
        let analysis = pipeline.analyze(text);
        let lemmas = analysis.lemmas();

        let mut result = PhraseMatches::new();
        for phrase in phrases {
            let phrase = phrase.as_ref();
            let phrase_lemmas: Vec<String> = pipeline
                .analyze(phrase)
                .tokens
                .into_iter()
                .map(|t| t.lemma)
                .collect();
            let phrase_lemmas: Vec<&str> = phrase_lemmas.iter().map(String::as_str).collect();

            let spans: Vec<[usize; 2]> = find_sublist_indexes(&phrase_lemmas, &lemmas)
                .into_iter()
                .filter_map(|index| {
                    let first = &analysis.tokens[index];
                    let last = &analysis.tokens[index + phrase_lemmas.len() - 1];
                    analysis
                        .normalized
                        .original_span(Span::new(first.span.start, last.span.end))
                })
                .map(Span::to_pair)
                .collect();

            debug!(%language, phrase, matches = spans.len(), "matched phrase");
            result.insert(phrase.to_string(), spans);
        }

        Ok(result)
    }

    /// [`find_phrases`](Self::find_phrases) for a parsed request.
    pub fn find(&self, request: &FindRequest) -> FinderResult<PhraseMatches> {
        self.find_phrases(&request.text, request.phrases.as_slice(), request.language.as_deref())
    }
}
