use rkyv::{Archive, Deserialize, Serialize};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One inflected form and the headword it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct WordForm {
    pub form: String,
    pub lemma: String,
}

impl WordForm {
    pub fn new(form: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            lemma: lemma.into(),
        }
    }
}

/// Fallback inflection rule: a word ending in `suffix` whose stem keeps at
/// least `min_stem` characters lemmatizes to `stem + replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SuffixRule {
    pub suffix: String,
    pub replacement: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_stem: u32,
}

impl SuffixRule {
    pub fn new(suffix: impl Into<String>, replacement: impl Into<String>, min_stem: u32) -> Self {
        Self {
            suffix: suffix.into(),
            replacement: replacement.into(),
            min_stem,
        }
    }
}

/// Word-form table for one language. Authored as JSON, shipped as an rkyv archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub language: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub forms: Vec<WordForm>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<SuffixRule>,
}

impl Lexicon {
    /// A lexicon with no forms and no rules: every word is its own lemma.
    pub fn empty(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    pub fn with_form(mut self, form: impl Into<String>, lemma: impl Into<String>) -> Self {
        self.forms.push(WordForm::new(form, lemma));
        self
    }

    pub fn with_rule(mut self, rule: SuffixRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty() && self.rules.is_empty()
    }
}
