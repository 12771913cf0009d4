pub mod translit;

use std::collections::{HashMap, HashSet};

use phrasal_protocol::{Lexicon, SuffixRule};
use rkyv::{AlignedVec, Archived};
use thiserror::Error;

pub use translit::{Rewrite, RuleTransliterator, Transliterator};

#[derive(Debug, Error)]
pub enum MorphError {
    #[error("no transliteration rules for language {language} (known: {})", .known.join(", "))]
    NoTransliteration { language: String, known: Vec<String> },

    #[error("invalid lexicon: {0}")]
    InvalidLexicon(String),
}

/// Maps a surface word to its dictionary form for one language.
pub trait Lemmatizer: Send + Sync {
    fn language(&self) -> &str;

    /// Lemma of a single word. Implementations lowercase their output.
    fn lemmatize(&self, word: &str) -> String;
}

/// Lexicon-backed lemmatizer: exact form lookup first, then suffix rules,
/// then the lowercased word itself.
#[derive(Debug, Clone)]
pub struct LexiconLemmatizer {
    language: String,
    forms: HashMap<String, String>,
    lemmas: HashSet<String>,
    // Longest suffix first
    rules: Vec<SuffixRule>,
}

impl LexiconLemmatizer {
    pub fn new(lexicon: &Lexicon) -> Self {
        let mut lemmatizer = Self::empty(&lexicon.language);
        for entry in &lexicon.forms {
            lemmatizer.insert_form(&entry.form, &entry.lemma);
        }
        lemmatizer.rules = lexicon.rules.clone();
        lemmatizer.sort_rules();
        lemmatizer
    }

    /// Build straight from a validated archive without deserializing the lexicon.
    pub fn from_archived(lexicon: &Archived<Lexicon>) -> Self {
        let mut lemmatizer = Self::empty(lexicon.language.as_str());
        for entry in lexicon.forms.iter() {
            lemmatizer.insert_form(entry.form.as_str(), entry.lemma.as_str());
        }
        lemmatizer.rules = lexicon
            .rules
            .iter()
            .map(|rule| SuffixRule::new(rule.suffix.as_str(), rule.replacement.as_str(), rule.min_stem))
            .collect();
        lemmatizer.sort_rules();
        lemmatizer
    }

    /// Validate an rkyv archive and build a lemmatizer from it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MorphError> {
        // Archives must be read from an aligned buffer.
        let mut aligned = AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        let archived = rkyv::check_archived_root::<Lexicon>(&aligned)
            .map_err(|e| MorphError::InvalidLexicon(e.to_string()))?;
        Ok(Self::from_archived(archived))
    }

    pub fn empty(language: &str) -> Self {
        Self {
            language: language.to_string(),
            forms: HashMap::new(),
            lemmas: HashSet::new(),
            rules: Vec::new(),
        }
    }

    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    fn insert_form(&mut self, form: &str, lemma: &str) {
        let lemma = lemma.to_lowercase();
        self.lemmas.insert(lemma.clone());
        self.forms.insert(form.to_lowercase(), lemma);
    }

    fn sort_rules(&mut self) {
        // Stable, so rules of equal length keep their authored order
        self.rules
            .sort_by(|a, b| b.suffix.chars().count().cmp(&a.suffix.chars().count()));
    }
}

impl Lemmatizer for LexiconLemmatizer {
    fn language(&self) -> &str {
        &self.language
    }

    fn lemmatize(&self, word: &str) -> String {
        let lower = word.to_lowercase();

        if let Some(lemma) = self.forms.get(&lower) {
            return lemma.clone();
        }

        // Known headwords are fixed points; rules must not reinflect them.
        if self.lemmas.contains(&lower) {
            return lower;
        }

        self.rules
            .iter()
            .find_map(|rule| apply_rule(rule, &lower))
            .unwrap_or(lower)
    }
}

/// Rewrite `word` with `rule` if its suffix matches and the stem is long enough.
pub fn apply_rule(rule: &SuffixRule, word: &str) -> Option<String> {
    let stem = word.strip_suffix(rule.suffix.as_str())?;
    if stem.chars().count() < rule.min_stem as usize {
        return None;
    }
    Some(format!("{}{}", stem, rule.replacement))
}

/// Serialize a lexicon into the rkyv archive format read by [`LexiconLemmatizer::from_bytes`].
pub fn compile(lexicon: &Lexicon) -> Result<AlignedVec, MorphError> {
    rkyv::to_bytes::<_, 1024>(lexicon).map_err(|e| MorphError::InvalidLexicon(e.to_string()))
}
