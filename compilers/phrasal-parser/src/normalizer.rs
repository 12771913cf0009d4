//! Language-specific preprocessing that runs before tokenization.
//!
//! Normalization never loses track of where a character came from: every
//! character of the output remembers the inclusive range of input
//! characters it was produced from, so token spans can be mapped back to
//! the caller's text exactly.

use phrasal_morph::Transliterator;
use phrasal_protocol::Span;
use tracing::debug;

/// Which preprocessing steps a language needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageProfile {
    /// Rewrite Latin-keyboard spellings into the native script.
    pub transliterate: bool,
    /// Keep only the last segment of hyphenated words.
    pub split_hyphens: bool,
}

impl LanguageProfile {
    pub const PASSTHROUGH: Self = Self {
        transliterate: false,
        split_hyphens: false,
    };

    pub const CYRILLIC: Self = Self {
        transliterate: true,
        split_hyphens: true,
    };

    pub fn is_passthrough(&self) -> bool {
        !self.transliterate && !self.split_hyphens
    }
}

/// Text ready for tokenization plus the origin of each of its characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    origins: Vec<Span>,
}

impl NormalizedText {
    /// No preprocessing: every character maps to itself.
    pub fn identity(text: &str) -> Self {
        let origins = (0..text.chars().count()).map(|i| Span::new(i, i)).collect();
        Self {
            text: text.to_string(),
            origins,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Character length of the normalized text.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Map a span of the normalized text back onto the original text.
    pub fn original_span(&self, span: Span) -> Option<Span> {
        let first = self.origins.get(span.start)?;
        let last = self.origins.get(span.end)?;
        Some(Span::new(first.start, last.end))
    }

    fn from_parts(chars: Vec<char>, origins: Vec<Span>) -> Self {
        debug_assert_eq!(chars.len(), origins.len());
        Self {
            text: chars.into_iter().collect(),
            origins,
        }
    }
}

/// Run the preprocessing steps of `profile` over `text`.
///
/// `transliterator` is consulted only when the profile asks for
/// transliteration; resolving it (and failing for languages without rules)
/// is the caller's job.
pub fn normalize(
    text: &str,
    profile: LanguageProfile,
    transliterator: Option<&dyn Transliterator>,
) -> NormalizedText {
    if profile.is_passthrough() {
        return NormalizedText::identity(text);
    }

    let (mut chars, origins) = match (profile.transliterate, transliterator) {
        (true, Some(translit)) => transliterate(text, translit),
        _ => {
            let chars: Vec<char> = text.chars().collect();
            let origins = (0..chars.len()).map(|i| Span::new(i, i)).collect();
            (chars, origins)
        }
    };

    if profile.split_hyphens {
        split_hyphens(&mut chars);
    }

    let normalized = NormalizedText::from_parts(chars, origins);
    debug!(input = text, output = normalized.as_str(), "normalized text");
    normalized
}

fn transliterate(text: &str, translit: &dyn Transliterator) -> (Vec<char>, Vec<Span>) {
    let mut chars = Vec::with_capacity(text.len());
    let mut origins = Vec::with_capacity(text.len());
    let mut pos = 0;

    for rewrite in translit.rewrite(text) {
        let origin = Span::from_len(pos, rewrite.consumed);
        for c in rewrite.output.chars() {
            chars.push(c);
            origins.push(origin);
        }
        pos += rewrite.consumed;
    }

    (chars, origins)
}

/// Blank out everything up to and including the last hyphen of each
/// hyphenated word. Words made only of hyphens are left alone.
///
/// Only the final segment survives, so "по-любому" tokenizes as "любому".
/// Earlier segments are dropped from lemmatization entirely.
pub fn split_hyphens(chars: &mut [char]) {
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        let word = &mut chars[start..i];

        if word.iter().all(|&c| c == '-') {
            continue;
        }
        if let Some(last_hyphen) = word.iter().rposition(|&c| c == '-') {
            word[..=last_hyphen].fill(' ');
        }
    }
}
