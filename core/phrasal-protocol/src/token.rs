use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Inclusive character range `[start, end]` inside a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} is past its end {end}");
        Self { start, end }
    }

    /// Span covering `len` characters starting at `start`. `len` must be non-zero.
    pub fn from_len(start: usize, len: usize) -> Self {
        Self::new(start, start + len.saturating_sub(1))
    }

    /// Number of characters covered (always at least 1).
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub fn to_pair(self) -> [usize; 2] {
        [self.start, self.end]
    }
}

impl From<Span> for [usize; 2] {
    fn from(span: Span) -> Self {
        span.to_pair()
    }
}

/// A word of tokenized text with its lemma.
///
/// `span` points into the normalized text the token was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Token {
    pub word: String,
    pub lemma: String,
    pub span: Span,
}

impl Token {
    pub fn new(word: impl Into<String>, lemma: impl Into<String>, span: Span) -> Self {
        Self {
            word: word.into(),
            lemma: lemma.into(),
            span,
        }
    }

    pub fn to_tuple(&self) -> (&str, &str, (usize, usize)) {
        (&self.word, &self.lemma, (self.span.start, self.span.end))
    }
}
