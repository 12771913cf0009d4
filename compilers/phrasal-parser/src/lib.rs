pub mod matcher;
pub mod normalizer;
pub mod segmenter;

use phrasal_morph::Lemmatizer;
use phrasal_protocol::{Span, Token};

use crate::segmenter::segment;

pub use matcher::find_sublist_indexes;
pub use normalizer::{normalize, LanguageProfile, NormalizedText};

pub struct Tokenizer<'a> {
    lemmatizer: &'a dyn Lemmatizer,
}

impl<'a> Tokenizer<'a> {
    pub fn new(lemmatizer: &'a dyn Lemmatizer) -> Self {
        Self { lemmatizer }
    }

    /// Primary entry point: normalized text -> lemmatized tokens.
    ///
    /// Punctuation, quotes, brackets and whitespace are dropped. Spans are
    /// inclusive character offsets into `input`.
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        segment(input)
            .into_iter()
            .filter(|fragment| fragment.kind.is_token())
            .map(|fragment| {
                let span = Span::from_len(fragment.char_start, fragment.text.chars().count());
                Token::new(fragment.text, self.lemmatizer.lemmatize(fragment.text), span)
            })
            .collect()
    }

    /// Lemmas only, in text order.
    pub fn lemmatize(&self, input: &str) -> Vec<String> {
        self.tokenize(input).into_iter().map(|t| t.lemma).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phrasal_morph::{LexiconLemmatizer, RuleTransliterator};
    use phrasal_protocol::Lexicon;

    fn russian() -> LexiconLemmatizer {
        LexiconLemmatizer::new(
            &Lexicon::empty("ru")
                .with_form("обожает", "обожать")
                .with_form("апельсины", "апельсин")
                .with_form("любому", "любой")
                .with_form("захочет", "захотеть"),
        )
    }

    #[test]
    fn test_tokenizer_integration() {
        let lemmatizer = russian();
        let tokenizer = Tokenizer::new(&lemmatizer);
        let tokens = tokenizer.tokenize("Мама обожает апельсины");

        let tuples: Vec<_> = tokens.iter().map(|t| t.to_tuple()).collect();
        assert_eq!(
            tuples,
            vec![
                ("Мама", "мама", (0, 3)),
                ("обожает", "обожать", (5, 11)),
                ("апельсины", "апельсин", (13, 21)),
            ]
        );
    }

    #[test]
    fn test_punctuation_is_not_tokenized() {
        let lemmatizer = russian();
        let tokenizer = Tokenizer::new(&lemmatizer);
        assert_eq!(
            tokenizer.lemmatize("а, -- [он], захочет?!"),
            vec!["а", "он", "захотеть"]
        );
    }

    #[test]
    fn test_normalized_hyphen_word() {
        let lemmatizer = russian();
        let translit = RuleTransliterator::for_language("ru").unwrap();
        let normalized = normalize("по-любому", LanguageProfile::CYRILLIC, Some(&translit));

        let tokens = Tokenizer::new(&lemmatizer).tokenize(normalized.as_str());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].lemma, "любой");
        assert_eq!(tokens[0].span, Span::new(3, 8));
        assert_eq!(normalized.original_span(tokens[0].span), Some(Span::new(3, 8)));
    }

    #[test]
    fn test_spans_ascend() {
        let lemmatizer = LexiconLemmatizer::empty("en");
        let tokens = Tokenizer::new(&lemmatizer).tokenize("one, two (three) «four»");
        let starts: Vec<usize> = tokens.iter().map(|t| t.span.start).collect();
        assert_eq!(starts, vec![0, 5, 10, 18]);
        for pair in tokens.windows(2) {
            assert!(pair[0].span.end < pair[1].span.start);
        }
    }
}
