use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::anychar,
    combinator::map,
    IResult,
};

/// What a piece of text is, as far as tokenization cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Run of letters/digits.
    Word,
    /// Currency, math and similar signs that still count as tokens.
    Symbol,
    Punctuation,
    Quote,
    Bracket,
}

impl FragmentKind {
    /// Punctuation, quotes and brackets never reach the lemmatizer.
    pub fn is_token(self) -> bool {
        matches!(self, FragmentKind::Word | FragmentKind::Symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    /// Offset in characters, not bytes.
    pub char_start: usize,
    pub kind: FragmentKind,
}

/// Letters, digits and combining marks (stress accents and the like).
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || ('\u{0300}'..='\u{036F}').contains(&c)
}

fn classify(c: char) -> FragmentKind {
    match c {
        '"' | '\'' | '`' | '«' | '»' | '„' | '“' | '”' | '‘' | '’' | '‚' | '‹' | '›' => {
            FragmentKind::Quote
        }
        '(' | ')' | '[' | ']' | '{' | '}' | '⟨' | '⟩' => FragmentKind::Bracket,
        '$' | '€' | '£' | '¥' | '₽' | '%' | '+' | '=' | '<' | '>' | '^' | '|' | '~' | '№'
        | '°' | '§' | '©' | '®' => FragmentKind::Symbol,
        _ => FragmentKind::Punctuation,
    }
}

#[derive(Debug, Clone, Copy)]
enum Raw {
    Word,
    Other(char),
}

fn raw_fragment(input: &str) -> IResult<&str, Raw> {
    alt((map(take_while1(is_word_char), |_| Raw::Word), map(anychar, Raw::Other)))(input)
}

/// Split text into words, symbols and punctuation with character offsets.
/// Whitespace is skipped and never produces a fragment.
pub fn segment(original_input: &str) -> Vec<Fragment<'_>> {
    let mut input = original_input;
    let mut char_pos = 0;
    let mut result = Vec::new();

    loop {
        // 1. Skip whitespace (any Unicode whitespace, not just ASCII)
        let (next_input, skipped) =
            match take_while::<_, &str, nom::error::Error<&str>>(char::is_whitespace)(input) {
                Ok(res) => res,
                Err(_) => break,
            };
        char_pos += skipped.chars().count();
        input = next_input;

        if input.is_empty() {
            break;
        }

        // 2. Take one fragment
        let (next_input, raw) = match raw_fragment(input) {
            Ok(res) => res,
            Err(_) => break,
        };

        let consumed = &input[..input.len() - next_input.len()];
        let kind = match raw {
            Raw::Word => FragmentKind::Word,
            Raw::Other(c) => classify(c),
        };

        result.push(Fragment {
            text: consumed,
            char_start: char_pos,
            kind,
        });

        char_pos += consumed.chars().count();
        input = next_input;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(&str, usize, FragmentKind)> {
        segment(text)
            .into_iter()
            .map(|f| (f.text, f.char_start, f.kind))
            .collect()
    }

    #[test]
    fn test_char_offsets_not_bytes() {
        let fragments = kinds("Мама обожает апельсины");
        assert_eq!(
            fragments,
            vec![
                ("Мама", 0, FragmentKind::Word),
                ("обожает", 5, FragmentKind::Word),
                ("апельсины", 13, FragmentKind::Word),
            ]
        );
    }

    #[test]
    fn test_punctuation_classes() {
        let fragments = kinds("а, -- [он], «захочет»?! $5");
        let tokens: Vec<&str> = fragments
            .iter()
            .filter(|(_, _, k)| k.is_token())
            .map(|(t, _, _)| *t)
            .collect();
        assert_eq!(tokens, vec!["а", "он", "захочет", "$", "5"]);

        assert!(fragments.contains(&("[", 6, FragmentKind::Bracket)));
        assert!(fragments.contains(&("«", 12, FragmentKind::Quote)));
        assert!(fragments.contains(&("-", 3, FragmentKind::Punctuation)));
    }

    #[test]
    fn test_unicode_whitespace() {
        let fragments = kinds("a\u{00A0}b\n\tc");
        assert_eq!(
            fragments,
            vec![
                ("a", 0, FragmentKind::Word),
                ("b", 2, FragmentKind::Word),
                ("c", 5, FragmentKind::Word),
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert!(segment("").is_empty());
        assert!(segment("   ").is_empty());
    }
}
