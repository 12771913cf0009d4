//! Latin-keyboard spellings to native script.

use crate::MorphError;

/// One step of a transliteration: `consumed` input characters became `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub consumed: usize,
    pub output: String,
}

pub trait Transliterator: Send + Sync {
    fn language(&self) -> &str;

    /// Rewrites every ASCII letter in `input`, and an apostrophe right after one;
    /// other characters pass through one to one.
    /// The `consumed` counts always add up to the character length of `input`.
    fn rewrite(&self, input: &str) -> Vec<Rewrite>;

    fn transliterate(&self, input: &str) -> String {
        self.rewrite(input).into_iter().map(|r| r.output).collect()
    }
}

// Longest source first.
const RU_RULES: &[(&str, &str)] = &[
    ("shch", "щ"),
    ("sch", "щ"),
    ("zh", "ж"),
    ("kh", "х"),
    ("ts", "ц"),
    ("ch", "ч"),
    ("sh", "ш"),
    ("yu", "ю"),
    ("ju", "ю"),
    ("ya", "я"),
    ("ja", "я"),
    ("yo", "ё"),
    ("jo", "ё"),
    ("a", "а"),
    ("b", "б"),
    ("c", "ц"),
    ("d", "д"),
    ("e", "е"),
    ("f", "ф"),
    ("g", "г"),
    ("h", "х"),
    ("i", "и"),
    ("j", "й"),
    ("k", "к"),
    ("l", "л"),
    ("m", "м"),
    ("n", "н"),
    ("o", "о"),
    ("p", "п"),
    ("q", "к"),
    ("r", "р"),
    ("s", "с"),
    ("t", "т"),
    ("u", "у"),
    ("v", "в"),
    ("w", "в"),
    ("x", "кс"),
    ("y", "ы"),
    ("z", "з"),
    ("'", "ь"),
];

/// Table-driven transliterator with greedy longest-match rules.
#[derive(Debug, Clone)]
pub struct RuleTransliterator {
    language: &'static str,
    rules: &'static [(&'static str, &'static str)],
    max_source: usize,
}

impl RuleTransliterator {
    /// Languages that ship with a rule table.
    pub const KNOWN_LANGUAGES: &'static [&'static str] = &["ru"];

    pub fn for_language(language: &str) -> Result<Self, MorphError> {
        let (language, rules) = match language {
            "ru" => ("ru", RU_RULES),
            other => {
                return Err(MorphError::NoTransliteration {
                    language: other.to_string(),
                    known: Self::KNOWN_LANGUAGES.iter().map(|l| l.to_string()).collect(),
                })
            }
        };
        let max_source = rules.iter().map(|(from, _)| from.len()).max().unwrap_or(1);
        Ok(Self {
            language,
            rules,
            max_source,
        })
    }

    fn lookup(&self, chunk: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|(from, _)| from.eq_ignore_ascii_case(chunk))
            .map(|(_, to)| *to)
    }
}

impl Transliterator for RuleTransliterator {
    fn language(&self) -> &str {
        self.language
    }

    fn rewrite(&self, input: &str) -> Vec<Rewrite> {
        let chars: Vec<char> = input.chars().collect();
        let mut out = Vec::with_capacity(chars.len());
        let mut i = 0;

        while i < chars.len() {
            if !is_latin(&chars, i) {
                out.push(Rewrite {
                    consumed: 1,
                    output: chars[i].to_string(),
                });
                i += 1;
                continue;
            }

            // Rule sources are ASCII, so a char window is also a byte window.
            let run = chars[i..]
                .iter()
                .take(self.max_source)
                .take_while(|&&c| c.is_ascii_alphabetic() || c == '\'')
                .count();

            let hit = (1..=run).rev().find_map(|len| {
                let chunk: String = chars[i..i + len].iter().collect();
                self.lookup(&chunk).map(|to| (len, to))
            });

            match hit {
                Some((len, to)) => {
                    let output = if chars[i].is_ascii_uppercase() {
                        capitalize(to)
                    } else {
                        to.to_string()
                    };
                    out.push(Rewrite { consumed: len, output });
                    i += len;
                }
                None => {
                    out.push(Rewrite {
                        consumed: 1,
                        output: chars[i].to_string(),
                    });
                    i += 1;
                }
            }
        }

        out
    }
}

/// ASCII letters, plus an apostrophe right after one (the soft sign in
/// "mal'chik"). Any other apostrophe is a quote and passes through.
fn is_latin(chars: &[char], i: usize) -> bool {
    match chars[i] {
        '\'' => i > 0 && chars[i - 1].is_ascii_alphabetic(),
        c => c.is_ascii_alphabetic(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ru() -> RuleTransliterator {
        RuleTransliterator::for_language("ru").unwrap()
    }

    #[test]
    fn test_translit_ru() {
        assert_eq!(ru().transliterate("banan"), "банан");
        assert_eq!(ru().transliterate("bananu"), "банану");
    }

    #[test]
    fn test_digraphs_and_case() {
        assert_eq!(ru().transliterate("Zhuk"), "Жук");
        assert_eq!(ru().transliterate("shchi"), "щи");
        assert_eq!(ru().transliterate("Sasha"), "Саша");
    }

    #[test]
    fn test_apostrophe_soft_sign() {
        assert_eq!(ru().transliterate("mal'chik"), "мальчик");
        assert_eq!(ru().transliterate("mat'"), "мать");
        // Opening quotes stay quotes
        assert_eq!(ru().transliterate("'banan"), "'банан");
        assert_eq!(ru().transliterate("мама 'papa"), "мама 'папа");
    }

    #[test]
    fn test_non_latin_untouched() {
        assert_eq!(ru().transliterate("мама, papa!"), "мама, папа!");
    }

    #[test]
    fn test_rewrite_reports_consumed() {
        let rewrites = ru().rewrite("zhx");
        assert_eq!(
            rewrites,
            vec![
                Rewrite { consumed: 2, output: "ж".into() },
                Rewrite { consumed: 1, output: "кс".into() },
            ]
        );
    }

    #[test]
    fn test_unknown_language() {
        let err = RuleTransliterator::for_language("de").unwrap_err();
        assert_eq!(
            err.to_string(),
            "no transliteration rules for language de (known: ru)"
        );
    }

    proptest! {
        #[test]
        fn test_consumed_covers_input(input in "[a-zA-Z ,.-]{0,40}") {
            let total: usize = ru().rewrite(&input).iter().map(|r| r.consumed).sum();
            prop_assert_eq!(total, input.chars().count());
        }

        #[test]
        fn test_no_latin_left(input in "[a-zA-Z]{1,40}") {
            let out = ru().transliterate(&input);
            prop_assert!(!out.chars().any(|c| c.is_ascii_alphabetic()));
        }
    }
}
