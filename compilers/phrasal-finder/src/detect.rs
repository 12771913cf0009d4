//! Language detection and ISO 639 helpers.

use std::fmt;

use whatlang::{Detector, Lang};

/// Classifies arbitrary text into a language code.
pub trait LanguageDetector: Send + Sync {
    /// ISO 639-1 code of the text's language, or `None` when the text is
    /// too short or ambiguous to call.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Trigram-based detection backed by `whatlang`, restricted to an
/// allowlist so short texts are not attributed to a close neighbour
/// (Belarusian or Serbian for Russian, say).
pub struct WhatlangDetector {
    detector: Detector,
    allowlist: Vec<Lang>,
}

impl WhatlangDetector {
    /// Any language `whatlang` knows.
    pub fn new() -> Self {
        Self {
            detector: Detector::new(),
            allowlist: Vec::new(),
        }
    }

    /// Only the given ISO 639-1 (or 639-3) codes. Codes `whatlang` cannot
    /// detect are ignored; if none remain, detection is unrestricted.
    pub fn for_languages<S: AsRef<str>>(codes: &[S]) -> Self {
        let allowlist: Vec<Lang> = codes
            .iter()
            .filter_map(|code| to_whatlang(code.as_ref()))
            .collect();
        if allowlist.is_empty() {
            return Self::new();
        }
        Self {
            detector: Detector::with_allowlist(allowlist.clone()),
            allowlist,
        }
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WhatlangDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.allowlist.iter().map(|lang| lang.code()).collect();
        f.debug_struct("WhatlangDetector").field("allowlist", &codes).finish()
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = self.detector.detect(text)?;
        let code = info.lang().code();
        Some(iso639_1(code).unwrap_or(code).to_string())
    }
}

fn to_whatlang(code: &str) -> Option<Lang> {
    let three = LANGUAGES
        .iter()
        .find(|(_, two, _)| *two == code)
        .map(|(three, _, _)| *three)
        .unwrap_or(code);
    Lang::from_code(three)
}

/// Code returned when detection cannot decide ("undetermined" in ISO 639-2).
pub const UNDETERMINED: &str = "und";

// (ISO 639-3, ISO 639-1, English name)
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("afr", "af", "Afrikaans"),
    ("ara", "ar", "Arabic"),
    ("aze", "az", "Azerbaijani"),
    ("bel", "be", "Belarusian"),
    ("ben", "bn", "Bengali"),
    ("bul", "bg", "Bulgarian"),
    ("cat", "ca", "Catalan"),
    ("ces", "cs", "Czech"),
    ("cmn", "zh", "Chinese"),
    ("dan", "da", "Danish"),
    ("deu", "de", "German"),
    ("ell", "el", "Greek"),
    ("eng", "en", "English"),
    ("epo", "eo", "Esperanto"),
    ("est", "et", "Estonian"),
    ("fin", "fi", "Finnish"),
    ("fra", "fr", "French"),
    ("heb", "he", "Hebrew"),
    ("hin", "hi", "Hindi"),
    ("hrv", "hr", "Croatian"),
    ("hun", "hu", "Hungarian"),
    ("hye", "hy", "Armenian"),
    ("ind", "id", "Indonesian"),
    ("ita", "it", "Italian"),
    ("jpn", "ja", "Japanese"),
    ("kat", "ka", "Georgian"),
    ("kor", "ko", "Korean"),
    ("lat", "la", "Latin"),
    ("lav", "lv", "Latvian"),
    ("lit", "lt", "Lithuanian"),
    ("mkd", "mk", "Macedonian"),
    ("nld", "nl", "Dutch"),
    ("nob", "nb", "Norwegian Bokmål"),
    ("pes", "fa", "Persian"),
    ("pol", "pl", "Polish"),
    ("por", "pt", "Portuguese"),
    ("ron", "ro", "Romanian"),
    ("rus", "ru", "Russian"),
    ("slk", "sk", "Slovak"),
    ("slv", "sl", "Slovenian"),
    ("spa", "es", "Spanish"),
    ("srp", "sr", "Serbian"),
    ("swe", "sv", "Swedish"),
    ("tha", "th", "Thai"),
    ("tur", "tr", "Turkish"),
    ("ukr", "uk", "Ukrainian"),
    ("uzb", "uz", "Uzbek"),
    ("vie", "vi", "Vietnamese"),
];

/// Two-letter code for a three-letter one, if the language has one.
pub fn iso639_1(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(three, _, _)| *three == code)
        .map(|(_, two, _)| *two)
}

/// English name of a language code (either ISO 639-1 or 639-3), or "Unknown".
pub fn language_name(code: &str) -> &'static str {
    LANGUAGES
        .iter()
        .find(|(three, two, _)| *two == code || *three == code)
        .map(|(_, _, name)| *name)
        .unwrap_or("Unknown")
}
