//! Small lexicons and resource sets shared by the unit tests.

use std::sync::Arc;

use phrasal_parser::LanguageProfile;
use phrasal_protocol::{Lexicon, SuffixRule};

use crate::detect::LanguageDetector;
use crate::finder::PhraseFinder;
use crate::resources::{LanguageResources, LexiconSource, ResourcesBuilder};

pub(crate) fn russian_lexicon() -> Lexicon {
    Lexicon::empty("ru")
        .with_form("апельсины", "апельсин")
        .with_form("обожает", "обожать")
        .with_form("любому", "любой")
        .with_form("захочет", "захотеть")
        .with_form("любит", "любить")
        .with_form("бананы", "банан")
        .with_form("банану", "банан")
        .with_form("кораллы", "коралл")
        .with_form("украла", "украсть")
        .with_form("маме", "мама")
        .with_form("папе", "папа")
}

pub(crate) fn english_lexicon() -> Lexicon {
    Lexicon::empty("en")
        .with_form("stunned", "stun")
        .with_form("is", "be")
        .with_rule(SuffixRule::new("s", "", 3))
}

/// Always reports the same language, regardless of the text.
pub(crate) struct FixedDetector(pub Option<&'static str>);

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str) -> Option<String> {
        self.0.map(str::to_string)
    }
}

fn builder() -> ResourcesBuilder {
    LanguageResources::builder("en")
        .language(
            "en",
            LanguageProfile::PASSTHROUGH,
            LexiconSource::Inline(english_lexicon()),
        )
        .language(
            "ru",
            LanguageProfile::CYRILLIC,
            LexiconSource::Inline(russian_lexicon()),
        )
}

pub(crate) fn resources() -> LanguageResources {
    builder().build().unwrap()
}

pub(crate) fn resources_detecting(language: &'static str) -> LanguageResources {
    builder()
        .detector(Arc::new(FixedDetector(Some(language))))
        .build()
        .unwrap()
}

pub(crate) fn resources_detecting_nothing() -> LanguageResources {
    builder()
        .detector(Arc::new(FixedDetector(None)))
        .build()
        .unwrap()
}

pub(crate) fn finder() -> PhraseFinder {
    PhraseFinder::new(Arc::new(resources()))
}

pub(crate) fn finder_detecting(language: &'static str) -> PhraseFinder {
    PhraseFinder::new(Arc::new(resources_detecting(language)))
}
