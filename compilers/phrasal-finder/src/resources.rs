//! Language resource provider: resolves a language code to its lemmatizer,
//! transliterator and preprocessing profile, loading them on first use.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use phrasal_morph::{
    Lemmatizer, LexiconLemmatizer, MorphError, RuleTransliterator, Transliterator,
};
use phrasal_parser::{normalize, LanguageProfile, NormalizedText, Tokenizer};
use phrasal_protocol::{Lexicon, Token};
use tracing::{debug, info, warn};

use crate::config::FinderConfig;
use crate::detect::{LanguageDetector, WhatlangDetector, UNDETERMINED};
use crate::error::{FinderError, FinderResult};

/// Loader for a lemmatizer that is only built when its language is first used.
pub type LemmatizerLoader = Arc<dyn Fn() -> Result<Arc<dyn Lemmatizer>, String> + Send + Sync>;

/// Where a language's lemmatizer comes from.
#[derive(Clone)]
pub enum LexiconSource {
    /// No lexicon: words lemmatize to their lowercase form.
    Empty,
    /// Compiled rkyv lexicon on disk.
    File(PathBuf),
    /// Lexicon already in memory.
    Inline(Lexicon),
    /// Ready-made backend.
    Custom(Arc<dyn Lemmatizer>),
    /// Arbitrary one-time initialization (model download, install, ...).
    Lazy(LemmatizerLoader),
}

impl fmt::Debug for LexiconSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexiconSource::Empty => write!(f, "Empty"),
            LexiconSource::File(path) => f.debug_tuple("File").field(path).finish(),
            LexiconSource::Inline(lexicon) => write!(f, "Inline({} forms)", lexicon.forms.len()),
            LexiconSource::Custom(lemmatizer) => write!(f, "Custom({})", lemmatizer.language()),
            LexiconSource::Lazy(_) => write!(f, "Lazy"),
        }
    }
}

impl LexiconSource {
    fn load(&self, language: &str) -> Result<Arc<dyn Lemmatizer>, String> {
        match self {
            LexiconSource::Empty => Ok(Arc::new(LexiconLemmatizer::empty(language))),
            LexiconSource::File(path) => {
                let bytes = fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
                let lemmatizer =
                    LexiconLemmatizer::from_bytes(&bytes).map_err(|e| format!("{}: {}", path.display(), e))?;
                if lemmatizer.language() != language {
                    return Err(format!(
                        "{} holds a {} lexicon",
                        path.display(),
                        lemmatizer.language()
                    ));
                }
                debug!(language, forms = lemmatizer.form_count(), "loaded lexicon file");
                Ok(Arc::new(lemmatizer))
            }
            LexiconSource::Inline(lexicon) => Ok(Arc::new(LexiconLemmatizer::new(lexicon))),
            LexiconSource::Custom(lemmatizer) => Ok(Arc::clone(lemmatizer)),
            LexiconSource::Lazy(loader) => loader(),
        }
    }
}

/// Normalized text together with its tokens.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub normalized: NormalizedText,
    pub tokens: Vec<Token>,
}

impl Analysis {
    pub fn lemmas(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.lemma.as_str()).collect()
    }
}

/// Everything needed to turn text of one language into tokens.
pub struct LanguagePipeline {
    language: String,
    profile: LanguageProfile,
    lemmatizer: Arc<dyn Lemmatizer>,
    transliterator: Option<Arc<dyn Transliterator>>,
}

impl LanguagePipeline {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn profile(&self) -> LanguageProfile {
        self.profile
    }

    pub fn normalize(&self, text: &str) -> NormalizedText {
        normalize(text, self.profile, self.transliterator.as_deref())
    }

    /// Normalize then tokenize. Token spans refer to the normalized text.
    pub fn analyze(&self, text: &str) -> Analysis {
        let normalized = self.normalize(text);
        let tokens = Tokenizer::new(self.lemmatizer.as_ref()).tokenize(normalized.as_str());
        Analysis { normalized, tokens }
    }
}

impl fmt::Debug for LanguagePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguagePipeline")
            .field("language", &self.language)
            .field("profile", &self.profile)
            .field("transliterate", &self.transliterator.is_some())
            .finish()
    }
}

struct LanguageSlot {
    profile: LanguageProfile,
    source: LexiconSource,
    transliterator: Option<Arc<dyn Transliterator>>,
    pipeline: OnceCell<Arc<LanguagePipeline>>,
}

impl LanguageSlot {
    fn new(
        code: &str,
        profile: LanguageProfile,
        source: LexiconSource,
    ) -> FinderResult<Self> {
        let transliterator: Option<Arc<dyn Transliterator>> = if profile.transliterate {
            match RuleTransliterator::for_language(code) {
                Ok(translit) => Some(Arc::new(translit)),
                Err(MorphError::NoTransliteration { language, known }) => {
                    return Err(FinderError::UnknownLanguage { language, known })
                }
                Err(e) => return Err(FinderError::Config(e.to_string())),
            }
        } else {
            None
        };

        Ok(Self {
            profile,
            source,
            transliterator,
            pipeline: OnceCell::new(),
        })
    }

    /// Build the pipeline on first call. Concurrent callers block on the
    /// same cell, so initialization runs at most once. A failed load is
    /// not cached and the next call tries again.
    fn pipeline(&self, code: &str) -> FinderResult<Arc<LanguagePipeline>> {
        self.pipeline
            .get_or_try_init(|| {
                let lemmatizer = self.source.load(code).map_err(|reason| {
                    warn!(language = code, %reason, "failed to initialize language");
                    FinderError::ResourceInitialization {
                        language: code.to_string(),
                        reason,
                    }
                })?;
                info!(language = code, source = ?self.source, "language initialized");
                Ok(Arc::new(LanguagePipeline {
                    language: code.to_string(),
                    profile: self.profile,
                    lemmatizer,
                    transliterator: self.transliterator.clone(),
                }))
            })
            .map(Arc::clone)
    }
}

/// Process-wide table of languages and their lazily built pipelines.
///
/// The table is read-mostly: lookups take a short read lock to clone the
/// slot, and pipeline initialization happens outside the lock.
pub struct LanguageResources {
    default_language: String,
    slots: RwLock<BTreeMap<String, Arc<LanguageSlot>>>,
    detector: RwLock<Arc<dyn LanguageDetector>>,
    // A caller-supplied detector is kept as is when languages change
    custom_detector: bool,
}

impl LanguageResources {
    pub fn builder(default_language: impl Into<String>) -> ResourcesBuilder {
        ResourcesBuilder {
            default_language: default_language.into(),
            languages: Vec::new(),
            detector: None,
        }
    }

    pub fn from_config(config: &FinderConfig) -> FinderResult<Self> {
        config.validate()?;
        let mut builder = Self::builder(config.default_language.clone());
        for (code, language) in &config.languages {
            let source = match &language.lexicon {
                Some(path) => LexiconSource::File(path.clone()),
                None => LexiconSource::Empty,
            };
            builder = builder.language(code.clone(), language.profile(), source);
        }
        builder.build()
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Configured language codes, sorted.
    pub fn languages(&self) -> Vec<String> {
        self.slots.read().keys().cloned().collect()
    }

    pub fn is_configured(&self, language: &str) -> bool {
        self.slots.read().contains_key(language)
    }

    pub fn unknown_language(&self, language: &str) -> FinderError {
        FinderError::UnknownLanguage {
            language: language.to_string(),
            known: self.languages(),
        }
    }

    /// Add (or replace) a language at runtime. Its resources load on first use.
    pub fn register_language(
        &self,
        code: impl Into<String>,
        profile: LanguageProfile,
        source: LexiconSource,
    ) -> FinderResult<()> {
        let code = code.into();
        let slot = LanguageSlot::new(&code, profile, source)?;
        debug!(language = %code, "registered language");
        self.slots.write().insert(code, Arc::new(slot));
        if !self.custom_detector {
            let detector = WhatlangDetector::for_languages(self.languages().as_slice());
            *self.detector.write() = Arc::new(detector);
        }
        Ok(())
    }

    /// Pipeline for `language`, initializing it if this is the first use.
    pub fn pipeline(&self, language: &str) -> FinderResult<Arc<LanguagePipeline>> {
        let slot = self.slots.read().get(language).cloned();
        match slot {
            Some(slot) => slot.pipeline(language),
            None => Err(self.unknown_language(language)),
        }
    }

    /// Initialize every configured language now instead of on first use.
    pub fn warm_up(&self) -> FinderResult<()> {
        for language in self.languages() {
            self.pipeline(&language)?;
        }
        Ok(())
    }

    /// Lemmas of a single word. Hyphenated compounds yield the lemma of
    /// their last segment only.
    pub fn lemmatize_word(&self, word: &str, language: &str) -> FinderResult<Vec<String>> {
        let analysis = self.pipeline(language)?.analyze(word);
        Ok(analysis.tokens.into_iter().map(|t| t.lemma).collect())
    }

    /// Language of `text`. The built-in detector only considers configured
    /// languages; a custom one may name any language.
    pub fn detect_language(&self, text: &str) -> String {
        let detector = Arc::clone(&*self.detector.read());
        let language = detector
            .detect(text)
            .unwrap_or_else(|| UNDETERMINED.to_string());
        debug!(%language, detector = %self.default_language, "detected language");
        language
    }
}

impl fmt::Debug for LanguageResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageResources")
            .field("default_language", &self.default_language)
            .field("languages", &self.languages())
            .finish()
    }
}

pub struct ResourcesBuilder {
    default_language: String,
    languages: Vec<(String, LanguageProfile, LexiconSource)>,
    detector: Option<Arc<dyn LanguageDetector>>,
}

impl ResourcesBuilder {
    pub fn language(
        mut self,
        code: impl Into<String>,
        profile: LanguageProfile,
        source: LexiconSource,
    ) -> Self {
        self.languages.push((code.into(), profile, source));
        self
    }

    /// Replace the default `whatlang` detector, which is limited to the
    /// configured languages.
    pub fn detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn build(self) -> FinderResult<LanguageResources> {
        let mut slots = BTreeMap::new();
        for (code, profile, source) in self.languages {
            let slot = LanguageSlot::new(&code, profile, source)?;
            slots.insert(code, Arc::new(slot));
        }

        if !slots.contains_key(&self.default_language) {
            return Err(FinderError::Config(format!(
                "default language {} is not configured",
                self.default_language
            )));
        }

        let custom_detector = self.detector.is_some();
        let detector = match self.detector {
            Some(detector) => detector,
            None => {
                let codes: Vec<&String> = slots.keys().collect();
                Arc::new(WhatlangDetector::for_languages(codes.as_slice()))
            }
        };

        Ok(LanguageResources {
            default_language: self.default_language,
            slots: RwLock::new(slots),
            detector: RwLock::new(detector),
            custom_detector,
        })
    }
}
