use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use phrasal_parser::LanguageProfile;
use serde::{Deserialize, Serialize};

use crate::error::{FinderError, FinderResult};

/// Per-language settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    #[serde(default)]
    pub transliterate: bool,
    #[serde(default)]
    pub split_hyphens: bool,
    /// Compiled (rkyv) lexicon. Without one the language lemmatizes to lowercase words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon: Option<PathBuf>,
}

impl LanguageConfig {
    pub fn profile(&self) -> LanguageProfile {
        LanguageProfile {
            transliterate: self.transliterate,
            split_hyphens: self.split_hyphens,
        }
    }
}

/// Top-level configuration, usually read from `phrasal.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinderConfig {
    /// Language whose pipeline runs language detection.
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageConfig>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for FinderConfig {
    fn default() -> Self {
        let mut languages = BTreeMap::new();
        languages.insert("en".to_string(), LanguageConfig::default());
        languages.insert(
            "ru".to_string(),
            LanguageConfig {
                transliterate: true,
                split_hyphens: true,
                lexicon: None,
            },
        );
        Self {
            default_language: default_language(),
            languages,
        }
    }
}

impl FinderConfig {
    pub fn from_toml_str(input: &str) -> FinderResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| FinderError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. Relative lexicon paths are resolved against the
    /// file's directory.
    pub fn from_file(path: &Path) -> FinderResult<Self> {
        let input = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&input)?;

        if let Some(base) = path.parent() {
            for language in config.languages.values_mut() {
                if let Some(lexicon) = language.lexicon.as_mut() {
                    if lexicon.is_relative() {
                        *lexicon = base.join(&*lexicon);
                    }
                }
            }
        }

        Ok(config)
    }

    pub fn validate(&self) -> FinderResult<()> {
        if self.languages.is_empty() {
            return Err(FinderError::Config("no languages configured".to_string()));
        }
        if !self.languages.contains_key(&self.default_language) {
            return Err(FinderError::Config(format!(
                "default language {} is not configured",
                self.default_language
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = FinderConfig::default();
        config.validate().unwrap();
        assert_eq!(config.languages.keys().collect::<Vec<_>>(), vec!["en", "ru"]);
        assert_eq!(config.languages["ru"].profile(), LanguageProfile::CYRILLIC);
        assert!(config.languages["en"].profile().is_passthrough());
    }

    #[test]
    fn test_parse_toml() {
        let config = FinderConfig::from_toml_str(
            r#"
            default_language = "ru"

            [languages.ru]
            transliterate = true
            split_hyphens = true
            lexicon = "/srv/lexicons/ru.rkyv"

            [languages.en]
            "#,
        )
        .unwrap();

        assert_eq!(config.default_language, "ru");
        assert_eq!(
            config.languages["ru"].lexicon.as_deref(),
            Some(Path::new("/srv/lexicons/ru.rkyv"))
        );
        assert_eq!(config.languages["en"], LanguageConfig::default());
    }

    #[test]
    fn test_default_language_must_be_configured() {
        let err = FinderConfig::from_toml_str("default_language = \"de\"\n[languages.en]\n")
            .unwrap_err();
        assert!(matches!(err, FinderError::Config(_)));
    }

    #[test]
    fn test_relative_lexicon_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phrasal.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[languages.en]\nlexicon = \"lexicons/en.rkyv\"").unwrap();

        let config = FinderConfig::from_file(&path).unwrap();
        assert_eq!(
            config.languages["en"].lexicon.as_deref(),
            Some(dir.path().join("lexicons/en.rkyv").as_path())
        );
    }
}
