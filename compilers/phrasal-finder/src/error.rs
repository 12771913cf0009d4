use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinderError {
    /// The language is not configured (or could not be detected as a configured one).
    #[error("Unknown language: {language}. Please use one of: {}.", .known.join(", "))]
    UnknownLanguage { language: String, known: Vec<String> },

    /// The language is configured but its resources failed to load.
    #[error("failed to initialize language {language}: {reason}")]
    ResourceInitialization { language: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type FinderResult<T> = Result<T, FinderError>;
