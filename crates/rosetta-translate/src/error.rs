//! Error types for translation and configuration.

use rosetta_syntax::ParseError;
use std::path::PathBuf;

/// Error that aborts the translation of one unit.
///
/// Unsupported syntax is never an error: it is reported as a diagnostic and
/// translation continues. These variants cover what cannot be recovered from.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A construct exists in the source but has no representation in the
    /// target language.
    #[error("{file}:{line}:{column}: {message}")]
    Irrepresentable {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to access {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown target language: {0}")]
    UnknownLanguage(String),

    #[error("no front-end for {0}")]
    NoFrontEnd(String),
}

impl TranslateError {
    /// True for errors raised by a visitor rather than a collaborator.
    pub fn is_irrepresentable(&self) -> bool {
        matches!(self, TranslateError::Irrepresentable { .. })
    }
}

/// Error loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
