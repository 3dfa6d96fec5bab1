//! Traits for source-language front-ends.

use crate::tree::SyntaxTree;
use std::path::Path;

/// Error that can occur when turning source text into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to load {language} grammar: {message}")]
    Grammar { language: String, message: String },

    #[error("failed to parse {file}")]
    Failed { file: String },

    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// How a front-end wants to receive its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Name and contents are handed over directly.
    #[default]
    Contents,
    /// The contents must exist as a real file on disk.
    File,
}

/// A front-end parses source text into a [`SyntaxTree`].
pub trait FrontEnd: Send + Sync {
    /// Language identifier (e.g., "typescript").
    fn language(&self) -> &'static str;

    /// File extensions this front-end handles (e.g., &["ts", "tsx"]).
    fn extensions(&self) -> &'static [&'static str];

    /// Which form of input [`FrontEnd::parse`] or [`FrontEnd::parse_file`] expects.
    fn input_mode(&self) -> InputMode {
        InputMode::Contents
    }

    /// Parse in-memory contents. `file_name` is only used for attribution.
    fn parse(&self, file_name: &str, contents: &str) -> Result<SyntaxTree, ParseError>;

    /// Parse a file on disk, attributing the tree to `file_name`.
    fn parse_file(&self, file_name: &str, path: &Path) -> Result<SyntaxTree, ParseError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            file: path.display().to_string(),
            source,
        })?;
        self.parse(file_name, &contents)
    }
}
