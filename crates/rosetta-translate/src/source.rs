//! Where sample text comes from.

use crate::error::TranslateError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// File name used for literal sources without a hint.
pub const DEFAULT_FILE_NAME: &str = "index.ts";

/// Scoped access to a unit of source text, by contents or as a file on disk.
pub trait Source {
    /// Name diagnostics refer to.
    fn name(&self) -> &str;

    fn with_contents<A>(&self, f: impl FnOnce(&str, &str) -> A) -> Result<A, TranslateError>;

    /// Call `f` with a path at which the source exists for the duration of
    /// the call.
    fn with_file<A>(&self, f: impl FnOnce(&str, &Path) -> A) -> Result<A, TranslateError>;
}

/// A source file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn with_contents<A>(&self, f: impl FnOnce(&str, &str) -> A) -> Result<A, TranslateError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| TranslateError::Io {
            name: self.name.clone(),
            source,
        })?;
        Ok(f(&self.name, &contents))
    }

    fn with_file<A>(&self, f: impl FnOnce(&str, &Path) -> A) -> Result<A, TranslateError> {
        Ok(f(&self.name, &self.path))
    }
}

/// In-memory source text with a file name hint.
#[derive(Debug, Clone)]
pub struct LiteralSource {
    source: String,
    name: String,
}

impl LiteralSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_name(source, DEFAULT_FILE_NAME)
    }

    pub fn with_name(source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.source
    }
}

impl Source for LiteralSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn with_contents<A>(&self, f: impl FnOnce(&str, &str) -> A) -> Result<A, TranslateError> {
        Ok(f(&self.name, &self.source))
    }

    /// Materializes the text in a fresh temporary directory, removed when the
    /// call returns.
    fn with_file<A>(&self, f: impl FnOnce(&str, &Path) -> A) -> Result<A, TranslateError> {
        let io_error = |source| TranslateError::Io {
            name: self.name.clone(),
            source,
        };

        let dir = tempfile::TempDir::new().map_err(io_error)?;
        let file_name = Path::new(&self.name)
            .file_name()
            .unwrap_or(OsStr::new(DEFAULT_FILE_NAME));
        let path = dir.path().join(file_name);
        std::fs::write(&path, &self.source).map_err(io_error)?;

        Ok(f(&self.name, &path))
    }
}
