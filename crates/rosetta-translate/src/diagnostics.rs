//! Position-anchored translation diagnostics.

use crate::error::TranslateError;
use codespan_reporting::diagnostic::{Diagnostic as Report, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::{self, termcolor::Buffer};
use rosetta_syntax::tree::line_column;
use serde::Serialize;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A message about a specific range of a translated unit.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Name of the unit; the synthetic snippet name inside documents.
    pub file_name: String,
    pub range: Range<usize>,
    /// 1-based line of `range.start`.
    pub line: usize,
    /// 1-based column of `range.start`, in characters.
    pub column: usize,
    #[serde(skip)]
    source: Arc<str>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        file_name: impl Into<String>,
        source: Arc<str>,
        range: Range<usize>,
    ) -> Self {
        let (line, column) = line_column(&source, range.start);
        Self {
            severity,
            message: message.into(),
            file_name: file_name.into(),
            range,
            line,
            column,
            source,
        }
    }

    pub fn error(
        message: impl Into<String>,
        file_name: impl Into<String>,
        source: Arc<str>,
        range: Range<usize>,
    ) -> Self {
        Self::new(Severity::Error, message, file_name, source, range)
    }

    /// Diagnostic for a unit that failed as a whole.
    ///
    /// Irrepresentable constructs keep their reported position; other
    /// failures point at the start of the unit.
    pub fn from_error(file_name: &str, source: Arc<str>, error: &TranslateError) -> Self {
        match error {
            TranslateError::Irrepresentable {
                line,
                column,
                message,
                ..
            } => {
                let start = offset_of(&source, *line, *column);
                Self::error(message.clone(), file_name, source, start..start)
            }
            other => Self::error(other.to_string(), file_name, source, 0..0),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Source text of the unit this diagnostic refers to.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Verbatim text of the offending range.
    pub fn snippet(&self) -> &str {
        self.source.get(self.range.clone()).unwrap_or("")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.file_name, self.line, self.column, self.severity, self.message
        )
    }
}

/// Byte offset of a 1-based line and character column.
fn offset_of(text: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        text.match_indices('\n')
            .nth(line - 2)
            .map_or(text.len(), |(i, _)| i + 1)
    };
    text[line_start..]
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(text.len(), |(i, _)| line_start + i)
}

pub fn is_error_diagnostic(diagnostic: &Diagnostic) -> bool {
    diagnostic.is_error()
}

/// True if any diagnostic should make the caller fail.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(is_error_diagnostic)
}

/// Render diagnostics as human-readable reports with source excerpts.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let config = term::Config::default();
    let mut out = String::new();

    for diagnostic in diagnostics {
        let mut files = SimpleFiles::new();
        let file_id = files.add(diagnostic.file_name.as_str(), diagnostic.source());

        let report = match diagnostic.severity {
            Severity::Error => Report::error(),
            Severity::Warning => Report::warning(),
        }
        .with_message(diagnostic.message.as_str())
        .with_labels(vec![Label::primary(file_id, diagnostic.range.clone())]);

        let mut buffer = Buffer::no_color();
        match term::emit(&mut buffer, &config, &files, &report) {
            Ok(()) => out.push_str(&String::from_utf8_lossy(buffer.as_slice())),
            Err(_) => {
                out.push_str(&diagnostic.to_string());
                out.push('\n');
            }
        }
    }

    out
}
