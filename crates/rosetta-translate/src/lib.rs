//! Syntax-directed translation of code samples between languages.
//!
//! `rosetta-translate` turns a TypeScript sample into an equivalent sample in
//! a target language (Python is the reference target), keeping comments and
//! structure, so one authored example can be shown in several languages.
//!
//! # Architecture
//!
//! ```text
//! Source             Syntax tree        Walker + Visitor          Output
//! ──────────    ─────────────────    ──────────────────────    ───────────
//! TypeScript ──> SyntaxTree ───────> AstContext ─> Visitor ──> OTree ──> OTreeSink ──> text
//!                (rosetta-syntax)         │
//!                                         └──> Diagnostic (parallel list)
//! ```
//!
//! The walker dispatches every node to a per-language [`Visitor`] and wraps
//! comment trivia around the result. Visitors build [`OTree`]s that say where
//! line breaks and indentation go; the [`OTreeSink`] computes the final text.
//! Syntax a visitor does not know is never dropped: it becomes a visible
//! placeholder plus an error [`Diagnostic`].
//!
//! # Example
//!
//! ```ignore
//! use rosetta_translate::{LiteralSource, PythonVisitor, translate_typescript};
//!
//! let result = translate_typescript(
//!     &LiteralSource::new("callSomeFunction(1, 2, 3);"),
//!     &PythonVisitor::new(),
//! )?;
//! assert_eq!(result.render(), "call_some_function(1, 2, 3)\n");
//! ```
//!
//! # Documents
//!
//! [`Translator::translate_document`] translates the fenced code blocks of a
//! Markdown document in place, each as its own unit named
//! `<document>-snippet<N>.ts`, and reassembles the rest of the document
//! unchanged.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod languages;
pub mod markdown;
pub mod o_tree;
pub mod source;
pub mod translate;
pub mod visitor;
pub mod walker;

// Re-exports: output model
pub use o_tree::{Fragment, OTree, OTreeOptions, OTreeSink, render_tree};

// Re-exports: walker and visitors
pub use visitor::{DefaultVisitor, VisitResult, Visitor, VisualizeVisitor};
pub use walker::{AstContext, TranslateResult, visit_tree};

// Re-exports: errors and diagnostics
pub use diagnostics::{Diagnostic, Severity, format_diagnostics, has_errors, is_error_diagnostic};
pub use error::{ConfigError, TranslateError};

// Re-exports: entry points
pub use config::{DocumentConfig, PythonConfig, TranslateConfig};
pub use languages::{languages, visitor_for_language};
pub use source::{FileSource, LiteralSource, Source};
pub use translate::{
    Translator, translate_markdown, translate_typescript, visualize_typescript_ast,
};

// Re-exports: built-in targets
#[cfg(feature = "write-python")]
pub use languages::python::{PythonVisitor, mangle_identifier};
