//! Translation of standalone samples and of code blocks in documents.

use crate::config::TranslateConfig;
use crate::diagnostics::Diagnostic;
use crate::error::TranslateError;
use crate::markdown::{self, Segment};
use crate::o_tree::{OTree, render_tree};
use crate::source::{LiteralSource, Source};
use crate::visitor::{Visitor, VisualizeVisitor};
use crate::walker::{TranslateResult, visit_tree};
use rayon::prelude::*;
use rosetta_syntax::{FrontEnd, InputMode, frontend_for_language};
use std::sync::Arc;
use tracing::{debug, warn};

/// Language samples are written in.
pub const SOURCE_LANGUAGE: &str = "typescript";

/// Translates samples with one front-end and one target visitor.
pub struct Translator<'v> {
    visitor: &'v dyn Visitor,
    frontend: &'static dyn FrontEnd,
    parallel: bool,
}

/// What happened to one code block of a document.
struct BlockOutcome {
    replacement: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'v> Translator<'v> {
    /// Translator for TypeScript samples.
    pub fn new(visitor: &'v dyn Visitor) -> Result<Self, TranslateError> {
        let frontend = frontend_for_language(SOURCE_LANGUAGE)
            .ok_or_else(|| TranslateError::NoFrontEnd(SOURCE_LANGUAGE.to_string()))?;
        Ok(Self::with_frontend(visitor, frontend))
    }

    pub fn with_frontend(visitor: &'v dyn Visitor, frontend: &'static dyn FrontEnd) -> Self {
        Self {
            visitor,
            frontend,
            parallel: true,
        }
    }

    /// Translate document code blocks concurrently (default: true).
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Apply the `[document]` settings of a loaded configuration.
    pub fn configure(self, config: &TranslateConfig) -> Self {
        self.parallel(config.document.parallel())
    }

    pub fn visitor(&self) -> &'v dyn Visitor {
        self.visitor
    }

    /// Translate one complete unit.
    pub fn translate<S: Source>(&self, source: &S) -> Result<TranslateResult, TranslateError> {
        let tree = match self.frontend.input_mode() {
            InputMode::Contents => {
                source.with_contents(|name, contents| self.frontend.parse(name, contents))??
            }
            InputMode::File => source.with_file(|name, path| self.frontend.parse_file(name, path))??,
        };
        visit_tree(&tree, self.visitor)
    }

    /// Translate every foreign fenced code block of a Markdown document.
    ///
    /// Blocks with no language or already in the target language are left
    /// alone. Each other block is translated as its own unit named
    /// `<document>-snippet<N>.ts`; a block that fails fatally keeps its
    /// original text and contributes an error diagnostic.
    pub fn translate_document<S: Source>(
        &self,
        source: &S,
    ) -> Result<TranslateResult, TranslateError> {
        let (name, contents) =
            source.with_contents(|name, contents| (name.to_string(), contents.to_string()))?;

        let snippets: Vec<LiteralSource> = markdown::parse(&contents)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::CodeBlock(block) if self.qualifies(&block.language) => {
                    Some(block.content())
                }
                _ => None,
            })
            .enumerate()
            .map(|(n, content)| {
                LiteralSource::with_name(content, format!("{name}-snippet{}.ts", n + 1))
            })
            .collect();
        debug!(document = %name, blocks = snippets.len(), "translating document");

        let outcomes: Vec<BlockOutcome> = if self.parallel {
            snippets
                .par_iter()
                .map(|snippet| self.translate_block(snippet))
                .collect()
        } else {
            snippets
                .iter()
                .map(|snippet| self.translate_block(snippet))
                .collect()
        };

        // Qualifying blocks come back in the same order they were collected.
        let mut diagnostics = Vec::new();
        let mut outcomes = outcomes.into_iter();
        let mut document = markdown::transform_code_blocks(&contents, |language, content| {
            let unchanged = (language.to_string(), content.to_string());
            if !self.qualifies(language) {
                return unchanged;
            }
            let Some(outcome) = outcomes.next() else {
                return unchanged;
            };
            diagnostics.extend(outcome.diagnostics);
            match outcome.replacement {
                Some(replacement) => (String::new(), replacement),
                None => unchanged,
            }
        });

        // render_tree supplies the final line break
        if document.ends_with('\n') {
            document.pop();
        }
        Ok(TranslateResult {
            tree: OTree::text(document),
            diagnostics,
        })
    }

    fn qualifies(&self, language: &str) -> bool {
        !language.is_empty() && !self.visitor.is_target_language(language)
    }

    fn translate_block(&self, snippet: &LiteralSource) -> BlockOutcome {
        match self.translate(snippet) {
            Ok(result) => BlockOutcome {
                replacement: Some(render_tree(&result.tree)),
                diagnostics: result.diagnostics,
            },
            Err(err) => {
                warn!(snippet = snippet.name(), error = %err, "code block left untranslated");
                let source: Arc<str> = Arc::from(snippet.text());
                BlockOutcome {
                    replacement: None,
                    diagnostics: vec![Diagnostic::from_error(snippet.name(), source, &err)],
                }
            }
        }
    }
}

/// Translate a standalone TypeScript sample.
pub fn translate_typescript<S: Source>(
    source: &S,
    visitor: &dyn Visitor,
) -> Result<TranslateResult, TranslateError> {
    Translator::new(visitor)?.translate(source)
}

/// Translate the TypeScript code blocks of a Markdown document.
pub fn translate_markdown<S: Source>(
    source: &S,
    visitor: &dyn Visitor,
) -> Result<TranslateResult, TranslateError> {
    Translator::new(visitor)?.translate_document(source)
}

/// Render the syntax tree of a TypeScript sample for inspection.
pub fn visualize_typescript_ast<S: Source>(source: &S) -> Result<String, TranslateError> {
    let result = translate_typescript(source, &VisualizeVisitor)?;
    Ok(render_tree(&result.tree))
}

#[cfg(all(test, feature = "read-typescript"))]
mod tests {
    use super::*;
    use crate::visitor::DefaultVisitor;

    #[test]
    fn test_translate_literal() {
        let result = translate_typescript(&LiteralSource::new("foo(1);"), &DefaultVisitor).unwrap();
        assert_eq!(result.render(), "foo(1)\n");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_document_skips_untagged_and_target_blocks() {
        let doc = "```\nraw();\n```\n\n```default\nkept();\n```\n\n```ts\nfoo(1);\n```\n";
        let result = Translator::new(&DefaultVisitor)
            .unwrap()
            .translate_document(&LiteralSource::with_name(doc, "README.md"))
            .unwrap();
        let text = result.render();
        assert!(text.contains("```\nraw();\n```"));
        assert!(text.contains("```default\nkept();\n```"));
        assert!(text.contains("```\nfoo(1)\n```"));
        assert!(!text.contains("```ts"));
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let doc = "```ts\na(1);\n```\n```ts\nb(2);\n```\n```ts\nc(3);\n```\n";
        let source = LiteralSource::with_name(doc, "doc.md");
        let parallel = Translator::new(&DefaultVisitor)
            .unwrap()
            .translate_document(&source)
            .unwrap()
            .render();
        let sequential = Translator::new(&DefaultVisitor)
            .unwrap()
            .parallel(false)
            .translate_document(&source)
            .unwrap()
            .render();
        assert_eq!(parallel, sequential);
        let a = parallel.find("a(1)").unwrap();
        let b = parallel.find("b(2)").unwrap();
        let c = parallel.find("c(3)").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_configure_parallelism() {
        let mut config = TranslateConfig::default();
        assert!(Translator::new(&DefaultVisitor).unwrap().configure(&config).parallel);

        config.document.parallel = Some(false);
        assert!(!Translator::new(&DefaultVisitor).unwrap().configure(&config).parallel);
    }

    #[test]
    fn test_visualize() {
        let text = visualize_typescript_ast(&LiteralSource::new("x;")).unwrap();
        assert!(text.starts_with("([expression_statement x;]"));
    }
}
