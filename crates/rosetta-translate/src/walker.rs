//! Tree walker: dispatches syntax nodes to a [`Visitor`] and reattaches
//! comment trivia.
//!
//! Comments are not part of the syntax tree. For every node the walker scans
//! the source text for comments before the node's full start (leading) and
//! after its end (trailing), and wraps them around whatever the visitor
//! produced. Nested nodes often share a full start or an end offset, so each
//! offset is scanned at most once per translation; the outermost node reached
//! first owns the comments.
//!
//! A comment on the same line as a token the walker never converts (`{`,
//! `,`, `(`) trails that token. Nothing claims it at the token's end, so the
//! next node claims it at its full start and emits it as a leading comment.

use crate::diagnostics::{Diagnostic, Severity};
use crate::error::TranslateError;
use crate::o_tree::{Fragment, OTree};
use crate::visitor::{VisitResult, Visitor};
use rosetta_syntax::{
    CommentPlacement, CommentRange, SyntaxNode, SyntaxTree, leading_comment_ranges, trailing_comment_ranges,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::ops::Range;
use tracing::debug;

/// Output of translating one unit.
#[derive(Debug, Clone)]
pub struct TranslateResult {
    pub tree: OTree,
    pub diagnostics: Vec<Diagnostic>,
}

impl TranslateResult {
    /// Final text of the translation.
    pub fn render(&self) -> String {
        crate::o_tree::render_tree(&self.tree)
    }

    pub fn has_errors(&self) -> bool {
        crate::diagnostics::has_errors(&self.diagnostics)
    }
}

/// Per-run state handed to every visitor method.
pub struct AstContext<'a> {
    tree: &'a SyntaxTree,
    visitor: &'a dyn Visitor,
    /// Full starts already scanned for leading comments.
    scanned_leading: RefCell<HashSet<usize>>,
    /// End offsets already scanned for trailing comments.
    scanned_trailing: RefCell<HashSet<usize>>,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl<'a> AstContext<'a> {
    pub fn new(tree: &'a SyntaxTree, visitor: &'a dyn Visitor) -> Self {
        Self {
            tree,
            visitor,
            scanned_leading: RefCell::new(HashSet::new()),
            scanned_trailing: RefCell::new(HashSet::new()),
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    pub fn file_name(&self) -> &'a str {
        self.tree.file_name()
    }

    pub fn visitor(&self) -> &'a dyn Visitor {
        self.visitor
    }

    /// Translate one node, with the comments it owns.
    pub fn convert(&self, node: &SyntaxNode) -> VisitResult {
        self.convert_with(node, |node| self.dispatch(node))
    }

    /// Wrap the comments `node` owns around `render(node)`.
    ///
    /// For visitor methods that build a child's output themselves instead of
    /// converting it, so the child's comments are still emitted.
    pub fn convert_with(
        &self,
        node: &SyntaxNode,
        render: impl FnOnce(&SyntaxNode) -> VisitResult,
    ) -> VisitResult {
        let leading = self.leading_comments(node.full_start());
        let trailing = self.trailing_comments(node.end());

        let transformed = render(node)?;

        if leading.is_empty() && trailing.is_empty() {
            return Ok(transformed);
        }

        let mut prefix: Vec<Fragment> = Vec::with_capacity(leading.len() + trailing.len() + 1);
        for comment in &leading {
            prefix.push(self.visitor.comment_range(comment, self)?.into());
        }
        prefix.push(transformed.into());
        for comment in &trailing {
            prefix.push(self.visitor.comment_range(comment, self)?.into());
        }
        Ok(OTree::concat(prefix))
    }

    /// Translate a node if present; absent nodes render nothing.
    pub fn convert_opt(&self, node: Option<&SyntaxNode>) -> VisitResult {
        match node {
            Some(node) => self.convert(node),
            None => Ok(OTree::empty()),
        }
    }

    pub fn convert_all<'n>(
        &self,
        nodes: impl IntoIterator<Item = &'n SyntaxNode>,
    ) -> Result<Vec<OTree>, TranslateError> {
        nodes.into_iter().map(|node| self.convert(node)).collect()
    }

    /// Translate every named child of `node`.
    pub fn children(&self, node: &SyntaxNode) -> Result<Vec<OTree>, TranslateError> {
        self.convert_all(node.named_children())
    }

    /// Verbatim source text of a node.
    pub fn text_of(&self, node: &SyntaxNode) -> &'a str {
        self.tree.text_of(node)
    }

    /// Verbatim source text of a raw range.
    pub fn text_at(&self, range: Range<usize>) -> &'a str {
        self.tree.text_at(range)
    }

    /// Record an error diagnostic for `node`.
    pub fn report(&self, node: &SyntaxNode, message: impl Into<String>) {
        self.report_with(Severity::Error, node.range(), message);
    }

    pub fn warn(&self, node: &SyntaxNode, message: impl Into<String>) {
        self.report_with(Severity::Warning, node.range(), message);
    }

    pub fn report_with(&self, severity: Severity, range: Range<usize>, message: impl Into<String>) {
        self.diagnostics.borrow_mut().push(Diagnostic::new(
            severity,
            message,
            self.tree.file_name(),
            self.tree.shared_source(),
            range,
        ));
    }

    /// The fatal error for a construct at `offset` with no target representation.
    pub fn irrepresentable(&self, offset: usize, message: impl Into<String>) -> TranslateError {
        let (line, column) = self.tree.line_column(offset);
        TranslateError::Irrepresentable {
            file: self.tree.file_name().to_string(),
            line,
            column,
            message: message.into(),
        }
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }

    fn leading_comments(&self, full_start: usize) -> Vec<CommentRange> {
        if !self.scanned_leading.borrow_mut().insert(full_start) {
            return Vec::new();
        }
        // comments left on the line of the preceding token
        let mut comments: Vec<CommentRange> = if full_start > 0 {
            self.trailing_comments(full_start)
                .into_iter()
                .map(|comment| CommentRange {
                    placement: CommentPlacement::Leading,
                    ..comment
                })
                .collect()
        } else {
            Vec::new()
        };
        comments.extend(leading_comment_ranges(self.tree.source(), full_start));
        comments
    }

    fn trailing_comments(&self, end: usize) -> Vec<CommentRange> {
        if !self.scanned_trailing.borrow_mut().insert(end) {
            return Vec::new();
        }
        trailing_comment_ranges(self.tree.source(), end)
    }

    fn dispatch(&self, node: &SyntaxNode) -> VisitResult {
        if std::ptr::eq(node, self.tree.root()) {
            return self.convert_root(node);
        }
        if node.is_end_of_file() {
            return Ok(OTree::empty());
        }

        let visitor = self.visitor;
        if !node.is_named() {
            return visitor.token(node, self);
        }

        match node.kind() {
            "import_statement" => {
                if node.child_of_kind("import_require_clause").is_some() {
                    visitor.import_equals_declaration(node, self)
                } else {
                    visitor.import_declaration(node, self)
                }
            }
            "string" => visitor.string_literal(node, self),
            "function_declaration" => visitor.function_declaration(node, self),
            "identifier"
            | "property_identifier"
            | "type_identifier"
            | "shorthand_property_identifier_pattern" => visitor.identifier(node, self),
            "arguments" | "formal_parameters" | "type_arguments" | "type_parameters" => {
                visitor.syntax_list(node, self)
            }
            "statement_block" => visitor.block(node, self),
            "required_parameter" | "optional_parameter" => {
                visitor.parameter_declaration(node, self)
            }
            "return_statement" => visitor.return_statement(node, self),
            "binary_expression" | "assignment_expression" | "augmented_assignment_expression" => {
                visitor.binary_expression(node, self)
            }
            "if_statement" => visitor.if_statement(node, self),
            "else_clause" => visitor.else_clause(node, self),
            "parenthesized_expression" => visitor.parenthesized_expression(node, self),
            "member_expression" => visitor.property_access_expression(node, self),
            "call_expression" => visitor.call_expression(node, self),
            "expression_statement" => visitor.expression_statement(node, self),
            "number" | "true" | "false" | "null" | "undefined" | "super" => {
                visitor.token(node, self)
            }
            "this" => visitor.this_keyword(node, self),
            "object" => visitor.object_literal_expression(node, self),
            "new_expression" => visitor.new_expression(node, self),
            "pair" => visitor.property_assignment(node, self),
            "lexical_declaration" | "variable_declaration" => {
                visitor.variable_statement(node, self)
            }
            "variable_declarator" => visitor.variable_declaration(node, self),
            "array" => visitor.array_literal_expression(node, self),
            "shorthand_property_identifier" => visitor.shorthand_property_assignment(node, self),
            kind => {
                debug!(kind, file = self.tree.file_name(), "no visitor method");
                visitor.unsupported(node, self)
            }
        }
    }

    /// The document node: statements one per line, then comments that follow
    /// the last statement.
    fn convert_root(&self, root: &SyntaxNode) -> VisitResult {
        let mut statements = Vec::new();
        let mut closing = OTree::empty();
        for child in root.children() {
            let converted = self.convert(child)?;
            if child.is_end_of_file() {
                closing = converted;
            } else {
                statements.push(converted);
            }
        }

        let body = OTree::list(statements, "\n");
        if closing.is_empty() {
            Ok(body)
        } else if body.is_empty() {
            Ok(closing)
        } else {
            Ok(OTree::concat(vec![body.into(), "\n".into(), closing.into()]))
        }
    }
}

/// Translate a whole syntax tree with `visitor`.
///
/// Unsupported syntax never fails; it yields placeholder output and an error
/// diagnostic. Only a construct the target cannot represent at all aborts.
pub fn visit_tree(tree: &SyntaxTree, visitor: &dyn Visitor) -> Result<TranslateResult, TranslateError> {
    let _span = tracing::debug_span!(
        "visit_tree",
        file = tree.file_name(),
        language = visitor.language()
    )
    .entered();

    let ctx = AstContext::new(tree, visitor);
    let output = ctx.convert(tree.root())?;
    let diagnostics = ctx.into_diagnostics();
    debug!(diagnostics = diagnostics.len(), "translated");

    Ok(TranslateResult {
        tree: output,
        diagnostics,
    })
}
