//! The per-node-kind contract between the tree walker and target languages.
//!
//! A [`Visitor`] has one method per recognized syntax kind. Every method has a
//! default body that delegates to the best-effort curly-brace strategy in
//! [`default`], so a target language overrides only where it differs and can
//! call the matching function in [`default`] to fall back on it.

pub mod default;
pub mod visualize;

pub use default::DefaultVisitor;
pub use visualize::VisualizeVisitor;

use crate::error::TranslateError;
use crate::o_tree::OTree;
use crate::walker::AstContext;
use rosetta_syntax::{CommentRange, SyntaxNode};

/// Result of translating one node.
pub type VisitResult = Result<OTree, TranslateError>;

/// Per-target-language translation of syntax nodes.
///
/// Methods receive the node and the translation context; children are
/// translated through [`AstContext::convert`] so comments and dispatch stay
/// with the walker.
pub trait Visitor: Send + Sync {
    /// Target language name (e.g., "python").
    fn language(&self) -> &'static str;

    /// Whether a fenced block tagged `tag` is already written in the target
    /// language and should be left alone.
    fn is_target_language(&self, tag: &str) -> bool {
        tag == self.language()
    }

    fn comment_range(&self, comment: &CommentRange, ctx: &AstContext<'_>) -> VisitResult {
        default::comment_range(comment, ctx)
    }

    /// Kinds this visitor has no method for.
    fn unsupported(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::unsupported(node, ctx)
    }

    fn import_equals_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::verbatim(node, ctx)
    }

    fn import_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::verbatim(node, ctx)
    }

    fn string_literal(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::string_literal(node, ctx)
    }

    fn function_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::function_declaration(node, ctx)
    }

    fn identifier(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::verbatim(node, ctx)
    }

    /// Grouping nodes: argument and parameter lists.
    fn syntax_list(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::syntax_list(node, ctx)
    }

    fn block(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::block(node, ctx)
    }

    fn parameter_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::parameter_declaration(node, ctx)
    }

    fn return_statement(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::return_statement(node, ctx)
    }

    fn binary_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::binary_expression(node, ctx)
    }

    fn if_statement(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::if_statement(node, ctx)
    }

    fn else_clause(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::else_clause(node, ctx)
    }

    fn parenthesized_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::parenthesized_expression(node, ctx)
    }

    fn property_access_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::property_access_expression(node, ctx)
    }

    fn call_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::call_expression(node, ctx)
    }

    fn expression_statement(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::expression_statement(node, ctx)
    }

    /// Anonymous tokens and literal keywords.
    fn token(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::verbatim(node, ctx)
    }

    fn this_keyword(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        self.token(node, ctx)
    }

    fn object_literal_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::object_literal_expression(node, ctx)
    }

    fn new_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::new_expression(node, ctx)
    }

    fn property_assignment(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::property_assignment(node, ctx)
    }

    /// A declaration statement with its list of declarators.
    fn variable_statement(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::variable_statement(node, ctx)
    }

    /// A single declarator.
    fn variable_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::variable_declaration(node, ctx)
    }

    fn array_literal_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        default::array_literal_expression(node, ctx)
    }

    fn shorthand_property_assignment(
        &self,
        node: &SyntaxNode,
        ctx: &AstContext<'_>,
    ) -> VisitResult {
        default::verbatim(node, ctx)
    }
}
