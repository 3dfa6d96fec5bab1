//! Identity visitor that shows the syntax tree instead of translating it.
//!
//! Every node renders as `([kind text]` followed by its children, one per
//! line and indented by two, and a closing `)`.

use super::{VisitResult, Visitor};
use crate::o_tree::{OTree, OTreeOptions};
use crate::walker::AstContext;
use rosetta_syntax::{CommentPlacement, CommentRange, SyntaxNode};

pub struct VisualizeVisitor;

/// Bracketed placeholder naming the node's kind and exact text.
pub fn placeholder(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let children = ctx.convert_all(node.children())?;
    let options = OTreeOptions::new()
        .newline_if(!children.is_empty())
        .indent(2)
        .separator("\n")
        .suffix(")");
    Ok(OTree::unknown(
        vec![format!("([{} {}]", node.kind(), ctx.text_of(node)).into()],
        children,
        options,
    ))
}

impl Visitor for VisualizeVisitor {
    fn language(&self) -> &'static str {
        "visualize"
    }

    fn comment_range(&self, comment: &CommentRange, ctx: &AstContext<'_>) -> VisitResult {
        let text = ctx.text_at(comment.range());
        Ok(match comment.placement {
            CommentPlacement::Leading => OTree::text(format!("(Comment {text})\n")),
            CommentPlacement::Trailing => OTree::text(format!(" (Comment {text})")),
        })
    }

    fn unsupported(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn import_equals_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn import_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn string_literal(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn function_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn identifier(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn syntax_list(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn block(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn parameter_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn return_statement(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn binary_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn if_statement(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn else_clause(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn parenthesized_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn property_access_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn call_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn expression_statement(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn token(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn this_keyword(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn object_literal_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn new_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn property_assignment(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn variable_statement(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn variable_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn array_literal_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        placeholder(node, ctx)
    }

    fn shorthand_property_assignment(
        &self,
        node: &SyntaxNode,
        ctx: &AstContext<'_>,
    ) -> VisitResult {
        placeholder(node, ctx)
    }
}
