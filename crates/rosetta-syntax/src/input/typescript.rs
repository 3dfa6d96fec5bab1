//! Tree-sitter based TypeScript front-end.

use crate::frontend::{FrontEnd, ParseError};
use crate::tree::{SyntaxNode, SyntaxTree};
use tree_sitter::{Node, Parser};

/// Static instance of the TypeScript front-end for registry.
pub static TYPESCRIPT_FRONTEND: TypeScriptFrontEnd = TypeScriptFrontEnd;

/// TypeScript front-end using tree-sitter.
pub struct TypeScriptFrontEnd;

impl FrontEnd for TypeScriptFrontEnd {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ts", "mts", "cts", "js", "mjs"]
    }

    fn parse(&self, file_name: &str, contents: &str) -> Result<SyntaxTree, ParseError> {
        parse_typescript(file_name, contents)
    }
}

/// Parse TypeScript source into a [`SyntaxTree`].
///
/// Syntax errors do not fail the parse: tree-sitter's `ERROR` nodes are kept
/// in the tree so the translator can report them where they occur.
pub fn parse_typescript(file_name: &str, source: &str) -> Result<SyntaxTree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_typescript::language().into())
        .map_err(|err| ParseError::Grammar {
            language: "typescript".into(),
            message: err.to_string(),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::Failed {
            file: file_name.to_string(),
        })?;

    let root = tree.root_node();
    let mut children = lower_children(root);
    children.push(SyntaxNode::end_of_file(source.len()));

    // The root spans the whole file so leading trivia at offset 0 belongs to it.
    let program = SyntaxNode::new(root.kind(), 0..source.len()).with_children(children);
    Ok(SyntaxTree::new(file_name, source, program))
}

fn lower(node: Node, field: Option<&'static str>) -> SyntaxNode {
    let lowered = if node.is_named() {
        SyntaxNode::new(node.kind(), node.byte_range())
    } else {
        SyntaxNode::token(node.kind(), node.byte_range())
    };
    let lowered = match field {
        Some(field) => lowered.with_field(field),
        None => lowered,
    };
    lowered.with_children(lower_children(node))
}

/// Structural children of `node`; extras (comments) are left to trivia scanning.
fn lower_children(node: Node) -> Vec<SyntaxNode> {
    let mut children = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if !child.is_extra() {
                children.push(lower(child, cursor.field_name()));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    children
}
