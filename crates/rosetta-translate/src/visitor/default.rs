//! Best-effort strategy for curly-brace target languages.
//!
//! These functions back the default bodies of [`Visitor`]. Target visitors
//! call them directly to delegate the parts they do not change.

use super::{VisitResult, Visitor};
use crate::o_tree::{Fragment, OTree, OTreeOptions};
use crate::walker::AstContext;
use rosetta_syntax::{CommentPlacement, CommentRange, SyntaxNode};

/// Visitor that only uses the default strategy.
pub struct DefaultVisitor;

impl Visitor for DefaultVisitor {
    fn language(&self) -> &'static str {
        "default"
    }
}

pub fn comment_range(comment: &CommentRange, ctx: &AstContext<'_>) -> VisitResult {
    let text = ctx.text_at(comment.range());
    Ok(match (comment.placement, comment.has_trailing_new_line) {
        (CommentPlacement::Leading, true) => OTree::text(format!("{text}\n")),
        (CommentPlacement::Leading, false) => OTree::text(format!("{text} ")),
        // a line comment must not swallow what follows it
        (CommentPlacement::Trailing, true) if !comment.is_multi_line() => {
            OTree::line_comment(format!(" {text}"))
        }
        (CommentPlacement::Trailing, true) => OTree::text(format!(" {text}")),
        (CommentPlacement::Trailing, false) => OTree::text(format!(" {text} ")),
    })
}

/// Placeholder for a kind without a visitor method.
///
/// Reports an error diagnostic and echoes the kind and source text, with the
/// named children still translated beneath it.
pub fn unsupported(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let text = ctx.text_of(node);
    let message = if node.kind() == "ERROR" {
        format!("syntax error: {text}")
    } else {
        format!("unsupported language feature: {}", node.kind())
    };
    ctx.report(node, message);

    let children = ctx.children(node)?;
    let options = OTreeOptions::new()
        .newline_if(!children.is_empty())
        .indent(2)
        .separator("\n");
    Ok(OTree::unknown(
        vec![format!("<{} {}>", node.kind(), text).into()],
        children,
        options,
    ))
}

/// The node's source text, unchanged.
pub fn verbatim(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    Ok(OTree::text(ctx.text_of(node)))
}

/// Decoded value of a string literal.
pub fn string_value(node: &SyntaxNode, ctx: &AstContext<'_>) -> String {
    let mut value = String::new();
    for child in node.named_children() {
        let text = ctx.text_of(child);
        match child.kind() {
            "escape_sequence" => unescape_into(text, &mut value),
            _ => value.push_str(text),
        }
    }
    value
}

fn unescape_into(sequence: &str, out: &mut String) {
    let body = sequence.strip_prefix('\\').unwrap_or(sequence);
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return;
    };
    let rest = chars.as_str();
    match first {
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        'b' => out.push('\u{8}'),
        'f' => out.push('\u{c}'),
        'v' => out.push('\u{b}'),
        '0' if rest.is_empty() => out.push('\0'),
        'x' | 'u' => {
            let hex = rest.trim_start_matches('{').trim_end_matches('}');
            match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
                Some(c) => out.push(c),
                None => out.push_str(sequence),
            }
        }
        // line continuation
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => {}
        other => {
            out.push(other);
            out.push_str(rest);
        }
    }
}

/// String literals are re-encoded as double-quoted JSON strings.
pub fn string_literal(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let value = string_value(node, ctx);
    Ok(OTree::text(serde_json::Value::String(value).to_string()))
}

pub fn function_declaration(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let mut prefix: Vec<Fragment> = vec![
        "function ".into(),
        ctx.convert_opt(node.child_by_field("name"))?.into(),
        ctx.convert_opt(node.child_by_field("type_parameters"))?.into(),
        ctx.convert_opt(node.child_by_field("parameters"))?.into(),
    ];
    if let Some(return_type) = node.child_by_field("return_type") {
        prefix.push(ctx.text_of(return_type).into());
    }
    prefix.push(" ".into());
    prefix.push(ctx.convert_opt(node.child_by_field("body"))?.into());
    Ok(OTree::concat(prefix))
}

/// Delimited list: open token, named children joined by `", "`, close token.
pub fn syntax_list(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let children = node.children();
    let open = children
        .first()
        .filter(|c| !c.is_named())
        .map_or("", |c| ctx.text_of(c));
    let close = children
        .last()
        .filter(|c| !c.is_named() && children.len() > 1)
        .map_or("", |c| ctx.text_of(c));

    Ok(OTree::concat(vec![
        open.into(),
        OTree::list(ctx.children(node)?, ", ").into(),
        close.into(),
    ]))
}

pub fn block(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let statements = ctx.children(node)?;
    if statements.is_empty() {
        return Ok(OTree::text("{}"));
    }
    Ok(OTree::new(
        vec!["{".into()],
        statements,
        OTreeOptions::new()
            .newline()
            .indent(4)
            .separator("\n")
            .suffix("\n}"),
    ))
}

pub fn parameter_declaration(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let mut prefix: Vec<Fragment> = vec![ctx.convert_opt(node.child_by_field("pattern"))?.into()];
    if node.kind() == "optional_parameter" {
        prefix.push("?".into());
    }
    if let Some(annotation) = node.child_by_field("type") {
        prefix.push(ctx.text_of(annotation).into());
    }
    if let Some(value) = node.child_by_field("value") {
        prefix.push(" = ".into());
        prefix.push(ctx.convert(value)?.into());
    }
    Ok(OTree::concat(prefix))
}

pub fn return_statement(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    match node.named_children().next() {
        Some(value) => Ok(OTree::concat(vec!["return ".into(), ctx.convert(value)?.into()])),
        None => Ok(OTree::text("return")),
    }
}

/// The operator token of a binary, assignment or augmented assignment.
pub fn operator(node: &SyntaxNode) -> Option<&SyntaxNode> {
    node.child_by_field("operator")
        .or_else(|| node.children().iter().find(|c| !c.is_named()))
}

pub fn binary_expression(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let op = operator(node).map_or("", |op| ctx.text_of(op));
    Ok(OTree::concat(vec![
        ctx.convert_opt(node.child_by_field("left"))?.into(),
        " ".into(),
        op.into(),
        " ".into(),
        ctx.convert_opt(node.child_by_field("right"))?.into(),
    ]))
}

pub fn if_statement(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let mut prefix: Vec<Fragment> = vec![
        "if ".into(),
        ctx.convert_opt(node.child_by_field("condition"))?.into(),
        " ".into(),
        ctx.convert_opt(node.child_by_field("consequence"))?.into(),
    ];
    if let Some(alternative) = node.child_by_field("alternative") {
        prefix.push(" ".into());
        prefix.push(ctx.convert(alternative)?.into());
    }
    Ok(OTree::concat(prefix))
}

pub fn else_clause(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    Ok(OTree::concat(vec![
        "else ".into(),
        ctx.convert_opt(node.named_children().next())?.into(),
    ]))
}

pub fn parenthesized_expression(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    Ok(OTree::concat(vec![
        "(".into(),
        ctx.convert_opt(node.named_children().next())?.into(),
        ")".into(),
    ]))
}

pub fn property_access_expression(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let dot = node
        .child_of_kind("optional_chain")
        .map_or(".", |chain| ctx.text_of(chain));
    Ok(OTree::concat(vec![
        ctx.convert_opt(node.child_by_field("object"))?.into(),
        dot.into(),
        ctx.convert_opt(node.child_by_field("property"))?.into(),
    ]))
}

pub fn call_expression(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    Ok(OTree::concat(vec![
        ctx.convert_opt(node.child_by_field("function"))?.into(),
        ctx.convert_opt(node.child_by_field("arguments"))?.into(),
    ]))
}

pub fn expression_statement(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    ctx.convert_opt(node.named_children().next())
}

pub fn object_literal_expression(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let members = ctx.children(node)?;
    if members.is_empty() {
        return Ok(OTree::text("{}"));
    }
    Ok(OTree::concat(vec![
        "{ ".into(),
        OTree::list(members, ", ").into(),
        " }".into(),
    ]))
}

pub fn new_expression(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    Ok(OTree::concat(vec![
        "new ".into(),
        ctx.convert_opt(node.child_by_field("constructor"))?.into(),
        ctx.convert_opt(node.child_by_field("arguments"))?.into(),
    ]))
}

pub fn property_assignment(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    Ok(OTree::concat(vec![
        ctx.convert_opt(node.child_by_field("key"))?.into(),
        ": ".into(),
        ctx.convert_opt(node.child_by_field("value"))?.into(),
    ]))
}

pub fn variable_statement(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    Ok(OTree::list(ctx.children(node)?, "\n"))
}

pub fn variable_declaration(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    let name = ctx.convert_opt(node.child_by_field("name"))?;
    match node.child_by_field("value") {
        Some(value) => Ok(OTree::concat(vec![
            name.into(),
            " = ".into(),
            ctx.convert(value)?.into(),
        ])),
        None => Ok(name),
    }
}

pub fn array_literal_expression(node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    Ok(OTree::concat(vec![
        "[".into(),
        OTree::list(ctx.children(node)?, ", ").into(),
        "]".into(),
    ]))
}

#[cfg(all(test, feature = "read-typescript"))]
mod tests {
    use super::*;
    use crate::walker::visit_tree;
    use rosetta_syntax::parse_typescript;

    fn translate(code: &str) -> String {
        let tree = parse_typescript("test.ts", code).unwrap();
        let result = visit_tree(&tree, &DefaultVisitor).unwrap();
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        result.render().trim_end().to_string()
    }

    #[test]
    fn test_call() {
        assert_eq!(translate("foo(1, bar, 'x');"), r#"foo(1, bar, "x")"#);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(translate(r#"foo('it\'s');"#), r#"foo("it's")"#);
        assert_eq!(translate(r#"foo("tab\there");"#), r#"foo("tab\there")"#);
        assert_eq!(translate(r#"foo('\u0041');"#), r#"foo("A")"#);
    }

    #[test]
    fn test_block() {
        assert_eq!(
            translate("if (x) { foo(); bar(); }"),
            "if (x) {\n    foo()\n    bar()\n}"
        );
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(translate("function f() {}"), "function f() {}");
    }

    #[test]
    fn test_else() {
        assert_eq!(
            translate("if (a) { b(); } else { c(); }"),
            "if (a) {\n    b()\n} else {\n    c()\n}"
        );
    }

    #[test]
    fn test_member_access() {
        assert_eq!(translate("a.b.c();"), "a.b.c()");
        assert_eq!(translate("a?.b;"), "a?.b");
    }

    #[test]
    fn test_literals() {
        assert_eq!(translate("const x = [1, 2];"), "x = [1, 2]");
        assert_eq!(translate("x = { a: 1, b };"), "x = { a: 1, b }");
        assert_eq!(translate("x = {};"), "x = {}");
        assert_eq!(translate("const p = new Point(1, 2);"), "p = new Point(1, 2)");
    }

    #[test]
    fn test_function() {
        assert_eq!(
            translate("function add(a: number, b = 2): number { return a + b; }"),
            "function add(a: number, b = 2): number {\n    return a + b\n}"
        );
    }

    #[test]
    fn test_comments_pass_through() {
        assert_eq!(translate("// note\nfoo();"), "// note\nfoo()");
        assert_eq!(translate("foo(); // why\n"), "foo() // why");
    }

    #[test]
    fn test_line_comment_inside_call_keeps_closing_paren() {
        assert_eq!(translate("foo(\n  bar // why\n);"), "foo(bar // why\n)");
    }
}
