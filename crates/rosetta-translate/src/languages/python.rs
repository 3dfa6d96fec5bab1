//! Python target.
//!
//! Overrides the default strategy where Python differs: indentation blocks
//! instead of braces, snake_case names, keyword arguments in place of a
//! trailing options object, `#` comments, and Python import forms.

use crate::config::PythonConfig;
use crate::o_tree::{Fragment, OTree, OTreeOptions};
use crate::visitor::{VisitResult, Visitor, default};
use crate::walker::AstContext;
use rosetta_syntax::{CommentPlacement, CommentRange, SyntaxNode};
use std::collections::BTreeMap;

/// Calls whose fully-qualified TypeScript spelling maps to a Python builtin.
pub const BUILTIN_FUNCTIONS: &[(&str, &str)] = &[
    ("console.log", "print"),
    ("console.error", "sys.stderr.write"),
    ("Math.random", "random.random"),
];

const KEYWORDS: &[(&str, &str)] = &[
    ("this", "self"),
    ("true", "True"),
    ("false", "False"),
    ("null", "None"),
    ("undefined", "None"),
];

const OPERATORS: &[(&str, &str)] = &[
    ("===", "=="),
    ("!==", "!="),
    ("&&", "and"),
    ("||", "or"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(from, _)| *from == key).map(|(_, to)| *to)
}

/// Translates TypeScript samples to Python.
#[derive(Debug, Clone)]
pub struct PythonVisitor {
    builtins: BTreeMap<String, String>,
}

impl Default for PythonVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PythonVisitor {
    pub fn new() -> Self {
        Self {
            builtins: BUILTIN_FUNCTIONS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Built-in table extended (or overridden) by configuration.
    pub fn with_config(config: &PythonConfig) -> Self {
        let mut visitor = Self::new();
        visitor.builtins.extend(
            config
                .builtins
                .iter()
                .map(|(from, to)| (from.clone(), to.clone())),
        );
        visitor
    }

    pub fn builtin(&self, qualified: &str) -> Option<&str> {
        self.builtins.get(qualified).map(String::as_str)
    }

    /// Arguments of a call or `new`, with a trailing options object
    /// exploded into keyword arguments.
    fn call_arguments(&self, args: Option<&SyntaxNode>, ctx: &AstContext<'_>) -> VisitResult {
        let Some(args) = args else {
            return Ok(OTree::empty());
        };
        let values: Vec<&SyntaxNode> = args.named_children().collect();

        let converted = match values.split_last() {
            Some((last, rest)) if is_keyword_arguments(last) => {
                let mut converted = ctx.convert_all(rest.iter().copied())?;
                converted.push(ctx.convert_with(last, |object| {
                    let members = object
                        .named_children()
                        .map(|member| {
                            ctx.convert_with(member, |member| keyword_argument(member, ctx))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(OTree::list(members, ", "))
                })?);
                converted
            }
            _ => ctx.convert_all(values)?,
        };
        Ok(OTree::list(converted, ", "))
    }
}

/// True for an object literal whose members can all become `key=value`.
fn is_keyword_arguments(node: &SyntaxNode) -> bool {
    node.kind() == "object"
        && node.named_children().next().is_some()
        && node.named_children().all(|member| match member.kind() {
            "pair" => member
                .child_by_field("key")
                .is_some_and(|key| matches!(key.kind(), "property_identifier" | "identifier")),
            "shorthand_property_identifier" => true,
            _ => false,
        })
}

fn keyword_argument(member: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
    if member.kind() == "shorthand_property_identifier" {
        let name = mangle_identifier(ctx.text_of(member));
        return Ok(OTree::text(format!("{name}={name}")));
    }
    let key = member.child_by_field("key").map_or("", |key| ctx.text_of(key));
    Ok(OTree::concat(vec![
        format!("{}=", mangle_identifier(key)).into(),
        ctx.convert_opt(member.child_by_field("value"))?.into(),
    ]))
}

impl Visitor for PythonVisitor {
    fn language(&self) -> &'static str {
        "python"
    }

    fn is_target_language(&self, tag: &str) -> bool {
        matches!(tag, "python" | "py")
    }

    fn comment_range(&self, comment: &CommentRange, ctx: &AstContext<'_>) -> VisitResult {
        if !comment.has_trailing_new_line {
            return Err(ctx.irrepresentable(
                comment.pos,
                "cannot convert inline style comment to Python",
            ));
        }

        let text = strip_comment_markers(ctx.text_at(comment.range()), comment.is_multi_line());
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    "#".to_string()
                } else {
                    format!("# {line}")
                }
            })
            .collect();

        Ok(match comment.placement {
            CommentPlacement::Leading => {
                OTree::text(lines.iter().map(|line| format!("{line}\n")).collect::<String>())
            }
            CommentPlacement::Trailing => {
                OTree::line_comment(format!("  {}", lines.join("\n")))
            }
        })
    }

    fn import_equals_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let clause = node.child_of_kind("import_require_clause");
        let name = clause.and_then(|c| c.child_of_kind("identifier"));
        let source = clause.and_then(|c| c.child_by_field("source"));
        match (name, source) {
            (Some(name), Some(source)) => Ok(OTree::text(format!(
                "import {} as {}",
                convert_module_reference(&default::string_value(source, ctx)),
                mangle_identifier(ctx.text_of(name)),
            ))),
            _ => self.unsupported(node, ctx),
        }
    }

    fn import_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let Some(source) = node.child_by_field("source") else {
            return self.unsupported(node, ctx);
        };
        let module = convert_module_reference(&default::string_value(source, ctx));

        let Some(clause) = node.child_of_kind("import_clause") else {
            return Ok(OTree::text(format!("import {module}")));
        };

        let mut names = Vec::new();
        let mut namespaces = Vec::new();
        for part in clause.named_children() {
            match part.kind() {
                "identifier" => names.push(mangle_identifier(ctx.text_of(part))),
                "namespace_import" => {
                    if let Some(alias) = part.child_of_kind("identifier") {
                        namespaces.push(format!(
                            "import {module} as {}",
                            mangle_identifier(ctx.text_of(alias))
                        ));
                    }
                }
                "named_imports" => {
                    for specifier in part.named_children() {
                        let Some(name) = specifier.child_by_field("name") else {
                            continue;
                        };
                        let name = mangle_identifier(ctx.text_of(name));
                        names.push(match specifier.child_by_field("alias") {
                            Some(alias) => {
                                format!("{name} as {}", mangle_identifier(ctx.text_of(alias)))
                            }
                            None => name,
                        });
                    }
                }
                _ => {}
            }
        }

        let mut lines = Vec::new();
        if !names.is_empty() {
            lines.push(format!("from {module} import {}", names.join(", ")));
        }
        lines.extend(namespaces);
        if lines.is_empty() {
            lines.push(format!("import {module}"));
        }
        Ok(OTree::text(lines.join("\n")))
    }

    fn token(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let text = ctx.text_of(node);
        match lookup(KEYWORDS, text).or_else(|| lookup(OPERATORS, text)) {
            Some(python) => Ok(OTree::text(python)),
            None => default::verbatim(node, ctx),
        }
    }

    fn this_keyword(&self, _node: &SyntaxNode, _ctx: &AstContext<'_>) -> VisitResult {
        Ok(OTree::text("self"))
    }

    fn identifier(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        Ok(OTree::text(mangle_identifier(ctx.text_of(node))))
    }

    fn function_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let parameters = match node.child_by_field("parameters") {
            Some(parameters) => ctx.children(parameters)?,
            None => Vec::new(),
        };
        Ok(OTree::new(
            vec![
                "def ".into(),
                ctx.convert_opt(node.child_by_field("name"))?.into(),
                "(".into(),
                OTree::list(parameters, ", ").into(),
                "):".into(),
            ],
            vec![ctx.convert_opt(node.child_by_field("body"))?],
            OTreeOptions::new().suffix("\n"),
        ))
    }

    fn parameter_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let name = ctx.convert_opt(node.child_by_field("pattern"))?;
        match node.child_by_field("value") {
            Some(value) => Ok(OTree::concat(vec![
                name.into(),
                "=".into(),
                ctx.convert(value)?.into(),
            ])),
            None if node.kind() == "optional_parameter" => {
                Ok(OTree::concat(vec![name.into(), "=None".into()]))
            }
            None => Ok(name),
        }
    }

    fn block(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let mut statements = ctx.children(node)?;
        if statements.is_empty() {
            statements.push(OTree::text("pass"));
        }
        Ok(OTree::new(
            Vec::new(),
            statements,
            OTreeOptions::new().newline().indent(4).separator("\n"),
        ))
    }

    fn call_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let arguments = node.child_by_field("arguments");
        if arguments.is_some_and(|args| args.kind() != "arguments") {
            // tagged template
            return default::call_expression(node, ctx);
        }
        Ok(OTree::concat(vec![
            ctx.convert_opt(node.child_by_field("function"))?.into(),
            "(".into(),
            self.call_arguments(arguments, ctx)?.into(),
            ")".into(),
        ]))
    }

    fn new_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        Ok(OTree::concat(vec![
            ctx.convert_opt(node.child_by_field("constructor"))?.into(),
            "(".into(),
            self.call_arguments(node.child_by_field("arguments"), ctx)?.into(),
            ")".into(),
        ]))
    }

    fn property_access_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        if let Some(builtin) = self.builtin(ctx.text_of(node)) {
            return Ok(OTree::text(builtin));
        }
        Ok(OTree::concat(vec![
            ctx.convert_opt(node.child_by_field("object"))?.into(),
            ".".into(),
            ctx.convert_opt(node.child_by_field("property"))?.into(),
        ]))
    }

    fn if_statement(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let condition = node.child_by_field("condition").map(|condition| {
            if condition.kind() == "parenthesized_expression" {
                condition.named_children().next().unwrap_or(condition)
            } else {
                condition
            }
        });

        let if_stmt = OTree::new(
            vec!["if ".into(), ctx.convert_opt(condition)?.into(), ": ".into()],
            vec![ctx.convert_opt(node.child_by_field("consequence"))?],
            OTreeOptions::new(),
        );

        match node.child_by_field("alternative") {
            Some(alternative) => Ok(OTree::list(vec![if_stmt, ctx.convert(alternative)?], "\n")),
            None => Ok(if_stmt),
        }
    }

    fn else_clause(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        match node.named_children().next() {
            Some(body) if body.kind() == "if_statement" => {
                Ok(OTree::concat(vec!["el".into(), ctx.convert(body)?.into()]))
            }
            Some(body) => Ok(OTree::new(
                vec!["else: ".into()],
                vec![ctx.convert(body)?],
                OTreeOptions::new(),
            )),
            None => Ok(OTree::text("else: pass")),
        }
    }

    fn binary_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let op = default::operator(node).map_or("", |op| ctx.text_of(op));
        let op = lookup(OPERATORS, op).unwrap_or(op);
        Ok(OTree::concat(vec![
            ctx.convert_opt(node.child_by_field("left"))?.into(),
            " ".into(),
            op.into(),
            " ".into(),
            ctx.convert_opt(node.child_by_field("right"))?.into(),
        ]))
    }

    fn object_literal_expression(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let members = ctx.children(node)?;
        if members.is_empty() {
            return Ok(OTree::text("{}"));
        }
        Ok(OTree::new(
            vec!["{".into()],
            members,
            OTreeOptions::new()
                .newline()
                .indent(4)
                .separator(",\n")
                .suffix("\n}"),
        ))
    }

    fn property_assignment(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let key = match node.child_by_field("key") {
            Some(key) if matches!(key.kind(), "property_identifier" | "identifier") => {
                OTree::text(quote(ctx.text_of(key)))
            }
            other => ctx.convert_opt(other)?,
        };
        Ok(OTree::concat(vec![
            key.into(),
            ": ".into(),
            ctx.convert_opt(node.child_by_field("value"))?.into(),
        ]))
    }

    fn shorthand_property_assignment(
        &self,
        node: &SyntaxNode,
        ctx: &AstContext<'_>,
    ) -> VisitResult {
        let name = ctx.text_of(node);
        Ok(OTree::text(format!(
            "{}: {}",
            quote(name),
            mangle_identifier(name)
        )))
    }

    fn variable_declaration(&self, node: &SyntaxNode, ctx: &AstContext<'_>) -> VisitResult {
        let value: Fragment = match node.child_by_field("value") {
            Some(value) => ctx.convert(value)?.into(),
            None => "None".into(),
        };
        Ok(OTree::concat(vec![
            ctx.convert_opt(node.child_by_field("name"))?.into(),
            " = ".into(),
            value,
        ]))
    }
}

fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

/// Convert a TypeScript identifier to Python naming.
///
/// Names starting with an uppercase letter are probably classes and stay as
/// they are. Everything else becomes snake_case: an underscore goes before
/// an uppercase letter that follows a lowercase letter or digit, and before
/// the last letter of an acronym followed by lowercase (`parseHTMLString` is
/// `parse_html_string`).
pub fn mangle_identifier(name: &str) -> String {
    if name.starts_with(|c: char| c.is_ascii_uppercase()) {
        return name.to_string();
    }

    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_uppercase() {
            out.push(c);
            continue;
        }
        let prev = i.checked_sub(1).map(|j| chars[j]);
        let next = chars.get(i + 1).copied();
        let boundary = match prev {
            Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
            Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
            _ => false,
        };
        if boundary {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Comment text without `//`, `/* */` or leading `*` markers.
pub fn strip_comment_markers(comment: &str, multi_line: bool) -> String {
    if !multi_line {
        let body = comment.strip_prefix("//").unwrap_or(comment);
        let body = body.strip_prefix(' ').unwrap_or(body);
        return body.trim_end().to_string();
    }

    let body = comment.strip_prefix("/*").unwrap_or(comment);
    let body = body.strip_suffix("*/").unwrap_or(body);
    let body = body.trim_start_matches('*');

    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            match trimmed.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).trim_end(),
                None => trimmed.trim_end(),
            }
        })
        .collect();

    let start = lines
        .iter()
        .position(|line| !line.is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}

/// Python module path for a package specifier: `@scope/mod-name` is
/// `scope.mod_name`.
pub fn convert_module_reference(reference: &str) -> String {
    reference
        .strip_prefix('@')
        .unwrap_or(reference)
        .replace('/', ".")
        .replace('-', "_")
}
