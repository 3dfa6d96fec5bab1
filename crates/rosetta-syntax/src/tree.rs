//! Owned syntax tree model.
//!
//! Front-ends lower their native trees into [`SyntaxNode`]s so that the
//! translation engine never depends on a particular parser. A node carries
//! its kind, byte range, the field name it occupies under its parent, and its
//! structural children. Comments are not children; they are found by
//! scanning the source around [`SyntaxNode::full_start`] and
//! [`SyntaxNode::end`] (see [`crate::trivia`]).

use std::ops::Range;
use std::sync::Arc;

/// Kind of the zero-width token that front-ends append to the root node.
///
/// Its full start is the end of the last statement, which gives comments
/// trailing the final statement an owner.
pub const END_OF_FILE: &str = "end_of_file";

/// A node in a [`SyntaxTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: &'static str,
    named: bool,
    field: Option<&'static str>,
    full_start: usize,
    range: Range<usize>,
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// A named node (a construct with meaning, e.g. `call_expression`).
    pub fn new(kind: &'static str, range: Range<usize>) -> Self {
        Self {
            kind,
            named: true,
            field: None,
            full_start: range.start,
            range,
            children: Vec::new(),
        }
    }

    /// An anonymous token (punctuation, operator or keyword).
    pub fn token(kind: &'static str, range: Range<usize>) -> Self {
        Self {
            named: false,
            ..Self::new(kind, range)
        }
    }

    /// The zero-width end-of-file token at `pos`.
    pub fn end_of_file(pos: usize) -> Self {
        Self::token(END_OF_FILE, pos..pos)
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn is_named(&self) -> bool {
        self.named
    }

    pub fn is_end_of_file(&self) -> bool {
        !self.named && self.kind == END_OF_FILE
    }

    /// Field name this node occupies under its parent, if any.
    pub fn field(&self) -> Option<&'static str> {
        self.field
    }

    /// Start offset including leading trivia.
    pub fn full_start(&self) -> usize {
        self.full_start
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn named_children(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter(|c| c.named)
    }

    pub fn child_by_field(&self, field: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.field == Some(field))
    }

    pub fn children_by_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a SyntaxNode> {
        self.children.iter().filter(move |c| c.field == Some(field))
    }

    pub fn child_of_kind(&self, kind: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Verbatim text of this node (without leading trivia).
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.range.clone()).unwrap_or("")
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    fn assign_full_starts(&mut self, full_start: usize) {
        self.full_start = full_start.min(self.range.start);
        let mut next = self.full_start;
        for child in &mut self.children {
            child.assign_full_starts(next);
            next = child.range.end;
        }
    }
}

/// Iterator returned by [`SyntaxNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    file_name: String,
    source: Arc<str>,
    root: SyntaxNode,
}

impl SyntaxTree {
    /// Build a tree, computing every node's full start.
    ///
    /// The root's full start is 0, a first child shares its parent's full
    /// start, and every other child starts where its previous sibling ends.
    pub fn new(
        file_name: impl Into<String>,
        source: impl Into<Arc<str>>,
        mut root: SyntaxNode,
    ) -> Self {
        root.assign_full_starts(0);
        Self {
            file_name: file_name.into(),
            source: source.into(),
            root,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Shared handle to the source text.
    pub fn shared_source(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn text_of(&self, node: &SyntaxNode) -> &str {
        node.text(&self.source)
    }

    pub fn text_at(&self, range: Range<usize>) -> &str {
        self.source.get(range).unwrap_or("")
    }

    /// 1-based line and column (in characters) of a byte offset.
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        line_column(&self.source, offset)
    }
}

/// 1-based line and column (in characters) of a byte offset in `text`.
pub fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = text.get(..offset).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
