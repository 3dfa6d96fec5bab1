//! Output trees: render-deferred target text.
//!
//! Visitor methods do not produce strings. They produce [`OTree`]s that
//! declare *where* line breaks, indentation and separators go, and an
//! [`OTreeSink`] turns the tree into text once the whole translation is done.
//! This keeps multi-line fragments correctly nested no matter how deep they
//! end up in the final output.
//!
//! Rendering a node:
//!
//! 1. write each prefix fragment (nested trees are rendered in place),
//! 2. adjust the indent by `indent`,
//! 3. if `newline`, write a line break,
//! 4. write the children, `separator` between consecutive ones,
//! 5. revert the indent,
//! 6. write `suffix` (so it lands at the node's outer indent level),
//! 7. if `break_after`, make sure whatever is written next starts on a new
//!    line.
//!
//! Trees are immutable and cheap to clone; the same tree may appear in any
//! number of prefixes.

use std::fmt;
use std::sync::Arc;

/// Layout options of an [`OTree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OTreeOptions {
    /// Write a line break (subject to the new indentation) after the prefix.
    pub newline: bool,
    /// Indentation adjustment applied around the children.
    pub indent: i32,
    /// Text written between consecutive children.
    pub separator: Option<String>,
    /// Text written after the children, once the indent is reverted.
    pub suffix: Option<String>,
    /// The next text written must start on a new line (line comments).
    pub break_after: bool,
}

impl OTreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn newline(mut self) -> Self {
        self.newline = true;
        self
    }

    pub fn newline_if(mut self, newline: bool) -> Self {
        self.newline = newline;
        self
    }

    pub fn indent(mut self, indent: i32) -> Self {
        self.indent = indent;
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn break_after(mut self) -> Self {
        self.break_after = true;
        self
    }
}

/// One element of an [`OTree`] prefix.
#[derive(Debug, Clone)]
pub enum Fragment {
    Text(String),
    Tree(OTree),
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::Text(text.to_string())
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::Text(text)
    }
}

impl From<OTree> for Fragment {
    fn from(tree: OTree) -> Self {
        Fragment::Tree(tree)
    }
}

impl From<&OTree> for Fragment {
    fn from(tree: &OTree) -> Self {
        Fragment::Tree(tree.clone())
    }
}

#[derive(Debug)]
struct Inner {
    prefix: Vec<Fragment>,
    children: Vec<OTree>,
    options: OTreeOptions,
    unknown: bool,
}

/// An immutable, shareable output node.
#[derive(Debug, Clone)]
pub struct OTree(Arc<Inner>);

impl OTree {
    pub fn new(prefix: Vec<Fragment>, children: Vec<OTree>, options: OTreeOptions) -> Self {
        Self(Arc::new(Inner {
            prefix,
            children,
            options,
            unknown: false,
        }))
    }

    /// A node marking syntax the visitor could not translate.
    pub fn unknown(prefix: Vec<Fragment>, children: Vec<OTree>, options: OTreeOptions) -> Self {
        Self(Arc::new(Inner {
            prefix,
            children,
            options,
            unknown: true,
        }))
    }

    /// A node that renders nothing.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), OTreeOptions::default())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::concat(vec![Fragment::Text(text.into())])
    }

    /// Fragments written one after another.
    pub fn concat(prefix: Vec<Fragment>) -> Self {
        Self::new(prefix, Vec::new(), OTreeOptions::default())
    }

    /// Text that runs to the end of its line, such as a `#` comment.
    pub fn line_comment(text: impl Into<String>) -> Self {
        Self::new(
            vec![Fragment::Text(text.into())],
            Vec::new(),
            OTreeOptions::new().break_after(),
        )
    }

    /// Children joined by `separator`.
    pub fn list(children: Vec<OTree>, separator: &str) -> Self {
        Self::new(
            Vec::new(),
            children,
            OTreeOptions::new().separator(separator),
        )
    }

    pub fn prefix(&self) -> &[Fragment] {
        &self.0.prefix
    }

    pub fn children(&self) -> &[OTree] {
        &self.0.children
    }

    pub fn options(&self) -> &OTreeOptions {
        &self.0.options
    }

    pub fn is_unknown(&self) -> bool {
        self.0.unknown
    }

    /// True if rendering this node can never produce text.
    pub fn is_empty(&self) -> bool {
        let options = &self.0.options;
        !options.newline
            && !options.break_after
            && options.suffix.as_deref().is_none_or(str::is_empty)
            && self.0.prefix.iter().all(|f| match f {
                Fragment::Text(text) => text.is_empty(),
                Fragment::Tree(tree) => tree.is_empty(),
            })
            && self.0.children.iter().all(OTree::is_empty)
    }

    /// True if this node or anything it contains is unknown syntax.
    pub fn contains_unknown(&self) -> bool {
        self.is_unknown()
            || self.0.prefix.iter().any(|f| match f {
                Fragment::Text(_) => false,
                Fragment::Tree(tree) => tree.contains_unknown(),
            })
            || self.0.children.iter().any(OTree::contains_unknown)
    }

    /// Render this node into `sink`.
    pub fn write(&self, sink: &mut OTreeSink) {
        let options = &self.0.options;

        for fragment in &self.0.prefix {
            sink.write_fragment(fragment);
        }

        sink.adjust_indent(options.indent);
        if options.newline {
            sink.newline();
        }

        for (i, child) in self.0.children.iter().enumerate() {
            if i > 0 {
                if let Some(separator) = &options.separator {
                    sink.write(separator);
                }
            }
            child.write(sink);
        }

        sink.adjust_indent(-options.indent);

        if let Some(suffix) = &options.suffix {
            sink.write(suffix);
        }

        if options.break_after {
            sink.require_line_break();
        }
    }
}

impl fmt::Display for OTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sink = OTreeSink::new();
        self.write(&mut sink);
        f.write_str(&sink.finish())
    }
}

/// Stateful consumer that turns output trees into indented text.
#[derive(Debug, Default)]
pub struct OTreeSink {
    indent: i32,
    fragments: Vec<String>,
    /// Set by a line comment; cleared by the next non-empty write.
    pending_break: bool,
}

impl OTreeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text, indenting every line break it contains.
    ///
    /// If a line break is pending and `text` does not start with one, a line
    /// break is written first.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if std::mem::take(&mut self.pending_break) && !text.starts_with('\n') {
            self.push("\n");
        }
        self.push(text);
    }

    fn push(&mut self, text: &str) {
        let width = usize::try_from(self.indent).unwrap_or(0);
        if width == 0 || !text.contains('\n') {
            self.fragments.push(text.to_string());
        } else {
            let replacement = format!("\n{}", " ".repeat(width));
            self.fragments.push(text.replace('\n', &replacement));
        }
    }

    pub fn write_fragment(&mut self, fragment: &Fragment) {
        match fragment {
            Fragment::Text(text) => self.write(text),
            Fragment::Tree(tree) => tree.write(self),
        }
    }

    pub fn newline(&mut self) {
        self.write("\n");
    }

    /// Whatever is written next starts on a new line.
    pub fn require_line_break(&mut self) {
        self.pending_break = true;
    }

    pub fn adjust_indent(&mut self, by: i32) {
        self.indent += by;
    }

    pub fn indent(&self) -> i32 {
        self.indent
    }

    /// The accumulated text with trailing whitespace stripped from every line.
    pub fn finish(self) -> String {
        self.fragments
            .concat()
            .split('\n')
            .map(|line| line.trim_end_matches([' ', '\t']))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render a tree to final text, terminated by a line break.
pub fn render_tree(tree: &OTree) -> String {
    let mut sink = OTreeSink::new();
    tree.write(&mut sink);
    let mut text = sink.finish();
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tree: &OTree) -> String {
        tree.to_string()
    }

    #[test]
    fn test_separator_only_between_children() {
        let tree = OTree::list(
            vec![OTree::text("1"), OTree::text("2"), OTree::text("3")],
            ", ",
        );
        assert_eq!(render(&tree), "1, 2, 3");
    }

    #[test]
    fn test_block_indents_children_and_not_suffix() {
        let tree = OTree::new(
            vec!["{".into()],
            vec![OTree::text("a"), OTree::text("b")],
            OTreeOptions::new()
                .newline()
                .indent(4)
                .separator("\n")
                .suffix("\n}"),
        );
        assert_eq!(render(&tree), "{\n    a\n    b\n}");
    }

    #[test]
    fn test_nested_dict_inside_call() {
        let dict = OTree::new(
            vec!["{".into()],
            vec![OTree::text("\"a\": 1"), OTree::text("\"b\": 2")],
            OTreeOptions::new()
                .newline()
                .indent(4)
                .separator(",\n")
                .suffix("\n}"),
        );
        let call = OTree::concat(vec![
            "foo(".into(),
            OTree::list(vec![OTree::text("25"), OTree::text("deeper="), dict], ", ").into(),
            ")".into(),
        ]);
        assert_eq!(render(&call), "foo(25, deeper=, {\n    \"a\": 1,\n    \"b\": 2\n})");
    }

    #[test]
    fn test_multiline_fragment_follows_indent() {
        let body = OTree::text("line1\nline2");
        let tree = OTree::new(
            vec!["def f():".into()],
            vec![body],
            OTreeOptions::new().newline().indent(4),
        );
        assert_eq!(render(&tree), "def f():\n    line1\n    line2");
    }

    #[test]
    fn test_indent_is_cumulative_and_restored() {
        let inner = OTree::new(
            vec!["inner:".into()],
            vec![OTree::text("x")],
            OTreeOptions::new().newline().indent(2),
        );
        let outer = OTree::new(
            vec!["outer:".into()],
            vec![inner, OTree::text("y")],
            OTreeOptions::new().newline().indent(2).separator("\n"),
        );
        let tree = OTree::list(vec![outer, OTree::text("z")], "\n");
        assert_eq!(render(&tree), "outer:\n  inner:\n    x\n  y\nz");

        let mut sink = OTreeSink::new();
        tree.write(&mut sink);
        assert_eq!(sink.indent(), 0);
    }

    #[test]
    fn test_shared_fragments() {
        let shared = OTree::text("x");
        let tree = OTree::concat(vec![(&shared).into(), " + ".into(), shared.into()]);
        assert_eq!(render(&tree), "x + x");
    }

    #[test]
    fn test_trailing_whitespace_is_stripped() {
        let tree = OTree::new(
            vec!["if x: ".into()],
            vec![OTree::text("pass")],
            OTreeOptions::new().newline().indent(4),
        );
        assert_eq!(render_tree(&tree), "if x:\n    pass\n");
    }

    #[test]
    fn test_line_comment_breaks_before_following_text() {
        let call = OTree::concat(vec![
            "foo(bar".into(),
            OTree::line_comment("  # why").into(),
            ")".into(),
        ]);
        assert_eq!(render(&call), "foo(bar  # why\n)");
    }

    #[test]
    fn test_line_comment_reuses_existing_line_break() {
        let tree = OTree::list(
            vec![
                OTree::concat(vec!["a()".into(), OTree::line_comment("  # c").into()]),
                OTree::text("b()"),
            ],
            "\n",
        );
        assert_eq!(render(&tree), "a()  # c\nb()");
        // nothing follows
        assert_eq!(render_tree(&OTree::line_comment("# end")), "# end\n");
    }

    #[test]
    fn test_line_comment_break_is_indented() {
        let tree = OTree::new(
            vec!["if x:".into()],
            vec![OTree::concat(vec![
                "f(a".into(),
                OTree::line_comment("  # a").into(),
                ")".into(),
            ])],
            OTreeOptions::new().newline().indent(4),
        );
        assert_eq!(render(&tree), "if x:\n    f(a  # a\n    )");
    }

    #[test]
    fn test_negative_indent_writes_no_spaces() {
        let mut sink = OTreeSink::new();
        sink.adjust_indent(-4);
        sink.write("a\nb");
        assert_eq!(sink.finish(), "a\nb");
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(OTree::empty().is_empty());
        assert!(OTree::list(vec![OTree::empty()], "\n").is_empty());
        assert!(!OTree::text("x").is_empty());

        let unknown = OTree::unknown(vec!["<x>".into()], Vec::new(), OTreeOptions::new());
        let wrapper = OTree::concat(vec![unknown.into()]);
        assert!(!wrapper.is_unknown());
        assert!(wrapper.contains_unknown());
    }
}
