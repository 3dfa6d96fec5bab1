//! Front-end behaviour through the public API.

#![cfg(feature = "read-typescript")]

use rosetta_syntax::{
    CommentKind, CommentPlacement, FrontEnd, InputMode, ParseError, TYPESCRIPT_FRONTEND,
    frontend_for_extension, leading_comment_ranges, trailing_comment_ranges,
};
use tempfile::TempDir;

#[test]
fn parse_file_attributes_tree_to_given_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.ts");
    std::fs::write(&path, "const x = 1;\n").unwrap();

    let tree = TYPESCRIPT_FRONTEND
        .parse_file("docs/sample.ts", &path)
        .unwrap();
    assert_eq!(tree.file_name(), "docs/sample.ts");
    assert_eq!(tree.source(), "const x = 1;\n");
    assert!(
        tree.root()
            .descendants()
            .any(|n| n.kind() == "variable_declarator")
    );
}

#[test]
fn parse_file_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = TYPESCRIPT_FRONTEND
        .parse_file("missing.ts", &dir.path().join("missing.ts"))
        .unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
}

#[test]
fn typescript_reads_contents() {
    let frontend = frontend_for_extension("ts").unwrap();
    assert_eq!(frontend.input_mode(), InputMode::Contents);
}

#[test]
fn comments_around_statements() {
    let source = "/** Doc */\nfoo(); // after foo\n// before bar\nbar();\n";
    let tree = TYPESCRIPT_FRONTEND.parse("test.ts", source).unwrap();
    let statements: Vec<_> = tree.root().named_children().collect();
    assert_eq!(statements.len(), 2);

    let leading = leading_comment_ranges(source, statements[0].full_start());
    assert_eq!(leading.len(), 1);
    assert_eq!(leading[0].kind, CommentKind::MultiLine);
    assert_eq!(tree.text_at(leading[0].range()), "/** Doc */");
    assert!(leading[0].has_trailing_new_line);

    let trailing = trailing_comment_ranges(source, statements[0].end());
    assert_eq!(trailing.len(), 1);
    assert_eq!(trailing[0].placement, CommentPlacement::Trailing);
    assert_eq!(tree.text_at(trailing[0].range()), "// after foo");

    // the same-line comment belongs to foo, not bar
    let leading = leading_comment_ranges(source, statements[1].full_start());
    assert_eq!(leading.len(), 1);
    assert_eq!(tree.text_at(leading[0].range()), "// before bar");
}

#[test]
fn line_and_column_of_offsets() {
    let source = "a();\n  bébé();\n";
    let tree = TYPESCRIPT_FRONTEND.parse("test.ts", source).unwrap();
    let call = tree
        .root()
        .descendants()
        .filter(|n| n.kind() == "call_expression")
        .nth(1)
        .unwrap();
    assert_eq!(tree.line_column(call.start()), (2, 3));
    assert_eq!(tree.line_column(source.len()), (3, 1));
}
