//! Comment trivia scanning.
//!
//! Comments are located by raw offset rather than stored in the tree. A
//! node's *leading* comments are scanned from its full start, its *trailing*
//! comments from its end.
//!
//! Leading scans skip comments that sit on the same line as the offset
//! (except at the very start of the file): those trail the previous token.
//! Trailing scans stop at the first line break.

use std::ops::Range;

/// Syntactic form of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...`
    SingleLine,
    /// `/* ... */`
    MultiLine,
}

/// Which scan produced a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPlacement {
    Leading,
    Trailing,
}

/// A comment located in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRange {
    pub kind: CommentKind,
    pub placement: CommentPlacement,
    pub pos: usize,
    pub end: usize,
    /// Only spaces or tabs separate the comment from a line break or the end
    /// of the input.
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    pub fn range(&self) -> Range<usize> {
        self.pos..self.end
    }

    pub fn is_multi_line(&self) -> bool {
        self.kind == CommentKind::MultiLine
    }
}

/// Comments preceding the token whose full start is `pos`.
pub fn leading_comment_ranges(text: &str, pos: usize) -> Vec<CommentRange> {
    scan(text, pos, CommentPlacement::Leading)
}

/// Comments following `pos` up to the end of its line.
pub fn trailing_comment_ranges(text: &str, pos: usize) -> Vec<CommentRange> {
    scan(text, pos, CommentPlacement::Trailing)
}

fn scan(text: &str, mut pos: usize, placement: CommentPlacement) -> Vec<CommentRange> {
    let trailing = placement == CommentPlacement::Trailing;
    let mut collecting = trailing;
    let mut comments = Vec::new();

    if pos == 0 {
        collecting = true;
        pos = shebang_len(text);
    }
    if pos > text.len() || !text.is_char_boundary(pos) {
        return comments;
    }

    let bytes = text.as_bytes();
    while pos < text.len() {
        match bytes[pos] {
            b'\r' | b'\n' => {
                if trailing {
                    break;
                }
                pos += 1;
                collecting = true;
            }
            b' ' | b'\t' | 0x0b | 0x0c => pos += 1,
            b'/' if matches!(bytes.get(pos + 1), Some(b'/') | Some(b'*')) => {
                let start = pos;
                let kind = if bytes[pos + 1] == b'/' {
                    pos = text[pos..]
                        .find(is_line_break)
                        .map(|i| pos + i)
                        .unwrap_or(text.len());
                    CommentKind::SingleLine
                } else {
                    pos = text[pos + 2..]
                        .find("*/")
                        .map(|i| pos + 2 + i + 2)
                        .unwrap_or(text.len());
                    CommentKind::MultiLine
                };
                if collecting {
                    comments.push(CommentRange {
                        kind,
                        placement,
                        pos: start,
                        end: pos,
                        has_trailing_new_line: followed_by_line_break(text, pos),
                    });
                }
            }
            b if b.is_ascii() => break,
            _ => {
                let Some(ch) = text[pos..].chars().next() else {
                    break;
                };
                if is_line_break(ch) {
                    if trailing {
                        break;
                    }
                    collecting = true;
                } else if !ch.is_whitespace() {
                    break;
                }
                pos += ch.len_utf8();
            }
        }
    }

    comments
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn followed_by_line_break(text: &str, pos: usize) -> bool {
    match text[pos..].trim_start_matches([' ', '\t']).chars().next() {
        None => true,
        Some(ch) => is_line_break(ch),
    }
}

fn shebang_len(text: &str) -> usize {
    if text.starts_with("#!") {
        text.find(is_line_break).unwrap_or(text.len())
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(text: &'a str, ranges: &[CommentRange]) -> Vec<&'a str> {
        ranges.iter().map(|r| &text[r.range()]).collect()
    }

    #[test]
    fn test_leading_at_file_start() {
        let text = "// one\n/* two */\nfoo();";
        let comments = leading_comment_ranges(text, 0);
        assert_eq!(texts(text, &comments), vec!["// one", "/* two */"]);
        assert!(comments.iter().all(|c| c.has_trailing_new_line));
        assert_eq!(comments[0].kind, CommentKind::SingleLine);
        assert_eq!(comments[1].kind, CommentKind::MultiLine);
        assert!(
            comments
                .iter()
                .all(|c| c.placement == CommentPlacement::Leading)
        );
    }

    #[test]
    fn test_leading_skips_same_line_comments() {
        let text = "a(); // trails a\n// leads b\nb();";
        let comments = leading_comment_ranges(text, 4);
        assert_eq!(texts(text, &comments), vec!["// leads b"]);
    }

    #[test]
    fn test_trailing_stops_at_line_break() {
        let text = "a(); // trails a\n// leads b\nb();";
        let comments = trailing_comment_ranges(text, 4);
        assert_eq!(texts(text, &comments), vec!["// trails a"]);
        assert!(comments[0].has_trailing_new_line);
        assert_eq!(comments[0].placement, CommentPlacement::Trailing);
    }

    #[test]
    fn test_inline_comment_has_no_trailing_newline() {
        let text = "foo(1 /* one */, 2);";
        let comments = trailing_comment_ranges(text, 5);
        assert_eq!(texts(text, &comments), vec!["/* one */"]);
        assert!(!comments[0].has_trailing_new_line);
    }

    #[test]
    fn test_comment_at_end_of_input_is_line_terminated() {
        let text = "foo(); // done";
        let comments = trailing_comment_ranges(text, 6);
        assert!(comments[0].has_trailing_new_line);
    }

    #[test]
    fn test_stops_at_code() {
        let text = "foo(); bar(); // x";
        assert!(trailing_comment_ranges(text, 6).is_empty());
    }

    #[test]
    fn test_shebang_skipped() {
        let text = "#!/usr/bin/env node\n// real\nfoo();";
        let comments = leading_comment_ranges(text, 0);
        assert_eq!(texts(text, &comments), vec!["// real"]);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let text = "\n/* open";
        let comments = leading_comment_ranges(text, 0);
        assert_eq!(texts(text, &comments), vec!["/* open"]);
    }
}
