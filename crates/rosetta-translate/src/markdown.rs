//! Fenced code blocks in Markdown documents.
//!
//! Only fences are recognized; everything else is kept as verbatim text so a
//! document reassembles byte for byte when no block changes.

/// A piece of a Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    CodeBlock(CodeBlock),
}

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Spaces before the opening fence.
    pub indent: String,
    /// The fence characters, e.g. "```".
    pub fence: String,
    /// First word of the info string; empty if none.
    pub language: String,
    /// Rest of the info string after the language.
    pub info: String,
    /// Content lines, verbatim, with their line endings.
    pub source: String,
    /// Closing fence line, verbatim; `None` if the block runs to the end.
    pub closing: Option<String>,
}

impl CodeBlock {
    /// Content with the fence's indentation removed from every line.
    pub fn content(&self) -> String {
        let width = self.indent.len();
        if width == 0 {
            return self.source.clone();
        }
        self.source
            .split_inclusive('\n')
            .map(|line| {
                let spaces = line.len() - line.trim_start_matches(' ').len();
                &line[spaces.min(width)..]
            })
            .collect()
    }

    /// Replace the content, indenting it to the fence.
    pub fn set_content(&mut self, content: &str) {
        let mut source = String::with_capacity(content.len());
        for line in content.split_inclusive('\n') {
            if !line.trim().is_empty() {
                source.push_str(&self.indent);
            }
            source.push_str(line);
        }
        if !source.is_empty() && !source.ends_with('\n') {
            source.push('\n');
        }
        self.source = source;
    }

    fn render_into(&self, out: &mut String) {
        out.push_str(&self.indent);
        out.push_str(&self.fence);
        out.push_str(&self.language);
        out.push_str(&self.info);
        out.push('\n');
        out.push_str(&self.source);
        if let Some(closing) = &self.closing {
            out.push_str(closing);
        }
    }
}

struct OpeningFence<'a> {
    indent: usize,
    marker: char,
    len: usize,
    info: &'a str,
}

fn line_content(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn leading_spaces(text: &str) -> usize {
    text.len() - text.trim_start_matches(' ').len()
}

fn opening_fence(line: &str) -> Option<OpeningFence<'_>> {
    let content = line_content(line);
    let indent = leading_spaces(content);
    if indent > 3 {
        return None;
    }
    let after = &content[indent..];
    let marker = after.chars().next()?;
    if marker != '`' && marker != '~' {
        return None;
    }
    let len = after.len() - after.trim_start_matches(marker).len();
    if len < 3 {
        return None;
    }
    let info = &after[len..];
    if marker == '`' && info.contains('`') {
        return None;
    }
    Some(OpeningFence {
        indent,
        marker,
        len,
        info,
    })
}

fn closes(line: &str, marker: char, len: usize) -> bool {
    let content = line_content(line);
    let indent = leading_spaces(content);
    if indent > 3 {
        return false;
    }
    let after = &content[indent..];
    let run = after.len() - after.trim_start_matches(marker).len();
    run >= len && after[run..].trim().is_empty()
}

/// Split a document into prose and fenced code blocks.
pub fn parse(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut prose = String::new();
    let mut lines = text.split_inclusive('\n');

    while let Some(line) = lines.next() {
        let Some(open) = opening_fence(line) else {
            prose.push_str(line);
            continue;
        };
        if !prose.is_empty() {
            segments.push(Segment::Text(std::mem::take(&mut prose)));
        }

        let info = open.info.trim();
        let language = info.split_whitespace().next().unwrap_or("");
        let mut block = CodeBlock {
            indent: " ".repeat(open.indent),
            fence: open.marker.to_string().repeat(open.len),
            language: language.to_string(),
            info: info[language.len()..].to_string(),
            source: String::new(),
            closing: None,
        };

        for line in lines.by_ref() {
            if closes(line, open.marker, open.len) {
                block.closing = Some(line.to_string());
                break;
            }
            block.source.push_str(line);
        }
        segments.push(Segment::CodeBlock(block));
    }

    if !prose.is_empty() {
        segments.push(Segment::Text(prose));
    }
    segments
}

/// Reassemble a document.
pub fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::CodeBlock(block) => block.render_into(&mut out),
        }
    }
    out
}

/// Apply `transform` to every code block's `(language, content)`.
pub fn transform_code_blocks(
    text: &str,
    mut transform: impl FnMut(&str, &str) -> (String, String),
) -> String {
    let mut segments = parse(text);
    for segment in &mut segments {
        if let Segment::CodeBlock(block) = segment {
            let content = block.content();
            let (language, replacement) = transform(&block.language, &content);
            block.language = language;
            if replacement != content {
                block.set_content(&replacement);
            }
        }
    }
    render(&segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Title\n\nSome text.\n\n```ts\nfoo();\n```\n\nMore.\n\n~~~~python title=x\nprint(1)\n~~~~\n";

    fn blocks(segments: &[Segment]) -> Vec<&CodeBlock> {
        segments
            .iter()
            .filter_map(|s| match s {
                Segment::CodeBlock(block) => Some(block),
                Segment::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_blocks() {
        let segments = parse(DOC);
        let blocks = blocks(&segments);
        assert_eq!(blocks.len(), 2);

        assert_eq!(blocks[0].language, "ts");
        assert_eq!(blocks[0].source, "foo();\n");
        assert_eq!(blocks[0].closing.as_deref(), Some("```\n"));

        assert_eq!(blocks[1].fence, "~~~~");
        assert_eq!(blocks[1].language, "python");
        assert_eq!(blocks[1].info, " title=x");
    }

    #[test]
    fn test_render_is_lossless() {
        assert_eq!(render(&parse(DOC)), DOC);
        let plain = "no fences here\n";
        assert_eq!(render(&parse(plain)), plain);
    }

    #[test]
    fn test_short_fence_does_not_close() {
        let doc = "````\n```\ninner\n```\n````\nafter\n";
        let segments = parse(doc);
        let blocks = blocks(&segments);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].source, "```\ninner\n```\n");
        assert_eq!(render(&segments), doc);
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let doc = "intro\n```ts\nfoo();\n";
        let segments = parse(doc);
        let blocks = blocks(&segments);
        assert_eq!(blocks[0].source, "foo();\n");
        assert!(blocks[0].closing.is_none());
        assert_eq!(render(&segments), doc);
    }

    #[test]
    fn test_indented_block_content() {
        let doc = "- item\n\n  ```ts\n  if (x) {\n      y();\n  }\n  ```\n";
        let segments = parse(doc);
        let block = blocks(&segments)[0].clone();
        assert_eq!(block.indent, "  ");
        assert_eq!(block.content(), "if (x) {\n    y();\n}\n");

        let mut block = block;
        block.set_content("if x:\n    y()\n");
        assert_eq!(block.source, "  if x:\n      y()\n");
    }

    #[test]
    fn test_transform_code_blocks() {
        let out = transform_code_blocks(DOC, |language, content| {
            if language == "ts" {
                (String::new(), content.replace(';', ""))
            } else {
                (language.to_string(), content.to_string())
            }
        });
        assert!(out.contains("```\nfoo()\n```\n"));
        assert!(out.contains("~~~~python title=x\nprint(1)\n~~~~\n"));
    }
}
