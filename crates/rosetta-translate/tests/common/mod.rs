//! Shared helpers for translation tests.

#![allow(dead_code)]

use rosetta_translate::{
    LiteralSource, PythonVisitor, TranslateError, TranslateResult, translate_typescript,
};

pub fn ts2python(source: &str) -> Result<TranslateResult, TranslateError> {
    translate_typescript(
        &LiteralSource::with_name(source, "test.ts"),
        &PythonVisitor::new(),
    )
}

/// Translate `source` and compare with `expected`, ignoring the common
/// indentation of `expected` and blank lines around both.
pub fn expect_python(source: &str, expected: &str) {
    let result = ts2python(source).expect("translation failed");
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        result.diagnostics
    );
    assert_eq!(
        strip_empty_lines(&result.render()),
        strip_empty_lines(&strip_common_whitespace(expected))
    );
}

pub fn strip_common_whitespace(text: &str) -> String {
    let min = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    text.lines()
        .map(|line| line.get(min..).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn strip_empty_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}
