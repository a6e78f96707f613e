//! Line/column access to the template source

use super::ast::{Coordinate, Span};

/// Template source split into lines, addressed by [`Coordinate`]s
///
/// Columns count characters, not bytes. Lines are split on `\n` only, so a
/// `\r` from a Windows line ending stays at the end of its line.
#[derive(Debug, Clone)]
pub struct SourceBuffer<'a> {
    source: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> SourceBuffer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: source.split('\n').collect(),
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.source
    }

    /// The text of a 1-based line, without its `\n`
    pub fn line(&self, line: usize) -> Option<&'a str> {
        line.checked_sub(1).and_then(|index| self.lines.get(index).copied())
    }

    /// Number of whitespace characters a line starts with
    pub fn leading_whitespace(&self, line: usize) -> usize {
        self.line(line)
            .map(|text| text.chars().take_while(|c| c.is_whitespace()).count())
            .unwrap_or(0)
    }

    /// Text from `at` to the end of its line
    pub fn rest_of_line(&self, at: Coordinate) -> &'a str {
        match self.line(at.line) {
            Some(text) => &text[byte_column(text, at.column)..],
            None => "",
        }
    }

    /// Exact source text covered by `span`
    pub fn source_for(&self, span: Span) -> &'a str {
        let start = self.offset_of(span.start);
        let end = self.offset_of(span.end);
        if start <= end {
            &self.source[start..end]
        } else {
            ""
        }
    }

    /// Byte offset of a coordinate, clamped to the source
    pub fn offset_of(&self, at: Coordinate) -> usize {
        if at.line == 0 {
            return 0;
        }
        if at.line > self.lines.len() {
            return self.source.len();
        }
        let index = at.line - 1;
        let line_start: usize = self.lines[..index].iter().map(|text| text.len() + 1).sum();
        line_start + byte_column(self.lines[index], at.column)
    }
}

fn byte_column(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}
