//! Diagnostics reported by the rule and the sink they are handed to

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::syntax::{Coordinate, SourceBuffer};

/// Name diagnostics are reported under
pub const RULE_NAME: &str = "attribute-indentation";

/// A single layout violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub rule: &'static str,
    pub message: String,
    /// 1-based line of the misplaced construct
    pub line: usize,
    /// 0-based column of the misplaced construct
    pub column: usize,
    /// Source text of the node the violation belongs to
    pub source: String,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, at: Coordinate, source: impl Into<String>) -> Self {
        Self {
            rule: RULE_NAME,
            message: message.into(),
            line: at.line,
            column: at.column,
            source: source.into(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.line, self.column)
    }

    /// Format the diagnostic with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let offset = SourceBuffer::new(source).offset_of(self.coordinate());
        let end = source[offset..]
            .chars()
            .next()
            .map_or(offset, |c| offset + c.len_utf8());

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Warning, filename, offset)
            .with_code(self.rule)
            .with_message(&self.message)
            .with_label(
                Label::new((filename, offset..end))
                    .with_message(format!("misplaced at {}", self.coordinate()))
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        if let Err(err) = written {
            tracing::warn!(%err, "failed to render diagnostic");
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} ({})", self.line, self.column, self.message, self.rule)
    }
}

/// Receiver for diagnostics as the rule produces them
///
/// The rule calls [`DiagnosticSink::log`] once per violation and keeps
/// nothing itself.
pub trait DiagnosticSink {
    fn log(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn log(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
