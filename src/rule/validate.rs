//! Turns expectations into diagnostics, one construct at a time

use crate::config::Options;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::syntax::{BlockInvocation, Coordinate, MarkupElement, SourceBuffer, SyntaxNode};

use super::position::{
    block_params_expectation, block_params_text, close_brace_expectation, closing_delimiter,
    closing_tag_expectation, param_layout, Expectation,
};

/// Check the arguments or attributes of `node`
///
/// Returns the line expected for whatever follows them.
pub fn validate_params(
    node: &SyntaxNode,
    options: &Options,
    source: &SourceBuffer<'_>,
    sink: &mut dyn DiagnosticSink,
) -> usize {
    let baseline = node.span().start.line + 1;
    let Some(layout) = param_layout(node, source, options.indentation) else {
        return baseline;
    };

    for check in &layout.checks {
        let Expectation { actual, expected } = check.expectation;
        tracing::trace!(name = %check.entry.name, %actual, %expected, "param");
        if check.expectation.is_satisfied() {
            continue;
        }
        let name = &check.entry.name;
        sink.log(Diagnostic::new(
            format!(
                "Incorrect indentation of {} '{}' beginning at {}. Expected '{}' to be at {}.",
                check.entry.kind.label(),
                name,
                actual,
                name,
                expected
            ),
            actual,
            source.source_for(node.span()),
        ));
    }

    layout.next_line
}

/// Check the `as |...|` clause of a block form
pub fn validate_block_params(block: &BlockInvocation, source: &SourceBuffer<'_>, sink: &mut dyn DiagnosticSink) {
    let expectation = block_params_expectation(block, source);
    let Expectation { actual, expected } = expectation;
    tracing::trace!(%actual, %expected, "block params");
    if expectation.is_satisfied() {
        return;
    }

    let clause = block_params_text(block, actual, source);
    sink.log(Diagnostic::new(
        format!(
            "Incorrect indentation of block params '{}' beginning at {}. Expecting the block params to be at {}.",
            clause, actual, expected
        ),
        actual,
        source.source_for(block.span),
    ));
}

/// Check the `}}`, `>` or `/>` closing an opening invocation or tag
///
/// `next_line` is the line [`validate_params`] expects after the last
/// argument or attribute.
pub fn validate_close_brace(
    node: &SyntaxNode,
    next_line: usize,
    source: &SourceBuffer<'_>,
    sink: &mut dyn DiagnosticSink,
) {
    let expectation = close_brace_expectation(node, next_line);
    let Expectation { actual, expected } = expectation;
    tracing::trace!(%actual, %expected, "close brace");
    if expectation.is_satisfied() {
        return;
    }

    let delimiter = closing_delimiter(node);
    let message = match node {
        SyntaxNode::Element(element) => format!(
            "Incorrect indentation of close bracket '{}' for the element '<{}>' beginning at {}. Expected '<{}>' to end at {}.",
            delimiter, element.tag, actual, element.tag, expected
        ),
        SyntaxNode::Block(block) => invocation_close_message(&block.path.original, actual, expected),
        SyntaxNode::Inline(inline) => invocation_close_message(&inline.path.original, actual, expected),
        SyntaxNode::Text(_) => return,
    };
    sink.log(Diagnostic::new(message, actual, source.source_for(node.span())));
}

fn invocation_close_message(name: &str, actual: Coordinate, expected: Coordinate) -> String {
    format!(
        "Incorrect indentation of close curly braces '}}}}' for the component '{{{{{}}}}}' beginning at {}. Expected '{{{{{}}}}}' to end at {}.",
        name, actual, name, expected
    )
}

/// Check the `</tag>` of an element with children
pub fn validate_closing_tag(element: &MarkupElement, source: &SourceBuffer<'_>, sink: &mut dyn DiagnosticSink) {
    let Some(expectation) = closing_tag_expectation(element) else {
        return;
    };
    let Expectation { actual, expected } = expectation;
    tracing::trace!(%actual, %expected, "closing tag");
    if expectation.is_satisfied() {
        return;
    }

    sink.log(Diagnostic::new(
        format!(
            "Incorrect indentation of close tag '</{}>' for element '<{}>' beginning at {}. Expected '</{}>' to be at {}.",
            element.tag, element.tag, actual, element.tag, expected
        ),
        actual,
        source.source_for(element.span),
    ));
}
