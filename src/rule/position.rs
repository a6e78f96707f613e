//! Expected and actual coordinates of the parts of an invocation or element
//!
//! Everything here is a pure function of the syntax tree, the source text and
//! the configured indentation. Nothing is reported from this module; the
//! validators compare the [`Expectation`]s it produces.
//!
//! The layout being checked puts each argument or attribute on its own line,
//! indented one step past the opening `{{` or `<`, with the closing delimiter
//! on the line after the last one, back at the opening column:
//!
//! ```text
//! {{my-component
//!   firstName=user.first
//!   lastName=user.last
//! }}
//! ```

use std::borrow::Cow;

use crate::syntax::{
    AttrValue, Attribute, BlockInvocation, Coordinate, Expression, Hash, MarkupElement,
    SourceBuffer, Span, SyntaxNode,
};

use super::gate::opening_end;

/// Where something is compared with where it should be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    pub actual: Coordinate,
    pub expected: Coordinate,
}

impl Expectation {
    pub fn new(actual: Coordinate, expected: Coordinate) -> Self {
        Self { actual, expected }
    }

    /// Both line and column must agree
    pub fn is_satisfied(&self) -> bool {
        self.actual == self.expected
    }
}

/// What kind of entry a parameter list holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Positional,
    Named,
    Attribute,
}

impl ParamKind {
    /// How the entry is named in diagnostics
    pub fn label(self) -> &'static str {
        match self {
            ParamKind::Positional => "positional param",
            ParamKind::Named => "attribute",
            ParamKind::Attribute => "htmlAttribute",
        }
    }
}

/// One argument or attribute, reduced to what alignment needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamEntry<'a> {
    pub kind: ParamKind,
    pub name: Cow<'a, str>,
    pub start: Coordinate,
    /// Last line occupied by a value that wraps or embeds an invocation
    pub absorbs_through: Option<usize>,
}

impl<'a> ParamEntry<'a> {
    pub fn positional(param: &'a Expression, source: &SourceBuffer<'a>) -> Self {
        let name = match param {
            Expression::Path(path) => Cow::Borrowed(path.original.as_str()),
            Expression::Literal { raw, .. } => Cow::Borrowed(raw.as_str()),
            Expression::SubExpression(sub) => Cow::Borrowed(source.source_for(sub.span).trim()),
        };
        Self {
            kind: ParamKind::Positional,
            name,
            start: param.span().start,
            absorbs_through: param.multiline_end(),
        }
    }

    pub fn named(hash: &'a Hash) -> impl Iterator<Item = ParamEntry<'a>> + 'a {
        hash.pairs.iter().map(|pair| ParamEntry {
            kind: ParamKind::Named,
            name: Cow::Borrowed(pair.key.as_str()),
            start: pair.span.start,
            absorbs_through: pair.value.multiline_end(),
        })
    }

    pub fn attribute(attribute: &'a Attribute) -> Self {
        let absorbs_through = match &attribute.value {
            AttrValue::Mustache(mustache) => Some(mustache.span.end.line),
            AttrValue::Text { .. } | AttrValue::Concat { .. } => None,
        };
        Self {
            kind: ParamKind::Attribute,
            name: Cow::Borrowed(attribute.name.as_str()),
            start: attribute.span.start,
            absorbs_through,
        }
    }
}

/// An entry together with where it should have started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamCheck<'a> {
    pub entry: ParamEntry<'a>,
    pub expectation: Expectation,
}

/// Result of laying out a parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamLayout<'a> {
    pub checks: Vec<ParamCheck<'a>>,
    /// Line expected for whatever follows the list
    pub next_line: usize,
}

/// Walk `entries` in order, assigning each its expected coordinate
///
/// Every entry is expected at `column`. The first is expected on
/// `first_line`, each following one on the line after the previous entry,
/// or after the last line of a previous value that spans lines.
pub fn align_params<'a, I>(entries: I, column: usize, first_line: usize) -> ParamLayout<'a>
where
    I: IntoIterator<Item = ParamEntry<'a>>,
{
    let mut next_line = first_line;
    let mut checks = Vec::new();
    for entry in entries {
        let expected = Coordinate::new(next_line, column);
        next_line = match entry.absorbs_through {
            Some(end_line) => end_line + 1,
            None => next_line + 1,
        };
        checks.push(ParamCheck {
            expectation: Expectation::new(entry.start, expected),
            entry,
        });
    }
    ParamLayout { checks, next_line }
}

/// Corrected start of a block form's first positional argument
///
/// The parser records a parser-inserted path one column to the right of
/// where it sits. Returns `None` unless the first positional argument of
/// `block` is such a path. When it applies, the argument list is expected
/// to start one line earlier as well.
pub fn synthetic_correction(block: &BlockInvocation) -> Option<Coordinate> {
    match block.params.first() {
        Some(Expression::Path(path)) if path.synthetic => Some(path.span.start.back(1)),
        _ => None,
    }
}

/// Layout of the arguments or attributes of `node`
///
/// Positional arguments come first, then named ones. For elements, the
/// attributes. Returns `None` for text.
pub fn param_layout<'a>(node: &'a SyntaxNode, source: &SourceBuffer<'a>, indentation: usize) -> Option<ParamLayout<'a>> {
    let start = node.span().start;
    let column = start.column + indentation;
    let first_line = start.line + 1;

    match node {
        SyntaxNode::Block(block) => {
            let mut positional: Vec<ParamEntry<'a>> =
                block.params.iter().map(|param| ParamEntry::positional(param, source)).collect();
            let mut first_line = first_line;
            if let Some(corrected) = synthetic_correction(block) {
                tracing::trace!(%corrected, "correcting synthetic first argument");
                positional[0].start = corrected;
                first_line -= 1;
            }
            let entries = positional.into_iter().chain(ParamEntry::named(&block.hash));
            Some(align_params(entries, column, first_line))
        }
        SyntaxNode::Inline(inline) => {
            let entries = inline
                .params
                .iter()
                .map(|param| ParamEntry::positional(param, source))
                .chain(ParamEntry::named(&inline.hash));
            Some(align_params(entries, column, first_line))
        }
        SyntaxNode::Element(element) => {
            let entries = element.attributes.iter().map(ParamEntry::attribute);
            Some(align_params(entries, column, first_line))
        }
        SyntaxNode::Text(_) => None,
    }
}

/// Expected and actual start of a block form's `as |...|` clause
pub fn block_params_expectation(block: &BlockInvocation, source: &SourceBuffer<'_>) -> Expectation {
    let start = block.span.start;
    let body_start = block.program.span.start;

    if !block.has_arguments() {
        let expected = Coordinate::new(start.line + 1, start.column);
        let actual = if start.line == body_start.line {
            let prefix = format!("{{{{#{}", block.path.original);
            Coordinate::new(start.line, prefix.chars().count())
        } else {
            Coordinate::new(body_start.line, source.leading_whitespace(body_start.line))
        };
        return Expectation::new(actual, expected);
    }

    let tail = match block.params.last() {
        Some(param) => param.span().end,
        None => block.hash.span.end,
    };
    let expected = Coordinate::new(tail.line + 1, start.column);
    let actual = if tail.line < body_start.line && source.rest_of_line(tail).trim().is_empty() {
        Coordinate::new(body_start.line, source.leading_whitespace(body_start.line))
    } else {
        tail
    };
    Expectation::new(actual, expected)
}

/// Source text of the `as |...|` clause starting at `at`
pub fn block_params_text(block: &BlockInvocation, at: Coordinate, source: &SourceBuffer<'_>) -> String {
    let text = source
        .source_for(Span::between(at, block.program.span.start))
        .trim();
    let text = text.strip_suffix("}}").unwrap_or(text);
    let text = text.strip_suffix('~').unwrap_or(text).trim_end();
    if text.starts_with("as |") {
        text.to_string()
    } else {
        format!("as |{}|", block.program.block_params.join(" "))
    }
}

/// Width of the delimiter that closes an opening invocation or tag
pub fn closing_delimiter(node: &SyntaxNode) -> &'static str {
    match node {
        SyntaxNode::Element(element) if element.self_closing => "/>",
        SyntaxNode::Element(_) => ">",
        _ => "}}",
    }
}

/// Expected and actual start of the `}}`, `>` or `/>` closing the opening
/// invocation or tag, given the line the parameter list expects next
pub fn close_brace_expectation(node: &SyntaxNode, next_line: usize) -> Expectation {
    let width = closing_delimiter(node).len();
    let actual = opening_end(node).back(width);
    let expected = Coordinate::new(next_line, node.span().start.column);
    Expectation::new(actual, expected)
}

/// Expected and actual start of an element's `</tag>`
///
/// Returns `None` for elements without children.
pub fn closing_tag_expectation(element: &MarkupElement) -> Option<Expectation> {
    let last = element.children.last()?;
    let mut line = last.span().end.line;
    if last.is_block() {
        line += 1;
    }
    let actual = element.span.end.back(3 + element.tag.chars().count());
    let expected = Coordinate::new(line, element.span.start.column);
    Some(Expectation::new(actual, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Body, HashPair, InlineInvocation, PathExpression, SubExpression, TextNode};

    use pretty_assertions::assert_eq;

    fn entry(name: &'static str, line: usize, column: usize) -> ParamEntry<'static> {
        ParamEntry {
            kind: ParamKind::Named,
            name: Cow::Borrowed(name),
            start: Coordinate::new(line, column),
            absorbs_through: None,
        }
    }

    #[test]
    fn test_empty_list_returns_baseline() {
        let layout = align_params(Vec::new(), 2, 5);
        assert!(layout.checks.is_empty());
        assert_eq!(layout.next_line, 5);
    }

    #[test]
    fn test_each_entry_on_next_line() {
        let layout = align_params(vec![entry("a", 2, 2), entry("b", 3, 2)], 2, 2);
        let expected: Vec<_> = layout.checks.iter().map(|c| c.expectation.expected).collect();
        assert_eq!(expected, vec![Coordinate::new(2, 2), Coordinate::new(3, 2)]);
        assert!(layout.checks.iter().all(|c| c.expectation.is_satisfied()));
        assert_eq!(layout.next_line, 4);
    }

    #[test]
    fn test_multiline_value_absorbs_its_lines() {
        let mut wrapped = entry("a", 2, 2);
        wrapped.absorbs_through = Some(5);
        let layout = align_params(vec![wrapped, entry("b", 6, 2)], 2, 2);
        assert_eq!(layout.checks[1].expectation.expected, Coordinate::new(6, 2));
        assert_eq!(layout.next_line, 7);
    }

    #[test]
    fn test_line_or_column_alone_is_not_enough() {
        assert!(!Expectation::new(Coordinate::new(2, 4), Coordinate::new(2, 2)).is_satisfied());
        assert!(!Expectation::new(Coordinate::new(3, 2), Coordinate::new(2, 2)).is_satisfied());
    }

    #[test]
    fn test_subexpression_is_named_by_source() {
        let source = SourceBuffer::new("{{foo\n  (concat a b)\n}}");
        let param = Expression::SubExpression(SubExpression::new(
            PathExpression::new("concat", Span::new(2, 3, 2, 9)),
            Span::new(2, 2, 2, 14),
        ));
        let entry = ParamEntry::positional(&param, &source);
        assert_eq!(entry.name, "(concat a b)");
        assert_eq!(entry.absorbs_through, None);
    }

    #[test]
    fn test_synthetic_correction_only_for_synthetic_paths() {
        let program = Body::new(Span::new(3, 2, 4, 0));
        let plain = BlockInvocation::new(
            PathExpression::new("if", Span::new(1, 3, 1, 5)),
            program.clone(),
            Span::new(1, 0, 4, 7),
        )
        .with_params(vec![Expression::path("cond", Span::new(2, 2, 2, 6))]);
        assert_eq!(synthetic_correction(&plain), None);

        let synthetic = plain.clone().with_params(vec![Expression::Path(
            PathExpression::new("this", Span::new(1, 6, 1, 10)).synthetic(),
        )]);
        assert_eq!(synthetic_correction(&synthetic), Some(Coordinate::new(1, 5)));
    }

    #[test]
    fn test_block_params_without_arguments_on_next_line() {
        let src = "  {{#employees\nas |employee|}}\n    {{employee.name}}\n  {{/employees}}";
        let source = SourceBuffer::new(src);
        let block = BlockInvocation::new(
            PathExpression::new("employees", Span::new(1, 5, 1, 14)),
            Body::new(Span::new(2, 15, 4, 2)).with_block_params(["employee"]),
            Span::new(1, 2, 4, 16),
        );
        let expectation = block_params_expectation(&block, &source);
        assert_eq!(expectation.expected, Coordinate::new(2, 2));
        assert_eq!(expectation.actual, Coordinate::new(2, 0));
        assert_eq!(block_params_text(&block, expectation.actual, &source), "as |employee|");
    }

    #[test]
    fn test_block_params_without_arguments_on_same_line() {
        let src = "{{#employees as |employee|}}\n{{/employees}}";
        let source = SourceBuffer::new(src);
        let block = BlockInvocation::new(
            PathExpression::new("employees", Span::new(1, 3, 1, 12)),
            Body::new(Span::new(1, 28, 2, 0)).with_block_params(["employee"]),
            Span::new(1, 0, 2, 14),
        );
        let expectation = block_params_expectation(&block, &source);
        assert_eq!(expectation.actual, Coordinate::new(1, 12));
        assert_eq!(expectation.expected, Coordinate::new(2, 0));
        assert_eq!(block_params_text(&block, expectation.actual, &source), "as |employee|");
    }

    #[test]
    fn test_block_params_after_arguments_with_trailing_content() {
        let src = "{{#each\n  items as |item|}}\n{{/each}}";
        let source = SourceBuffer::new(src);
        let block = BlockInvocation::new(
            PathExpression::new("each", Span::new(1, 3, 1, 7)),
            Body::new(Span::new(2, 19, 3, 0)).with_block_params(["item"]),
            Span::new(1, 0, 3, 9),
        )
        .with_params(vec![Expression::path("items", Span::new(2, 2, 2, 7))]);
        let expectation = block_params_expectation(&block, &source);
        assert_eq!(expectation.actual, Coordinate::new(2, 7));
        assert_eq!(expectation.expected, Coordinate::new(3, 0));
    }

    #[test]
    fn test_block_params_pushed_down_after_arguments() {
        let src = "{{#each\n  items\nas |item|}}\n{{/each}}";
        let source = SourceBuffer::new(src);
        let block = BlockInvocation::new(
            PathExpression::new("each", Span::new(1, 3, 1, 7)),
            Body::new(Span::new(3, 11, 4, 0)).with_block_params(["item"]),
            Span::new(1, 0, 4, 9),
        )
        .with_params(vec![Expression::path("items", Span::new(2, 2, 2, 7))]);
        let expectation = block_params_expectation(&block, &source);
        assert!(expectation.is_satisfied());
        assert_eq!(expectation.actual, Coordinate::new(3, 0));
    }

    #[test]
    fn test_block_params_tail_uses_hash_end() {
        let src = "{{#foo\n  a=b\n  c=d\nas |x|}}\n{{/foo}}";
        let source = SourceBuffer::new(src);
        let block = BlockInvocation::new(
            PathExpression::new("foo", Span::new(1, 3, 1, 6)),
            Body::new(Span::new(4, 8, 5, 0)).with_block_params(["x"]),
            Span::new(1, 0, 5, 8),
        )
        .with_hash(Hash::new(vec![
            HashPair::new("a", Expression::path("b", Span::new(2, 4, 2, 5)), Span::new(2, 2, 2, 5)),
            HashPair::new("c", Expression::path("d", Span::new(3, 4, 3, 5)), Span::new(3, 2, 3, 5)),
        ]));
        let expectation = block_params_expectation(&block, &source);
        assert_eq!(expectation.expected, Coordinate::new(4, 0));
        assert!(expectation.is_satisfied());
    }

    #[test]
    fn test_crlf_trailing_carriage_return_counts_as_blank() {
        let src = "{{#each\r\n  items\r\nas |item|}}\r\n{{/each}}";
        let source = SourceBuffer::new(src);
        let block = BlockInvocation::new(
            PathExpression::new("each", Span::new(1, 3, 1, 7)),
            Body::new(Span::new(3, 11, 4, 0)).with_block_params(["item"]),
            Span::new(1, 0, 4, 9),
        )
        .with_params(vec![Expression::path("items", Span::new(2, 2, 2, 7))]);
        let expectation = block_params_expectation(&block, &source);
        assert_eq!(expectation.actual, Coordinate::new(3, 0));
    }

    #[test]
    fn test_close_brace_offsets() {
        let inline: SyntaxNode = InlineInvocation::new(
            PathExpression::new("foo", Span::new(1, 2, 1, 5)),
            Span::new(1, 0, 3, 2),
        )
        .into();
        assert_eq!(
            close_brace_expectation(&inline, 3),
            Expectation::new(Coordinate::new(3, 0), Coordinate::new(3, 0))
        );

        let input: SyntaxNode = MarkupElement::new("input", Span::new(1, 0, 3, 2)).self_closing().into();
        assert_eq!(close_brace_expectation(&input, 3).actual, Coordinate::new(3, 0));

        let div: SyntaxNode = MarkupElement::new("div", Span::new(1, 0, 4, 6))
            .with_children(vec![TextNode::new("\n", Span::new(3, 1, 4, 0)).into()])
            .into();
        assert_eq!(close_brace_expectation(&div, 3).actual, Coordinate::new(3, 0));
    }

    #[test]
    fn test_closing_tag_after_block_child() {
        let block: SyntaxNode = BlockInvocation::new(
            PathExpression::new("if", Span::new(2, 5, 2, 7)),
            Body::new(Span::new(2, 12, 4, 2)),
            Span::new(2, 2, 4, 9),
        )
        .into();
        let div = MarkupElement::new("div", Span::new(1, 0, 5, 6)).with_children(vec![block]);
        let expectation = closing_tag_expectation(&div).unwrap();
        assert_eq!(expectation.expected, Coordinate::new(5, 0));
        assert_eq!(expectation.actual, Coordinate::new(5, 0));

        assert_eq!(closing_tag_expectation(&MarkupElement::new("br", Span::new(1, 0, 1, 4))), None);
    }
}
