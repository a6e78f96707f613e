//! Decides whether a node's opening invocation is long enough to check

use crate::config::Options;
use crate::syntax::{Coordinate, SyntaxNode};

/// Coordinate at which the opening invocation or tag of `node` closes
///
/// For a block form this is where its body starts, for an element with
/// children where the first child starts, otherwise the node's own end.
pub fn opening_end(node: &SyntaxNode) -> Coordinate {
    match node {
        SyntaxNode::Block(block) => block.program.span.start,
        SyntaxNode::Element(element) => element
            .children
            .first()
            .map_or(element.span.end, |child| child.span().start),
        SyntaxNode::Inline(_) | SyntaxNode::Text(_) => node.span().end,
    }
}

/// Whether the rule applies to `node`
///
/// A single-line opening invocation applies only when it is longer than
/// `max_length`; one that already spans lines always applies.
pub fn can_apply_rule(node: &SyntaxNode, options: &Options) -> bool {
    let start = node.span().start;
    let end = opening_end(node);
    if end.line == start.line {
        end.column.saturating_sub(start.column) > options.max_length
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{
        Attribute, AttrValue, BlockInvocation, Body, Expression, Hash, HashPair, InlineInvocation,
        MarkupElement, PathExpression, Span, TextNode,
    };

    fn inline_of_width(width: usize) -> SyntaxNode {
        InlineInvocation::new(
            PathExpression::new("foo", Span::new(1, 2, 1, 5)),
            Span::new(1, 0, 1, width),
        )
        .into()
    }

    #[test]
    fn test_short_inline_is_skipped() {
        // {{foo bar=baz}}
        let node: SyntaxNode = InlineInvocation::new(
            PathExpression::new("foo", Span::new(1, 2, 1, 5)),
            Span::new(1, 0, 1, 15),
        )
        .with_hash(Hash::new(vec![HashPair::new(
            "bar",
            Expression::path("baz", Span::new(1, 10, 1, 13)),
            Span::new(1, 6, 1, 13),
        )]))
        .into();
        assert!(!can_apply_rule(&node, &Options::default()));
    }

    #[test]
    fn test_max_length_boundary() {
        let options = Options::default();
        assert!(!can_apply_rule(&inline_of_width(80), &options));
        assert!(can_apply_rule(&inline_of_width(81), &options));
    }

    #[test]
    fn test_multiline_inline_always_applies() {
        let node: SyntaxNode = InlineInvocation::new(
            PathExpression::new("foo", Span::new(1, 2, 1, 5)),
            Span::new(1, 0, 2, 2),
        )
        .into();
        assert!(can_apply_rule(&node, &Options::default().with_max_length(500)));
    }

    #[test]
    fn test_block_measures_up_to_body_start() {
        // {{#foo}}\n  text\n{{/foo}}
        let block: SyntaxNode = BlockInvocation::new(
            PathExpression::new("foo", Span::new(1, 3, 1, 6)),
            Body::new(Span::new(1, 8, 3, 0)),
            Span::new(1, 0, 3, 8),
        )
        .into();
        assert_eq!(opening_end(&block), Coordinate::new(1, 8));
        assert!(!can_apply_rule(&block, &Options::default()));
    }

    #[test]
    fn test_element_measures_up_to_first_child() {
        // <div class="a" id="b">\n</div>
        let element: SyntaxNode = MarkupElement::new("div", Span::new(1, 0, 2, 6))
            .with_attributes(vec![
                Attribute::new("class", AttrValue::text("a", Span::new(1, 11, 1, 14)), Span::new(1, 5, 1, 14)),
                Attribute::new("id", AttrValue::text("b", Span::new(1, 18, 1, 21)), Span::new(1, 15, 1, 21)),
            ])
            .with_children(vec![TextNode::new("\n", Span::new(1, 22, 2, 0)).into()])
            .into();
        assert_eq!(opening_end(&element), Coordinate::new(1, 22));
        assert!(!can_apply_rule(&element, &Options::default()));
    }

    #[test]
    fn test_childless_element_uses_own_end() {
        let element: SyntaxNode = MarkupElement::new("input", Span::new(1, 0, 3, 1)).into();
        assert_eq!(opening_end(&element), Coordinate::new(3, 1));
        assert!(can_apply_rule(&element, &Options::default()));
    }
}
