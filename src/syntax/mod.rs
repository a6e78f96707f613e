//! Syntax tree and source access for curly-brace templates

pub mod ast;
pub mod source;

pub use ast::{
    AttrValue, Attribute, BlockInvocation, Body, Coordinate, Expression, Hash, HashPair,
    InlineInvocation, MarkupElement, PathExpression, Span, SubExpression, SyntaxNode, TextNode,
};
pub use source::SourceBuffer;
