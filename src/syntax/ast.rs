//! Syntax tree types for curly-brace templates
//!
//! Trees are built by a template parser outside this crate. Every node carries
//! a fully-resolved [`Span`]; the lint rule reads these spans and never edits
//! them.

use std::fmt;

/// A position in source text: 1-based line, 0-based column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coordinate {
    pub line: usize,
    pub column: usize,
}

impl Coordinate {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Move this coordinate `n` columns to the left, stopping at column 0
    pub fn back(self, n: usize) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_sub(n),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}:C{}", self.line, self.column)
    }
}

/// Start and end coordinates of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Span {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start: Coordinate::new(start_line, start_column),
            end: Coordinate::new(end_line, end_column),
        }
    }

    pub fn between(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    pub fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }
}

/// Target name of an invocation, e.g. `foo-bar` in `{{foo-bar}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    pub original: String,
    pub span: Span,
    /// Inserted by the parser rather than present in source
    pub synthetic: bool,
}

impl PathExpression {
    pub fn new(original: impl Into<String>, span: Span) -> Self {
        Self {
            original: original.into(),
            span,
            synthetic: false,
        }
    }

    /// Mark this path as parser-inserted
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }
}

/// A value passed to an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A bare name: `user.name`
    Path(PathExpression),
    /// String, number, boolean, null or undefined literal, kept as written
    Literal { raw: String, span: Span },
    /// A nested call: `(concat a b)`
    SubExpression(SubExpression),
}

impl Expression {
    pub fn path(original: impl Into<String>, span: Span) -> Self {
        Expression::Path(PathExpression::new(original, span))
    }

    pub fn literal(raw: impl Into<String>, span: Span) -> Self {
        Expression::Literal {
            raw: raw.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Expression::Path(path) => path.span,
            Expression::Literal { span, .. } => *span,
            Expression::SubExpression(sub) => sub.span,
        }
    }

    /// Sub-expressions that wrap across lines push later arguments down
    pub fn multiline_end(&self) -> Option<usize> {
        match self {
            Expression::SubExpression(sub) if sub.span.is_multiline() => Some(sub.span.end.line),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubExpression {
    pub path: PathExpression,
    pub params: Vec<Expression>,
    pub hash: Hash,
    pub span: Span,
}

impl SubExpression {
    pub fn new(path: PathExpression, span: Span) -> Self {
        Self {
            hash: Hash::empty(span.end),
            path,
            params: Vec::new(),
            span,
        }
    }

    pub fn with_params(mut self, params: Vec<Expression>) -> Self {
        self.params = params;
        self
    }

    pub fn with_hash(mut self, hash: Hash) -> Self {
        self.hash = hash;
        self
    }
}

/// A `key=value` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashPair {
    pub key: String,
    pub value: Expression,
    pub span: Span,
}

impl HashPair {
    pub fn new(key: impl Into<String>, value: Expression, span: Span) -> Self {
        Self {
            key: key.into(),
            value,
            span,
        }
    }
}

/// The group of named arguments of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hash {
    pub pairs: Vec<HashPair>,
    pub span: Span,
}

impl Hash {
    pub fn new(pairs: Vec<HashPair>) -> Self {
        let span = match (pairs.first(), pairs.last()) {
            (Some(first), Some(last)) => Span::between(first.span.start, last.span.end),
            _ => Span::default(),
        };
        Self { pairs, span }
    }

    /// An empty hash positioned at `at`
    pub fn empty(at: Coordinate) -> Self {
        Self {
            pairs: Vec::new(),
            span: Span::between(at, at),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// `{{name arg key=value}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineInvocation {
    pub path: PathExpression,
    pub params: Vec<Expression>,
    pub hash: Hash,
    pub span: Span,
}

impl InlineInvocation {
    pub fn new(path: PathExpression, span: Span) -> Self {
        Self {
            hash: Hash::empty(span.end),
            path,
            params: Vec::new(),
            span,
        }
    }

    pub fn with_params(mut self, params: Vec<Expression>) -> Self {
        self.params = params;
        self
    }

    pub fn with_hash(mut self, hash: Hash) -> Self {
        self.hash = hash;
        self
    }

    pub fn has_arguments(&self) -> bool {
        !self.params.is_empty() || !self.hash.is_empty()
    }
}

/// Contents of a block form between its opening and closing invocations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub span: Span,
    /// Names bound by `as |...|`
    pub block_params: Vec<String>,
    pub children: Vec<SyntaxNode>,
}

impl Body {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            block_params: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_block_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block_params = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }
}

/// `{{#name arg key=value as |x|}}...{{/name}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInvocation {
    pub path: PathExpression,
    pub params: Vec<Expression>,
    pub hash: Hash,
    pub program: Body,
    /// The `{{else}}` branch, if any
    pub inverse: Option<Body>,
    pub span: Span,
}

impl BlockInvocation {
    pub fn new(path: PathExpression, program: Body, span: Span) -> Self {
        Self {
            hash: Hash::empty(program.span.start),
            path,
            params: Vec::new(),
            program,
            inverse: None,
            span,
        }
    }

    pub fn with_params(mut self, params: Vec<Expression>) -> Self {
        self.params = params;
        self
    }

    pub fn with_hash(mut self, hash: Hash) -> Self {
        self.hash = hash;
        self
    }

    pub fn with_inverse(mut self, inverse: Body) -> Self {
        self.inverse = Some(inverse);
        self
    }

    pub fn has_arguments(&self) -> bool {
        !self.params.is_empty() || !self.hash.is_empty()
    }
}

/// Value of a markup attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `class="a b"` or a valueless attribute
    Text { chars: String, span: Span },
    /// `class={{classNames}}`
    Mustache(InlineInvocation),
    /// `class="a {{b}}"`
    Concat { span: Span },
}

impl AttrValue {
    pub fn text(chars: impl Into<String>, span: Span) -> Self {
        AttrValue::Text {
            chars: chars.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
    pub span: Span,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: AttrValue, span: Span) -> Self {
        Self {
            name: name.into(),
            value,
            span,
        }
    }
}

/// `<tag attr="value">...</tag>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<SyntaxNode>,
    pub self_closing: bool,
    pub span: Span,
}

impl MarkupElement {
    pub fn new(tag: impl Into<String>, span: Span) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
            span,
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }
}

/// Raw text between other nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub chars: String,
    pub span: Span,
}

impl TextNode {
    pub fn new(chars: impl Into<String>, span: Span) -> Self {
        Self {
            chars: chars.into(),
            span,
        }
    }
}

/// A node the rule can be handed by the tree walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    Block(BlockInvocation),
    Inline(InlineInvocation),
    Element(MarkupElement),
    Text(TextNode),
}

impl SyntaxNode {
    pub fn span(&self) -> Span {
        match self {
            SyntaxNode::Block(block) => block.span,
            SyntaxNode::Inline(inline) => inline.span,
            SyntaxNode::Element(element) => element.span,
            SyntaxNode::Text(text) => text.span,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, SyntaxNode::Block(_))
    }
}

impl From<BlockInvocation> for SyntaxNode {
    fn from(node: BlockInvocation) -> Self {
        SyntaxNode::Block(node)
    }
}

impl From<InlineInvocation> for SyntaxNode {
    fn from(node: InlineInvocation) -> Self {
        SyntaxNode::Inline(node)
    }
}

impl From<MarkupElement> for SyntaxNode {
    fn from(node: MarkupElement) -> Self {
        SyntaxNode::Element(node)
    }
}

impl From<TextNode> for SyntaxNode {
    fn from(node: TextNode) -> Self {
        SyntaxNode::Text(node)
    }
}
