//! Attribute Indentation - a layout lint rule for curly-brace templates
//!
//! This library checks the layout of long component invocations, block forms
//! and markup elements in a template that has already been parsed. It does
//! not parse templates itself: it is handed a syntax tree with resolved
//! line/column spans and the source text the tree was parsed from.
//!
//! # Example
//!
//! ```rust
//! use attribute_indentation::{lint, Expression, Hash, HashPair, InlineInvocation, PathExpression, Span};
//!
//! let source = "{{my-component\n    name=user.name\n}}";
//! let node = InlineInvocation::new(
//!     PathExpression::new("my-component", Span::new(1, 2, 1, 14)),
//!     Span::new(1, 0, 3, 2),
//! )
//! .with_hash(Hash::new(vec![HashPair::new(
//!     "name",
//!     Expression::path("user.name", Span::new(2, 9, 2, 18)),
//!     Span::new(2, 4, 2, 18),
//! )]));
//!
//! let diagnostics = lint(source, &[node.into()]);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!((diagnostics[0].line, diagnostics[0].column), (2, 4));
//! ```

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod rule;
pub mod syntax;

pub use config::Options;
pub use diagnostic::{Diagnostic, DiagnosticSink, RULE_NAME};
pub use error::ConfigError;
pub use rule::AttributeIndentation;
pub use syntax::{
    AttrValue, Attribute, BlockInvocation, Body, Coordinate, Expression, Hash, HashPair,
    InlineInvocation, MarkupElement, PathExpression, SourceBuffer, Span, SubExpression, SyntaxNode,
    TextNode,
};

/// Check a parsed template with the rule enabled as `true`
pub fn lint(source: &str, nodes: &[SyntaxNode]) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    AttributeIndentation::new(Options::default(), source).check(nodes, &mut diagnostics);
    diagnostics
}

/// Check a parsed template with a raw configuration value
///
/// A disabled rule reports nothing.
///
/// # Example
///
/// ```rust
/// use attribute_indentation::{lint_with_config, ConfigError};
///
/// let err = lint_with_config("", &[], Some(&toml::Value::Integer(3))).unwrap_err();
/// assert!(matches!(err, ConfigError::InvalidShape { .. }));
/// ```
pub fn lint_with_config(
    source: &str,
    nodes: &[SyntaxNode],
    config: Option<&toml::Value>,
) -> Result<Vec<Diagnostic>, ConfigError> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    if let Some(rule) = AttributeIndentation::from_config(config, source)? {
        rule.check(nodes, &mut diagnostics);
    }
    Ok(diagnostics)
}
