//! The attribute-indentation rule
//!
//! Flags misaligned arguments, attributes, block params and closing
//! delimiters of invocations and elements whose opening part is long or
//! already spans lines:
//!
//! ```text
//! {{#my-component
//!   firstName=user.first
//!   lastName=user.last
//! as |card|}}
//!   {{card.title}}
//! {{/my-component}}
//! ```
//!
//! Each node is checked on its own; nothing is carried between nodes.

pub mod gate;
pub mod position;
pub mod validate;

use crate::config::Options;
use crate::diagnostic::DiagnosticSink;
use crate::error::ConfigError;
use crate::syntax::{AttrValue, BlockInvocation, MarkupElement, SourceBuffer, SyntaxNode};

pub use gate::{can_apply_rule, opening_end};
pub use position::Expectation;
pub use validate::{validate_block_params, validate_close_brace, validate_closing_tag, validate_params};

/// The rule, activated with normalized options for one template
#[derive(Debug, Clone)]
pub struct AttributeIndentation<'a> {
    options: Options,
    source: SourceBuffer<'a>,
}

impl<'a> AttributeIndentation<'a> {
    pub fn new(options: Options, source: &'a str) -> Self {
        Self {
            options,
            source: SourceBuffer::new(source),
        }
    }

    /// Activate the rule from a raw configuration value
    ///
    /// Returns `Ok(None)` when the configuration disables the rule.
    pub fn from_config(config: Option<&toml::Value>, source: &'a str) -> Result<Option<Self>, ConfigError> {
        Ok(Options::from_value(config)?.map(|options| Self::new(options, source)))
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Check one node, without descending into its children
    #[tracing::instrument(level = "debug", skip_all, fields(at = %node.span().start))]
    pub fn visit(&self, node: &SyntaxNode, sink: &mut dyn DiagnosticSink) {
        match node {
            SyntaxNode::Block(block) => self.visit_block(node, block, sink),
            SyntaxNode::Inline(inline) => {
                if inline.has_arguments() && self.applies(node) {
                    let next_line = validate_params(node, &self.options, &self.source, sink);
                    validate_close_brace(node, next_line, &self.source, sink);
                }
            }
            SyntaxNode::Element(element) => self.visit_element(node, element, sink),
            SyntaxNode::Text(_) => {}
        }
    }

    fn visit_block(&self, node: &SyntaxNode, block: &BlockInvocation, sink: &mut dyn DiagnosticSink) {
        if !self.applies(node) {
            return;
        }
        if block.has_arguments() {
            validate_params(node, &self.options, &self.source, sink);
        }
        if !block.program.block_params.is_empty() {
            validate_block_params(block, &self.source, sink);
        }
    }

    fn visit_element(&self, node: &SyntaxNode, element: &MarkupElement, sink: &mut dyn DiagnosticSink) {
        if !self.options.process_elements || !self.applies(node) {
            return;
        }
        if !element.attributes.is_empty() {
            let next_line = validate_params(node, &self.options, &self.source, sink);
            validate_close_brace(node, next_line, &self.source, sink);
        }
        if !element.children.is_empty() {
            validate_closing_tag(element, &self.source, sink);
        }
    }

    fn applies(&self, node: &SyntaxNode) -> bool {
        let applies = can_apply_rule(node, &self.options);
        if !applies {
            tracing::debug!(end = %opening_end(node), "opening invocation fits on one line, skipping");
        }
        applies
    }

    /// Visit `nodes` and everything below them, depth first
    ///
    /// Mustache attribute values are visited as inline invocations.
    pub fn check(&self, nodes: &[SyntaxNode], sink: &mut dyn DiagnosticSink) {
        for node in nodes {
            self.visit(node, sink);
            match node {
                SyntaxNode::Block(block) => {
                    self.check(&block.program.children, sink);
                    if let Some(inverse) = &block.inverse {
                        self.check(&inverse.children, sink);
                    }
                }
                SyntaxNode::Element(element) => {
                    for attribute in &element.attributes {
                        if let AttrValue::Mustache(mustache) = &attribute.value {
                            self.visit(&SyntaxNode::Inline(mustache.clone()), sink);
                        }
                    }
                    self.check(&element.children, sink);
                }
                SyntaxNode::Inline(_) | SyntaxNode::Text(_) => {}
            }
        }
    }
}
