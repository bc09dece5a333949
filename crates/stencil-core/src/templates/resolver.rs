//! Conditional block elimination.
//!
//! Folds a parsed [`Template`] against a [`ConditionRegistry`]: each conditional
//! is replaced by its selected branch, and only that branch is visited further.
//! Conditions inside a discarded branch are never evaluated, so they cannot
//! trigger unknown-condition warnings. Variable placeholders are emitted
//! verbatim for the substitutor.

use std::path::Path;

use crate::conditions::ConditionRegistry;
use crate::error::Result;
use crate::templates::ast::{Node, Template};

pub struct ConditionalResolver<'r> {
    conditions: &'r ConditionRegistry,
}

impl<'r> ConditionalResolver<'r> {
    pub fn new(conditions: &'r ConditionRegistry) -> Self {
        Self { conditions }
    }

    /// Parse `text` and remove every conditional block.
    pub fn resolve(&self, text: &str) -> Result<String> {
        self.resolve_with_path(text, None)
    }

    pub fn resolve_with_path(&self, text: &str, path: Option<&Path>) -> Result<String> {
        let template = Template::parse_with_path(text, path)?;
        Ok(self.render(&template))
    }

    pub fn render(&self, template: &Template<'_>) -> String {
        let mut out = String::new();
        self.render_nodes(template.nodes(), &mut out);
        out
    }

    fn render_nodes(&self, nodes: &[Node<'_>], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Variable { raw, .. } => out.push_str(raw),
                Node::Conditional(block) => {
                    let taken = self.conditions.evaluate(block.name);
                    tracing::trace!(condition = block.name, taken, "resolved conditional");
                    let branch = if taken {
                        &block.then_branch
                    } else {
                        &block.else_branch
                    };
                    self.render_nodes(branch, out);
                }
            }
        }
    }
}
