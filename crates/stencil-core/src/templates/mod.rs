//! Directive parsing and the two resolution passes.
//!
//! ## Syntax
//!
//! - `{{NAME}}` — replaced by a variable from the [`crate::variables::VariableRegistry`]
//! - `{{#IF_X}} ... {{/IF_X}}` — kept only when condition `IF_X` holds
//! - `{{#IF_X}} ... {{#ELSE}} ... {{/IF_X}}` — one branch or the other
//!
//! `X` matches `[A-Z_]+` and `NAME` matches `[A-Z][A-Z0-9_]*`. `${{ ... }}` is
//! never touched, so CI workflow files can be templated safely.
//!
//! ## Passes
//!
//! 1. [`lexer`] splits text into literal runs and directives.
//! 2. [`ast`] builds a tree of text, variable and conditional nodes.
//! 3. [`resolver`] folds the tree against the condition registry.
//! 4. [`substitute`] replaces placeholders left in the resolved text.

pub mod ast;
pub mod lexer;
pub mod resolver;
pub mod substitute;

pub use ast::{Conditional, Node, Template, MAX_NESTING_DEPTH};
pub use resolver::ConditionalResolver;
pub use substitute::substitute;
