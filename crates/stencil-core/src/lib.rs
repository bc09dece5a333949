//! Core library for the stencil project-skeleton generator.
//!
//! Resolves template files containing two kinds of directives, variable
//! placeholders (`{{NAME}}`) and conditional blocks (`{{#IF_X}}...{{/IF_X}}`),
//! against a flat key/value [`context::Context`].
//!
//! A processing run builds a [`variables::VariableRegistry`] and a
//! [`conditions::ConditionRegistry`] from the context once, then the
//! [`processor::TemplateProcessor`] eliminates conditional blocks, substitutes
//! variables and normalizes trailing whitespace. The engine never reads the
//! process environment itself; the caller decides where the context comes from.

pub mod conditions;
pub mod context;
pub mod error;
pub mod processor;
pub mod templates;
pub mod variables;
