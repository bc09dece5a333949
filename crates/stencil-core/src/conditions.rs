//! Condition registry: named boolean predicates behind `{{#IF_NAME}}` blocks.
//!
//! The registry captures its [`Context`] at construction; predicates are
//! evaluated against that snapshot only. Composite conditions are ordinary
//! predicates built with [`any_of`], so the template syntax stays a plain name.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::context::Context;

/// A boolean test over the context.
pub type Predicate = Arc<dyn Fn(&Context) -> bool + Send + Sync>;

/// True when `key` is set to `"true"` (case-insensitive).
pub fn flag(key: &str) -> Predicate {
    let key = key.to_string();
    Arc::new(move |ctx: &Context| ctx.is_true(&key))
}

/// True when any of `predicates` is true.
pub fn any_of(predicates: Vec<Predicate>) -> Predicate {
    Arc::new(move |ctx: &Context| predicates.iter().any(|p| p(ctx)))
}

/// True when `key` holds a decimal integer greater than zero, of any magnitude.
pub fn positive_int(key: &str) -> Predicate {
    let key = key.to_string();
    Arc::new(move |ctx: &Context| ctx.get(&key).is_some_and(is_positive_integer))
}

fn is_positive_integer(value: &str) -> bool {
    let value = value.trim();
    let digits = value.strip_prefix('+').unwrap_or(value);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits.bytes().any(|b| b != b'0')
}

/// Named conditions bound to a context snapshot.
pub struct ConditionRegistry {
    context: Context,
    conditions: BTreeMap<String, Predicate>,
}

impl ConditionRegistry {
    /// An empty registry over `context`.
    pub fn new(context: Context) -> Self {
        Self {
            context,
            conditions: BTreeMap::new(),
        }
    }

    /// The project-skeleton condition table.
    pub fn standard(context: Context) -> Self {
        let mut registry = Self::new(context);

        // Languages
        registry.register("IF_PYTHON", flag("INCLUDE_PYTHON"));
        registry.register("IF_GO", flag("INCLUDE_GO"));
        registry.register("IF_NODE", flag("INCLUDE_NODE"));
        registry.register("IF_RUST", flag("INCLUDE_RUST"));

        // Infrastructure
        registry.register("IF_POSTGRES", flag("INCLUDE_POSTGRES"));
        registry.register("IF_REDIS", flag("INCLUDE_REDIS"));
        registry.register(
            "IF_HAS_SERVICES",
            any_of(vec![flag("INCLUDE_POSTGRES"), flag("INCLUDE_REDIS")]),
        );

        // AI workflows
        registry.register("IF_AI_SESSIONS", flag("INCLUDE_AI_SESSIONS"));
        registry.register("IF_AI_PROMPTS", flag("INCLUDE_AI_PROMPTS"));

        // Quality and tooling
        registry.register("IF_QUALITY_CHECKS", flag("INCLUDE_QUALITY_CHECKS"));
        registry.register("IF_COVERAGE_ENABLED", positive_int("COVERAGE_THRESHOLD"));
        registry.register("IF_PRECOMMIT", flag("INCLUDE_PRECOMMIT"));
        registry.register("IF_PULUMI", flag("INCLUDE_PULUMI"));
        registry.register("IF_GH_CLI", flag("INCLUDE_GH_CLI"));
        registry.register("IF_CLAUDE_CODE", flag("INCLUDE_CLAUDE_CODE"));
        registry.register("IF_INFISICAL", flag("INCLUDE_INFISICAL"));
        registry.register("IF_GCLOUD", flag("INCLUDE_GCLOUD"));

        tracing::debug!(conditions = registry.conditions.len(), "built condition registry");
        registry
    }

    /// Register or replace a condition.
    pub fn register(&mut self, name: impl Into<String>, predicate: Predicate) -> &mut Self {
        self.conditions.insert(name.into(), predicate);
        self
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    /// Evaluate a condition by name.
    ///
    /// Unknown names are not an error: a warning is logged and the condition
    /// is treated as `false`.
    pub fn evaluate(&self, name: &str) -> bool {
        match self.conditions.get(name) {
            Some(predicate) => predicate(&self.context),
            None => {
                tracing::warn!("unknown condition '{name}', treating as false");
                false
            }
        }
    }
}
