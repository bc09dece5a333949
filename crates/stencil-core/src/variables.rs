//! Variable registry: declared `{{NAME}}` placeholders and derived values.
//!
//! Every declared variable has a default, so resolution is total: each declared
//! name always has a value regardless of what the [`Context`] contains.
//!
//! Derived variables are computed in a single pass from the resolved base
//! values. They never see each other's output.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::context::Context;

/// A substitutable placeholder backed by a context key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    /// Placeholder name, upper snake case.
    pub name: String,
    /// Key looked up in the [`Context`].
    pub context_key: String,
    /// Value used when the key is absent.
    pub default: String,
}

/// Computes extra variables from the resolved base values.
pub type DerivedFn = Box<dyn Fn(&BTreeMap<String, String>) -> BTreeMap<String, String> + Send + Sync>;

/// Final `name -> value` mapping used by the substitutor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedVariableSet {
    values: BTreeMap<String, String>,
}

impl ResolvedVariableSet {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolvedVariableSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Declared variables plus derivation functions.
#[derive(Default)]
pub struct VariableRegistry {
    definitions: Vec<VariableDefinition>,
    derived: Vec<DerivedFn>,
}

impl VariableRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The project-skeleton variable table.
    pub fn standard() -> Self {
        let mut registry = Self::new();

        // Project metadata
        registry.declare("PROJECT_NAME", "PROJECT_NAME", "my-project");
        registry.declare("PROJECT_NAME_SNAKE", "PROJECT_NAME_SNAKE", "my_project");
        registry.declare("PROJECT_NAME_KEBAB", "PROJECT_NAME_KEBAB", "my-project");
        registry.declare("PROJECT_DESCRIPTION", "PROJECT_DESCRIPTION", "A new project");
        registry.declare("GITHUB_ORG", "GITHUB_ORG", "myorg");

        // Language versions
        registry.declare("PYTHON_VERSION", "PYTHON_VERSION", "3.12");
        registry.declare("GO_VERSION", "GO_VERSION", "1.22.0");
        registry.declare("NODE_VERSION", "NODE_VERSION", "20");
        registry.declare("RUST_VERSION", "RUST_VERSION", "stable");

        // Infrastructure
        registry.declare("POSTGRES_VERSION", "POSTGRES_VERSION", "16");
        registry.declare("REDIS_VERSION", "REDIS_VERSION", "7");
        registry.declare("DB_NAME", "DB_NAME", "app_dev");
        registry.declare("DB_USER", "DB_USER", "app_user");
        registry.declare("DB_PASSWORD", "DB_PASSWORD", "dev_password");

        // Quality
        registry.declare("COVERAGE_THRESHOLD", "COVERAGE_THRESHOLD", "80");

        registry.derive(|base| {
            let version = lookup(base, "PYTHON_VERSION", "3.12");
            single("PYTHON_VERSION_NODOT", python_nodot(version))
        });
        registry.derive(|base| {
            let version = lookup(base, "GO_VERSION", "1.22.0");
            single("GO_VERSION_SHORT", major_minor(version))
        });
        registry.derive(|base| {
            let version = lookup(base, "RUST_VERSION", "stable");
            single("RUST_MSRV", rust_msrv(version))
        });

        registry
    }

    /// Declare a variable. A later declaration of the same name replaces the earlier one.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        context_key: impl Into<String>,
        default: impl Into<String>,
    ) -> &mut Self {
        let definition = VariableDefinition {
            name: name.into(),
            context_key: context_key.into(),
            default: default.into(),
        };
        self.definitions.retain(|d| d.name != definition.name);
        self.definitions.push(definition);
        self
    }

    /// Register a derivation, evaluated after all base variables are resolved.
    pub fn derive<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&BTreeMap<String, String>) -> BTreeMap<String, String> + Send + Sync + 'static,
    {
        self.derived.push(Box::new(f));
        self
    }

    pub fn definitions(&self) -> &[VariableDefinition] {
        &self.definitions
    }

    /// Resolve every declared variable against `context`, then merge derived values.
    ///
    /// Derived values overwrite base values on a name collision.
    pub fn resolve(&self, context: &Context) -> ResolvedVariableSet {
        let base: BTreeMap<String, String> = self
            .definitions
            .iter()
            .map(|d| {
                let value = context.get_or(&d.context_key, &d.default);
                (d.name.clone(), value.to_string())
            })
            .collect();

        let mut values = base.clone();
        for derive in &self.derived {
            values.extend(derive(&base));
        }

        tracing::debug!(
            base = base.len(),
            total = values.len(),
            "resolved template variables"
        );
        ResolvedVariableSet { values }
    }
}

fn lookup<'a>(base: &'a BTreeMap<String, String>, name: &str, fallback: &'a str) -> &'a str {
    base.get(name).map(String::as_str).unwrap_or(fallback)
}

fn single(name: &str, value: String) -> BTreeMap<String, String> {
    BTreeMap::from([(name.to_string(), value)])
}

/// `3.12` → `312`, for tool settings such as ruff's `target-version = "py312"`.
fn python_nodot(version: &str) -> String {
    version.replace('.', "")
}

/// `1.22.0` → `1.22`; go.mod only accepts major.minor. Versions with fewer
/// than two components are returned unchanged.
fn major_minor(version: &str) -> String {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() >= 2 {
        parts[..2].join(".")
    } else {
        version.to_string()
    }
}

/// Channel names have no concrete MSRV; fall back to a fixed one.
fn rust_msrv(version: &str) -> String {
    match version {
        "stable" | "nightly" | "beta" => "1.75".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_declared_name() {
        let registry = VariableRegistry::standard();
        let vars = registry.resolve(&Context::new());
        for def in registry.definitions() {
            assert_eq!(vars.get(&def.name), Some(def.default.as_str()), "{}", def.name);
        }
        assert_eq!(vars.get("PYTHON_VERSION_NODOT"), Some("312"));
        assert_eq!(vars.get("GO_VERSION_SHORT"), Some("1.22"));
        assert_eq!(vars.get("RUST_MSRV"), Some("1.75"));
    }

    #[test]
    fn test_context_overrides_default() {
        let ctx = Context::from_pairs([("PROJECT_NAME", "acme"), ("PYTHON_VERSION", "3.11")]);
        let vars = VariableRegistry::standard().resolve(&ctx);
        assert_eq!(vars.get("PROJECT_NAME"), Some("acme"));
        assert_eq!(vars.get("PYTHON_VERSION_NODOT"), Some("311"));
        assert_eq!(vars.get("GITHUB_ORG"), Some("myorg"));
    }

    #[test]
    fn test_empty_context_value_is_kept() {
        let ctx = Context::from_pairs([("GITHUB_ORG", "")]);
        let vars = VariableRegistry::standard().resolve(&ctx);
        assert_eq!(vars.get("GITHUB_ORG"), Some(""));
    }

    #[test]
    fn test_major_minor() {
        assert_eq!(major_minor("1.22.0"), "1.22");
        assert_eq!(major_minor("1.21"), "1.21");
        assert_eq!(major_minor("1"), "1");
        assert_eq!(major_minor("1.23.4.5"), "1.23");
    }

    #[test]
    fn test_rust_msrv() {
        assert_eq!(rust_msrv("stable"), "1.75");
        assert_eq!(rust_msrv("nightly"), "1.75");
        assert_eq!(rust_msrv("beta"), "1.75");
        assert_eq!(rust_msrv("1.80"), "1.80");
    }

    #[test]
    fn test_derived_overwrites_base_on_collision() {
        let mut registry = VariableRegistry::new();
        registry.declare("NAME", "NAME", "base");
        registry.derive(|_| single("NAME", "derived".into()));
        let vars = registry.resolve(&Context::new());
        assert_eq!(vars.get("NAME"), Some("derived"));
    }

    #[test]
    fn test_derived_sees_only_base_values() {
        let mut registry = VariableRegistry::new();
        registry.declare("A", "A", "a");
        registry.derive(|_| single("B", "b".into()));
        registry.derive(|base| single("SEEN_B", base.contains_key("B").to_string()));
        let vars = registry.resolve(&Context::new());
        assert_eq!(vars.get("SEEN_B"), Some("false"));
    }

    #[test]
    fn test_redeclare_replaces() {
        let mut registry = VariableRegistry::new();
        registry.declare("X", "X_KEY", "one").declare("X", "OTHER_KEY", "two");
        assert_eq!(registry.definitions().len(), 1);
        let vars = registry.resolve(&Context::from_pairs([("OTHER_KEY", "ctx")]));
        assert_eq!(vars.get("X"), Some("ctx"));
    }
}
