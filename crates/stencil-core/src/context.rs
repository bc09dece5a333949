//! The flat key/value context that drives template resolution.
//!
//! The engine never reads the process environment on its own. Callers build a
//! [`Context`] (from the environment, JSON files, explicit assignments) and hand
//! it to the registries, which read it once at construction.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, TemplateError};

/// String-valued key/value source for variables and conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: BTreeMap<String, String>,
}

/// Accepted shape of a JSON context file: a flat object of scalars.
#[derive(Deserialize)]
#[serde(transparent)]
struct ContextFile(BTreeMap<String, Value>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load a flat JSON object.
    ///
    /// Strings are taken verbatim; booleans and numbers are stringified
    /// (`true` becomes `"true"`). Nested values and `null` are rejected.
    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TemplateError::Context {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: ContextFile =
            serde_json::from_str(&contents).map_err(|e| TemplateError::Context {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut values = BTreeMap::new();
        for (key, value) in file.0 {
            let value = match value {
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(TemplateError::Context {
                        path: path.to_path_buf(),
                        message: format!("value for '{key}' must be a string, boolean or number, got {other}"),
                    })
                }
            };
            values.insert(key, value);
        }
        Ok(Self { values })
    }

    /// Split a `KEY=VALUE` assignment. The value may itself contain `=`.
    pub fn parse_assignment(assignment: &str) -> Option<(String, String)> {
        let (key, value) = assignment.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), value.to_string()))
    }

    /// Overlay `other` onto `self`; keys in `other` win.
    pub fn merge(&mut self, other: Context) {
        self.values.extend(other.values);
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// `true` when the value, lowercased, is exactly `"true"`. Absent keys are `false`.
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
