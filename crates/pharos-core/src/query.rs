//! Parameterized queries sent to the content backend.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A named query with its parameters.
///
/// `name` identifies the query in logs and test doubles; `text` is what the
/// backend executes. Parameters are referenced in `text` as `$name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub name: &'static str,
    pub text: &'static str,
    pub params: BTreeMap<String, Value>,
}

impl Query {
    pub fn new(name: &'static str, text: &'static str) -> Self {
        Self {
            name,
            text,
            params: BTreeMap::new(),
        }
    }

    /// Add a named parameter.
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}
