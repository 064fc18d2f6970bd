//! Scoped scenario variables and template substitution.
//!
//! One store per scenario context, no cross-scenario visibility. Values are
//! [`serde_json::Value`], so steps can stash strings, numbers, or whole
//! structures and get them back typed.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Key/value store scoped to one scenario execution
#[derive(Debug, Default)]
pub struct ScopedVariables {
    values: HashMap<String, Value>,
}

impl ScopedVariables {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a variable, if bound
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Bind a variable, silently overwriting any previous binding
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Bind any serializable value.
    ///
    /// Serialization failures are impossible for plain data types; a type
    /// with a failing `Serialize` impl is stored as `Value::Null`.
    pub fn put_serialize<T: Serialize>(&mut self, name: impl Into<String>, value: &T) {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.values.insert(name.into(), value);
    }

    /// Remove a binding, returning the previous value if any
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Number of bound variables
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop all bindings
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Replace every `{name}` token bound in this store with the string form
    /// of its value.
    ///
    /// Unbound tokens pass through verbatim, so scenario text may contain
    /// brace-delimited literals. Single pass: substituted text is never
    /// rescanned, so recursively defined values cannot expand unboundedly.
    #[must_use]
    pub fn replace_variables(&self, template: &str) -> String {
        // Token syntax is fixed, so the pattern is known-good.
        let token = regex::Regex::new(r"\{([^{}]+)\}").expect("valid token pattern");
        token
            .replace_all(template, |captures: &regex::Captures<'_>| {
                let name = &captures[1];
                self.get(name)
                    .map_or_else(|| captures[0].to_string(), display_value)
            })
            .into_owned()
    }
}

/// String form of a stored value: strings unquoted, everything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
