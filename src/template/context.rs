//! Template context
//!
//! An explicit mapping from parameter name to value handed to a render.

use std::collections::BTreeMap;

use minijinja::Value;
use serde::Serialize;

use crate::constants::FILE_NAME_KEY;
use crate::errors::{reserved_context_key_error, Result};

/// Named values substituted into a template
///
/// Keys are kept sorted so renders and log output are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    values: BTreeMap<String, Value>,
}

impl TemplateContext {
    /// Creates an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context from any map of serializable values
    ///
    /// Used to turn the YAML values of a generation manifest into template
    /// values.
    pub fn from_serializable<S: Serialize>(values: &BTreeMap<String, S>) -> Self {
        let values = values
            .iter()
            .map(|(key, value)| (key.clone(), Value::from_serialize(value)))
            .collect();
        TemplateContext { values }
    }

    /// Adds a value and returns the context, for chained construction
    ///
    /// # Examples
    /// ```
    /// use tmplgen::template::TemplateContext;
    ///
    /// let context = TemplateContext::new()
    ///     .with("namespace", "IGC")
    ///     .with("count", 3);
    /// assert_eq!(context.len(), 2);
    /// ```
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, returning the one it replaced
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Inserts any serializable value
    pub fn insert_serialize<K: Into<String>, S: Serialize>(
        &mut self,
        key: K,
        value: &S,
    ) -> Option<Value> {
        self.values.insert(key.into(), Value::from_serialize(value))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a new context with `overrides` layered on top of `self`
    pub fn merged(&self, overrides: &TemplateContext) -> TemplateContext {
        let mut values = self.values.clone();
        values.extend(
            overrides
                .values
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        TemplateContext { values }
    }

    /// Fails if the caller set a key the writer injects on its own
    pub fn check_reserved_keys(&self) -> Result<()> {
        if self.contains_key(FILE_NAME_KEY) {
            return Err(reserved_context_key_error(FILE_NAME_KEY));
        }
        Ok(())
    }

    /// Produces the values for a render of `file_name`
    ///
    /// # Errors
    /// Returns `Error::ReservedContextKey` if the context already holds `file_name`
    pub(crate) fn render_values(&self, file_name: &str) -> Result<BTreeMap<String, Value>> {
        self.check_reserved_keys()?;
        let mut values = self.values.clone();
        values.insert(FILE_NAME_KEY.to_string(), Value::from(file_name));
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_and_get() {
        let context = TemplateContext::new().with("name", "Dpas").with("count", 4);

        assert_eq!(context.len(), 2);
        assert_eq!(context.get("name"), Some(&Value::from("Dpas")));
        assert_eq!(context.get("count"), Some(&Value::from(4)));
        assert!(context.get("missing").is_none());
    }

    #[test]
    fn test_keys_are_sorted() {
        let context = TemplateContext::new().with("b", 1).with("a", 2).with("c", 3);
        assert_eq!(context.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merged_prefers_overrides() {
        let base = TemplateContext::new().with("guard", "BASE_H").with("kept", true);
        let overrides = TemplateContext::new().with("guard", "OVERRIDE_H");

        let merged = base.merged(&overrides);
        assert_eq!(merged.get("guard"), Some(&Value::from("OVERRIDE_H")));
        assert_eq!(merged.get("kept"), Some(&Value::from(true)));
        // The base is left as it was
        assert_eq!(base.get("guard"), Some(&Value::from("BASE_H")));
    }

    #[test]
    fn test_from_serializable() {
        let mut raw = BTreeMap::new();
        raw.insert("list".to_string(), vec![1, 2, 3]);
        let context = TemplateContext::from_serializable(&raw);

        let list = context.get("list").unwrap();
        assert_eq!(list.len(), Some(3));
    }

    #[test]
    fn test_render_values_injects_file_name() {
        let context = TemplateContext::new().with("x", 1);
        let values = context.render_values("out.h").unwrap();

        assert_eq!(values.get(FILE_NAME_KEY), Some(&Value::from("out.h")));
        assert_eq!(values.get("x"), Some(&Value::from(1)));
        assert!(!context.contains_key(FILE_NAME_KEY));
    }

    #[test]
    fn test_reserved_key_is_rejected() {
        let context = TemplateContext::new().with(FILE_NAME_KEY, "custom.h");
        assert!(context.check_reserved_keys().is_err());
        assert!(context.render_values("out.h").is_err());
    }
}
