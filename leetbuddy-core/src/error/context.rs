//! Diagnostic context attached to every `BuddyError`.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Read-only key/value diagnostics (endpoint, slug, status code, provider, ...).
///
/// Keys are kept ordered so rendered errors are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorContext(BTreeMap<String, Value>);

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Unsigned value for `key`, if present and numeric.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            match value {
                Value::String(s) => write!(f, "{key}={s}")?,
                other => write!(f, "{key}={other}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_in_key_order() {
        let ctx = ErrorContext::new()
            .with("slug", "two-sum")
            .with("endpoint", "http://localhost/select")
            .with("statusCode", 503);
        assert_eq!(
            ctx.to_string(),
            "endpoint=http://localhost/select, slug=two-sum, statusCode=503"
        );
    }

    #[test]
    fn typed_getters() {
        let ctx = ErrorContext::new().with("statusCode", 404).with("slug", "x");
        assert_eq!(ctx.get_u64("statusCode"), Some(404));
        assert_eq!(ctx.get_str("slug"), Some("x"));
        assert_eq!(ctx.get_str("statusCode"), None);
        assert!(!ctx.contains_key("provider"));
    }
}
