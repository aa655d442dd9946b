//! Output schemas for structured generation
//!
//! A vendor can be asked for JSON that follows a schema, but nothing forces it
//! to comply. `OutputSchema` describes the target shape, and
//! [`decode_structured`] is the runtime check that either yields a fully valid
//! value or a `StructuredOutputNotGenerated` error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, OnceLock};

use crate::error::{BuddyError, Result};

/// Validation messages kept per failure; the rest are dropped.
const MAX_REPORTED_VIOLATIONS: usize = 3;

/// Target shape for a structured generation call.
///
/// # Example
///
/// ```rust,ignore
/// use leetbuddy_core::types::OutputSchema;
/// use serde_json::json;
///
/// let schema = OutputSchema::new("person", json!({
///     "type": "object",
///     "properties": { "name": { "type": "string" } },
///     "required": ["name"],
///     "additionalProperties": false
/// }))
/// .with_description("Person information");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    /// Schema name sent to vendors that support named schemas.
    pub name: String,
    pub description: Option<String>,
    /// JSON Schema document.
    pub schema: Value,
    /// Ask the vendor for strict schema adherence when supported.
    pub strict: bool,
    /// Validator compiled on first use and shared by clones.
    #[serde(skip)]
    compiled: CompiledValidator,
}

/// Lazily compiled `jsonschema` validator (or the compile error).
///
/// Clones share the cell, so a schema handed from `generate_object` to a
/// provider is compiled once for both checks. Build a new `OutputSchema`
/// instead of editing `schema` after it has been validated against.
#[derive(Clone, Default)]
struct CompiledValidator(Arc<OnceLock<std::result::Result<jsonschema::Validator, String>>>);

impl CompiledValidator {
    fn get_or_compile(
        &self,
        name: &str,
        schema: &Value,
    ) -> std::result::Result<&jsonschema::Validator, String> {
        self.0
            .get_or_init(|| {
                jsonschema::validator_for(schema)
                    .map_err(|e| format!("invalid JSON Schema '{name}': {e}"))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    fn is_compiled(&self) -> bool {
        self.0.get().is_some()
    }
}

impl std::fmt::Debug for CompiledValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.is_compiled() { "compiled" } else { "pending" })
    }
}

// The cache never affects equality.
impl PartialEq for CompiledValidator {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl OutputSchema {
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema,
            strict: true,
            compiled: CompiledValidator::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether the validator has been built, by this value or a clone of it.
    pub fn is_compiled(&self) -> bool {
        self.compiled.is_compiled()
    }

    /// Check `instance` against the schema, returning the first few violations.
    pub fn validate(&self, instance: &Value) -> std::result::Result<(), String> {
        let validator = self.compiled.get_or_compile(&self.name, &self.schema)?;

        if validator.is_valid(instance) {
            return Ok(());
        }

        let msgs: Vec<String> = validator
            .iter_errors(instance)
            .take(MAX_REPORTED_VIOLATIONS)
            .map(|err| format!("{} at {}", err, err.instance_path))
            .collect();
        Err(msgs.join("; "))
    }
}

/// A type that can be produced by structured generation.
pub trait StructuredOutput: DeserializeOwned + Send {
    fn output_schema() -> OutputSchema;
}

/// Parse raw model text as a JSON value, tolerating a surrounding code fence.
pub fn parse_json_text(text: &str) -> std::result::Result<Value, String> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);
    serde_json::from_str(body).map_err(|e| format!("output is not valid JSON: {e}"))
}

/// Validate `value` against `schema` and deserialize it into `T`.
///
/// All-or-nothing: any violation yields `StructuredOutputNotGenerated`
/// with `provider` and the schema name in context.
pub fn decode_structured<T: DeserializeOwned>(
    provider: &str,
    schema: &OutputSchema,
    value: Value,
) -> Result<T> {
    schema.validate(&value).map_err(|reason| {
        BuddyError::structured_output_not_generated(
            provider,
            &schema.name,
            format!("output violates schema: {reason}"),
        )
    })?;

    serde_json::from_value(value).map_err(|e| {
        BuddyError::structured_output_not_generated(
            provider,
            &schema.name,
            format!("output does not match the expected type: {e}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, keys};
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Person {
        name: String,
    }

    fn person_schema() -> OutputSchema {
        OutputSchema::new(
            "person",
            json!({
                "type": "object",
                "properties": { "name": { "type": "string" } },
                "required": ["name"],
                "additionalProperties": false
            }),
        )
    }

    #[test]
    fn decodes_valid_value() {
        let person: Person =
            decode_structured("openai", &person_schema(), json!({ "name": "Ada" })).unwrap();
        assert_eq!(
            person,
            Person {
                name: "Ada".into()
            }
        );
    }

    #[test]
    fn schema_violation_is_structured_failure() {
        let err = decode_structured::<Person>("openai", &person_schema(), json!({ "name": 7 }))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuredOutputNotGenerated);
        assert_eq!(err.provider(), Some("openai"));
        assert_eq!(err.context().get_str(keys::SCHEMA_NAME), Some("person"));
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let err =
            decode_structured::<Person>("openai", &person_schema(), json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuredOutputNotGenerated);
        assert!(err.message().contains("violates schema"));
    }

    #[test]
    fn validator_is_compiled_once_and_shared_by_clones() {
        let schema = person_schema();
        let shared = schema.clone();
        assert!(!schema.compiled.is_compiled());

        assert!(schema.validate(&json!({ "name": "Ada" })).is_ok());
        assert!(shared.compiled.is_compiled());
        assert!(shared.validate(&json!({ "name": 1 })).is_err());
        assert_eq!(schema, shared);
    }

    #[test]
    fn invalid_schema_is_reported_on_every_call() {
        let schema = OutputSchema::new("broken", json!({ "type": 12 })).with_strict(false);
        assert!(!schema.strict);
        let first = schema.validate(&json!({})).unwrap_err();
        assert!(first.contains("invalid JSON Schema 'broken'"));
        assert_eq!(schema.validate(&json!({})).unwrap_err(), first);
    }

    #[test]
    fn parses_fenced_json() {
        let v = parse_json_text("```json\n{\"name\":\"Ada\"}\n```").unwrap();
        assert_eq!(v, json!({ "name": "Ada" }));
        assert!(parse_json_text("not json").is_err());
    }
}
