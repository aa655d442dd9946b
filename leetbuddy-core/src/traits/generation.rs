//! LLM port: text and structured generation capabilities.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{
    GenerationRequest, GenerationResponse, OutputSchema, StructuredOutput, decode_structured,
};

/// Free-text generation.
#[async_trait]
pub trait TextCapability: Send + Sync {
    /// Generate plain text.
    ///
    /// Fails with `EmptyResponse` when the vendor returns no usable content and
    /// with `ProviderError` for transport or vendor-side failures.
    async fn generate_text(&self, request: GenerationRequest) -> Result<String>;
}

/// Schema-constrained generation.
#[async_trait]
pub trait StructuredCapability: Send + Sync {
    /// Generate a JSON value that conforms to `schema`.
    ///
    /// Every failure (refusal, unparseable output, schema violation, vendor or
    /// transport error) surfaces as `StructuredOutputNotGenerated` carrying the
    /// provider and schema name. A returned value has passed validation.
    async fn generate_structured(
        &self,
        request: GenerationRequest,
        schema: &OutputSchema,
    ) -> Result<GenerationResponse<Value>>;
}

/// A complete provider implementation, as handed out by the registry.
pub trait LlmPort: TextCapability + StructuredCapability {
    fn provider_id(&self) -> std::borrow::Cow<'static, str>;

    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: TextCapability + ?Sized> TextCapability for Arc<T> {
    async fn generate_text(&self, request: GenerationRequest) -> Result<String> {
        (**self).generate_text(request).await
    }
}

#[async_trait]
impl<T: StructuredCapability + ?Sized> StructuredCapability for Arc<T> {
    async fn generate_structured(
        &self,
        request: GenerationRequest,
        schema: &OutputSchema,
    ) -> Result<GenerationResponse<Value>> {
        (**self).generate_structured(request, schema).await
    }
}

/// Run a structured call for `T` and decode the validated value.
///
/// The provider's answer is checked again against `T::output_schema()` so a
/// port that skips validation still cannot leak a partially valid object.
pub async fn generate_object<T, P>(
    port: &P,
    request: GenerationRequest,
) -> Result<GenerationResponse<T>>
where
    T: StructuredOutput,
    P: StructuredCapability + ?Sized,
{
    let schema = T::output_schema();
    let response = port.generate_structured(request, &schema).await?;
    let provider = response.provider.clone();
    let content = decode_structured::<T>(&provider, &schema, response.content)?;
    Ok(GenerationResponse {
        content,
        model_name: response.model_name,
        provider,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BuddyError, ErrorKind};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Answer {
        value: u32,
    }

    impl StructuredOutput for Answer {
        fn output_schema() -> OutputSchema {
            OutputSchema::new(
                "answer",
                json!({
                    "type": "object",
                    "properties": { "value": { "type": "integer" } },
                    "required": ["value"],
                    "additionalProperties": false
                }),
            )
        }
    }

    struct Fixed(Value);

    #[async_trait]
    impl StructuredCapability for Fixed {
        async fn generate_structured(
            &self,
            _request: GenerationRequest,
            _schema: &OutputSchema,
        ) -> Result<GenerationResponse<Value>> {
            Ok(GenerationResponse::new(self.0.clone(), "fixed-1", "fixed"))
        }
    }

    struct Failing;

    #[async_trait]
    impl StructuredCapability for Failing {
        async fn generate_structured(
            &self,
            _request: GenerationRequest,
            schema: &OutputSchema,
        ) -> Result<GenerationResponse<Value>> {
            Err(BuddyError::structured_output_not_generated(
                "failing",
                &schema.name,
                "refused",
            ))
        }
    }

    #[tokio::test]
    async fn decodes_valid_object() {
        let port = Fixed(json!({ "value": 42 }));
        let resp = generate_object::<Answer, _>(&port, GenerationRequest::new("q"))
            .await
            .unwrap();
        assert_eq!(resp.content.value, 42);
        assert_eq!(resp.model_name, "fixed-1");
        assert_eq!(resp.provider, "fixed");
    }

    #[tokio::test]
    async fn rejects_unvalidated_provider_output() {
        let port = Fixed(json!({ "value": "forty-two" }));
        let err = generate_object::<Answer, _>(&port, GenerationRequest::new("q"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuredOutputNotGenerated);
        assert_eq!(err.provider(), Some("fixed"));
    }

    #[tokio::test]
    async fn works_through_trait_objects() {
        let port: Arc<dyn StructuredCapability> = Arc::new(Failing);
        let err = generate_object::<Answer, _>(port.as_ref(), GenerationRequest::new("q"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuredOutputNotGenerated);
    }
}
