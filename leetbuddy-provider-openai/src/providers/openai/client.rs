//! `OpenAI` chat completions client implementing the LLM port.

use async_trait::async_trait;
use leetbuddy_core::error::{BuddyError, Result, keys};
use leetbuddy_core::execution::http::build_http_client_from_config;
use leetbuddy_core::traits::{LlmPort, StructuredCapability, TextCapability};
use leetbuddy_core::types::{GenerationRequest, GenerationResponse, OutputSchema, parse_json_text};
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use std::borrow::Cow;
use std::time::{Duration, Instant};

use super::OPENAI_PROVIDER_ID;
use super::config::OpenAiConfig;
use super::errors::classify_openai_http_error;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};

const LOG_TARGET: &str = "leetbuddy::openai::client";

/// `OpenAI` client bound to one model.
#[derive(Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    /// Wrap an existing HTTP client.
    pub fn new(config: OpenAiConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Build the HTTP client from `config.http_config`.
    pub fn new_with_config(config: OpenAiConfig) -> Result<Self> {
        let http_client = build_http_client_from_config(&config.http_config)?;
        Ok(Self::new(config, http_client))
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Probe `GET {base_url}/models`.
    ///
    /// `Ok(false)` means the vendor rejected the credentials; any other
    /// non-2xx status or transport failure is a `ProviderError`.
    pub async fn validate_connection(&self) -> Result<bool> {
        let url = format!("{}/models", self.config.base_url);
        let timeout = self.config.default_timeout;

        let call = async {
            let response = self
                .http_client
                .get(&url)
                .bearer_auth(self.config.api_key.expose_secret())
                .send()
                .await
                .map_err(|e| transport_error(&e))?;

            let status = response.status();
            if status.is_success() {
                return Ok(true);
            }
            if matches!(status.as_u16(), 401 | 403) {
                tracing::warn!(
                    target: LOG_TARGET,
                    status = status.as_u16(),
                    "OpenAI rejected credentials"
                );
                return Ok(false);
            }
            let body = response.text().await.map_err(|e| transport_error(&e))?;
            Err(classify_openai_http_error(OPENAI_PROVIDER_ID, status.as_u16(), &body))
        };

        tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| timeout_error(timeout))?
    }

    fn chat_request<'a>(
        &'a self,
        request: &'a GenerationRequest,
        response_format: Option<Value>,
    ) -> ChatCompletionRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt.as_deref() {
            messages.push(WireMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: &request.user_prompt,
        });

        ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: request.temperature,
            response_format,
        }
    }

    /// POST `/chat/completions` under the request's timeout budget.
    async fn send(
        &self,
        body: &ChatCompletionRequest<'_>,
        timeout: Duration,
    ) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let started = Instant::now();

        tracing::debug!(
            target: LOG_TARGET,
            model = %self.config.model,
            structured = body.response_format.is_some(),
            timeout_ms = duration_ms(timeout),
            "sending chat completion request"
        );

        let call = async {
            let response = self
                .http_client
                .post(&url)
                .bearer_auth(self.config.api_key.expose_secret())
                .json(body)
                .send()
                .await
                .map_err(|e| transport_error(&e))?;

            let status = response.status();
            let text = response.text().await.map_err(|e| transport_error(&e))?;
            if !status.is_success() {
                return Err(classify_openai_http_error(OPENAI_PROVIDER_ID, status.as_u16(), &text));
            }

            serde_json::from_str::<ChatCompletionResponse>(&text).map_err(|e| {
                BuddyError::provider_error(
                    OPENAI_PROVIDER_ID,
                    format!("Failed to parse OpenAI chat completion response: {e}"),
                )
            })
        };

        let result = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(timeout_error(timeout)),
        };

        let latency_ms = duration_ms(started.elapsed());
        match &result {
            Ok(response) => tracing::info!(
                target: LOG_TARGET,
                model = %self.config.model,
                latency_ms,
                finish_reason = response.finish_reason().unwrap_or("unknown"),
                "chat completion succeeded"
            ),
            Err(e) => tracing::warn!(
                target: LOG_TARGET,
                model = %self.config.model,
                latency_ms,
                error = %e,
                "chat completion failed"
            ),
        }
        result
    }
}

#[async_trait]
impl TextCapability for OpenAiClient {
    async fn generate_text(&self, request: GenerationRequest) -> Result<String> {
        let timeout = request.timeout_or(self.config.default_timeout);
        let body = self.chat_request(&request, None);
        let response = self.send(&body, timeout).await?;

        response
            .first_message()
            .and_then(|m| m.content.as_deref())
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(str::to_string)
            .ok_or_else(|| BuddyError::empty_response(OPENAI_PROVIDER_ID))
    }
}

#[async_trait]
impl StructuredCapability for OpenAiClient {
    async fn generate_structured(
        &self,
        request: GenerationRequest,
        schema: &OutputSchema,
    ) -> Result<GenerationResponse<Value>> {
        let timeout = request.timeout_or(self.config.default_timeout);
        let body = self.chat_request(&request, Some(response_format(schema)));
        let response = self
            .send(&body, timeout)
            .await
            .map_err(|e| into_structured_failure(e, schema))?;

        let fail = |reason: String| {
            BuddyError::structured_output_not_generated(OPENAI_PROVIDER_ID, &schema.name, reason)
        };

        let message = response
            .first_message()
            .ok_or_else(|| fail("response contained no choices".to_string()))?;
        if let Some(refusal) = message.refusal.as_deref().filter(|r| !r.is_empty()) {
            return Err(fail(format!("model refused: {refusal}")));
        }
        let content = message
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| fail("response contained no content".to_string()))?;

        let value = parse_json_text(content).map_err(fail)?;
        schema
            .validate(&value)
            .map_err(|reason| fail(format!("output violates schema: {reason}")))?;

        let model_name = response
            .model
            .clone()
            .unwrap_or_else(|| self.config.model.clone());
        Ok(GenerationResponse::new(value, model_name, OPENAI_PROVIDER_ID))
    }
}

impl LlmPort for OpenAiClient {
    fn provider_id(&self) -> Cow<'static, str> {
        Cow::Borrowed(OPENAI_PROVIDER_ID)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn response_format(schema: &OutputSchema) -> Value {
    let mut json_schema = json!({
        "name": schema.name,
        "schema": schema.schema,
        "strict": schema.strict,
    });
    if let Some(description) = &schema.description {
        json_schema["description"] = Value::String(description.clone());
    }
    json!({ "type": "json_schema", "json_schema": json_schema })
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn transport_error(e: &reqwest::Error) -> BuddyError {
    BuddyError::provider_error(OPENAI_PROVIDER_ID, format!("HTTP request failed: {e}"))
}

fn timeout_error(timeout: Duration) -> BuddyError {
    BuddyError::provider_error(
        OPENAI_PROVIDER_ID,
        format!("request timed out after {}ms", duration_ms(timeout)),
    )
    .with_context(keys::TIMEOUT_MS, duration_ms(timeout))
}

/// Re-tag a send failure as a structured failure, keeping its diagnostics.
fn into_structured_failure(err: BuddyError, schema: &OutputSchema) -> BuddyError {
    let mut out = BuddyError::structured_output_not_generated(
        OPENAI_PROVIDER_ID,
        &schema.name,
        err.message().to_string(),
    );
    for key in [keys::STATUS_CODE, keys::TIMEOUT_MS, "errorType", "errorCode"] {
        if let Some(value) = err.context().get(key) {
            out = out.with_context(key, value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use leetbuddy_core::ErrorKind;

    fn schema() -> OutputSchema {
        OutputSchema::new("answer", json!({ "type": "object" })).with_description("An answer")
    }

    #[test]
    fn response_format_is_json_schema() {
        let rf = response_format(&schema());
        assert_eq!(rf["type"], "json_schema");
        assert_eq!(rf["json_schema"]["name"], "answer");
        assert_eq!(rf["json_schema"]["strict"], true);
        assert_eq!(rf["json_schema"]["description"], "An answer");
    }

    #[test]
    fn system_prompt_precedes_user_prompt() {
        let client = OpenAiClient::new(OpenAiConfig::new("k"), reqwest::Client::new());
        let req = GenerationRequest::new("user").with_system_prompt("system");
        let body = client.chat_request(&req, None);
        let roles: Vec<_> = body.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, ["system", "user"]);
        assert_eq!(body.model, "gpt-4o-mini");
    }

    #[test]
    fn structured_failure_keeps_status_and_timeout() {
        let err = timeout_error(Duration::from_millis(150)).with_context(keys::STATUS_CODE, 504);
        let out = into_structured_failure(err, &schema());
        assert_eq!(out.kind(), ErrorKind::StructuredOutputNotGenerated);
        assert_eq!(out.context().get_u64(keys::TIMEOUT_MS), Some(150));
        assert_eq!(out.status_code(), Some(504));
        assert_eq!(out.context().get_str(keys::SCHEMA_NAME), Some("answer"));
    }

    #[test]
    fn debug_does_not_leak_key() {
        let client = OpenAiClient::new(OpenAiConfig::new("sk-hidden"), reqwest::Client::new());
        assert!(!format!("{client:?}").contains("sk-hidden"));
    }
}
