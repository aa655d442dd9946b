//! Generation request/response envelope shared by every provider.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default sampling temperature for a generation call.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default timeout budget applied by providers when a request sets none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One LLM call: instructions, sampling temperature and an optional timeout budget.
///
/// Built once per port call and consumed by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub user_prompt: String,
    pub system_prompt: Option<String>,
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl GenerationRequest {
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
            system_prompt: None,
            temperature: DEFAULT_TEMPERATURE,
            timeout: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Request timeout, falling back to `default`.
    pub fn timeout_or(&self, default: Duration) -> Duration {
        self.timeout.unwrap_or(default)
    }
}

/// What a provider produced, with the model and provider that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse<T> {
    pub content: T,
    pub model_name: String,
    pub provider: String,
}

impl<T> GenerationResponse<T> {
    pub fn new(content: T, model_name: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            content,
            model_name: model_name.into(),
            provider: provider.into(),
        }
    }
}
