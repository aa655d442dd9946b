//! `OpenAI` client configuration.

use leetbuddy_core::execution::http::HttpConfig;
use leetbuddy_core::types::DEFAULT_TIMEOUT;
use secrecy::SecretString;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Connection and model settings for [`super::OpenAiClient`].
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: SecretString,
    /// API prefix, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub model: String,
    /// Applied when a request carries no timeout of its own.
    pub default_timeout: Duration,
    pub http_config: HttpConfig,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_secret(SecretString::from(api_key.into()))
    }

    pub fn with_secret(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            default_timeout: DEFAULT_TIMEOUT,
            http_config: HttpConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_http_config(mut self, http_config: HttpConfig) -> Self {
        self.http_config = http_config;
        self
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("default_timeout", &self.default_timeout)
            .field("has_api_key", &true)
            .finish()
    }
}
