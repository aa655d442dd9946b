//! Environment-driven configuration.

use leetbuddy_core::error::{BuddyError, Result, keys};
use leetbuddy_core::utils::builder_helpers::{get_api_key_with_lookup, resolve_base_url};
use secrecy::SecretString;
use std::time::Duration;

use crate::gateway::DEFAULT_PROBLEM_ENDPOINT;
use crate::pipeline::DEFAULT_TESTCASE_TEMPERATURE;

pub const DEFAULT_PROVIDER: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable names.
pub mod vars {
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    pub const PROVIDER: &str = "LEETBUDDY_PROVIDER";
    pub const TESTCASE_MODEL: &str = "LEETBUDDY_TESTCASE_MODEL";
    pub const EXPLAIN_MODEL: &str = "LEETBUDDY_EXPLAIN_MODEL";
    pub const TESTCASE_TEMPERATURE: &str = "LEETBUDDY_TESTCASE_TEMPERATURE";
    pub const PROBLEM_ENDPOINT: &str = "LEETBUDDY_PROBLEM_ENDPOINT";
    pub const TIMEOUT_SECS: &str = "LEETBUDDY_TIMEOUT_SECS";
}

/// Wiring configuration for [`crate::Services`].
#[derive(Clone)]
pub struct BuddyConfig {
    /// Provider API key; resolved from `{PROVIDER}_API_KEY`.
    pub api_key: SecretString,
    pub base_url: String,
    pub provider: String,
    pub testcase_model: String,
    pub explain_model: String,
    pub testcase_temperature: f32,
    pub problem_endpoint: String,
    /// Budget for every LLM and gateway call.
    pub timeout: Duration,
}

impl BuddyConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`; unset and blank variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider = get(vars::PROVIDER).unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
        let api_key = get_api_key_with_lookup(None, &provider, &lookup)?;

        let testcase_temperature = match get(vars::TESTCASE_TEMPERATURE) {
            Some(raw) => parse_temperature(&raw)?,
            None => DEFAULT_TESTCASE_TEMPERATURE,
        };
        let timeout_secs = match get(vars::TIMEOUT_SECS) {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url: resolve_base_url(get(vars::OPENAI_BASE_URL), DEFAULT_OPENAI_BASE_URL),
            provider,
            testcase_model: get(vars::TESTCASE_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            explain_model: get(vars::EXPLAIN_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            testcase_temperature,
            problem_endpoint: get(vars::PROBLEM_ENDPOINT)
                .unwrap_or_else(|| DEFAULT_PROBLEM_ENDPOINT.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn invalid(variable: &str, raw: &str, expected: &str) -> BuddyError {
    BuddyError::configuration(format!("{variable} must be {expected}, got '{raw}'"))
        .with_context(keys::VARIABLE, variable)
}

fn parse_temperature(raw: &str) -> Result<f32> {
    match raw.parse::<f32>() {
        Ok(t) if (0.0..=2.0).contains(&t) => Ok(t),
        _ => Err(invalid(vars::TESTCASE_TEMPERATURE, raw, "a number between 0 and 2")),
    }
}

fn parse_timeout_secs(raw: &str) -> Result<u64> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(invalid(vars::TIMEOUT_SECS, raw, "a positive whole number of seconds")),
    }
}

impl std::fmt::Debug for BuddyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuddyConfig")
            .field("has_api_key", &true)
            .field("base_url", &self.base_url)
            .field("provider", &self.provider)
            .field("testcase_model", &self.testcase_model)
            .field("explain_model", &self.explain_model)
            .field("testcase_temperature", &self.testcase_temperature)
            .field("problem_endpoint", &self.problem_endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}
