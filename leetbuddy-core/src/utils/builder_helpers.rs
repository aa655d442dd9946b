//! Builder Helper Functions
//!
//! Shared by provider factories and the configuration layer so key and
//! base URL resolution behave the same everywhere.

use secrecy::SecretString;

use crate::error::{BuddyError, Result, keys};

/// Get API key with environment variable fallback
///
/// Priority: explicit parameter > environment variable `{PROVIDER_ID}_API_KEY`
///
/// # Example
/// ```rust,ignore
/// let api_key = get_api_key_with_env(None, "openai")?;
/// // Reads from OPENAI_API_KEY
/// ```
pub fn get_api_key_with_env(
    api_key: Option<SecretString>,
    provider_id: &str,
) -> Result<SecretString> {
    get_api_key_with_lookup(api_key, provider_id, |name| std::env::var(name).ok())
}

/// Same as [`get_api_key_with_env`], reading variables through `lookup`.
pub fn get_api_key_with_lookup(
    api_key: Option<SecretString>,
    provider_id: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString> {
    if let Some(key) = api_key {
        return Ok(key);
    }

    let env_key = api_key_env_var(provider_id);
    match lookup(&env_key) {
        Some(v) if !v.trim().is_empty() => Ok(SecretString::from(v)),
        _ => Err(BuddyError::configuration(format!(
            "API key is required for {provider_id} (missing {env_key} or explicit api_key)"
        ))
        .with_context(keys::VARIABLE, env_key)
        .with_context(keys::PROVIDER, provider_id)),
    }
}

/// `{PROVIDER_ID}_API_KEY`, with non-alphanumerics mapped to `_`.
pub fn api_key_env_var(provider_id: &str) -> String {
    let id: String = provider_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("{id}_API_KEY")
}

/// Resolve base URL with simple override semantics.
///
/// A custom base URL is used as-is apart from a trailing `/`; `default_url`
/// applies only when none is given.
pub fn resolve_base_url(custom_url: Option<String>, default_url: &str) -> String {
    let url = custom_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| default_url.to_string());
    url.trim_end_matches('/').to_string()
}
