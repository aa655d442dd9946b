use leetbuddy_core::error::{BuddyError, keys};
use leetbuddy_core::execution::http::truncate_body;
use serde_json::Value;

/// Map a non-2xx OpenAI-style response onto `ProviderError`.
///
/// OpenAI-style APIs typically return:
/// `{ "error": { "message": "...", "type": "...", "code": "..." } }`
///
/// When the body matches that envelope its message, type and code are lifted
/// into the error; otherwise the (truncated) raw body is kept in context.
pub fn classify_openai_http_error(provider: &str, status: u16, body_text: &str) -> BuddyError {
    let envelope = serde_json::from_str::<Value>(body_text)
        .ok()
        .and_then(|json| json.get("error").cloned());

    let Some(error_obj) = envelope else {
        return BuddyError::provider_error(provider, format!("{provider} API error: HTTP {status}"))
            .with_context(keys::STATUS_CODE, status)
            .with_context(keys::RESPONSE_BODY, truncate_body(body_text));
    };

    let message = error_obj
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown error");
    let error_type = error_obj
        .get("type")
        .and_then(|v| v.as_str())
        .filter(|t| !t.is_empty());
    let error_code = error_obj.get("code").and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    let summary = match error_type {
        Some(t) => format!("{provider} API error ({t}): {message}"),
        None => format!("{provider} API error: {message}"),
    };

    let mut err =
        BuddyError::provider_error(provider, summary).with_context(keys::STATUS_CODE, status);
    if let Some(t) = error_type {
        err = err.with_context("errorType", t);
    }
    if let Some(code) = error_code {
        err = err.with_context("errorCode", code);
    }
    err
}
