//! HTTP problem-details gateway.
//!
//! Talks to an alfa-leetcode-api style endpoint:
//! `GET {endpoint}?titleSlug={slug}` answering with
//! `{ titleSlug, questionTitle, question, exampleTestcases, difficulty }`.

use async_trait::async_trait;
use leetbuddy_core::error::{BuddyError, Result, keys};
use leetbuddy_core::execution::http::{HttpConfig, build_http_client_from_config, truncate_body};
use leetbuddy_core::traits::ProblemDetailsGateway;
use leetbuddy_core::types::{DEFAULT_TIMEOUT, ProblemDetails, ProblemSlug};
use serde::Deserialize;
use std::time::{Duration, Instant};

pub const DEFAULT_PROBLEM_ENDPOINT: &str = "https://alfa-leetcode-api.onrender.com/select";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProblemPayload {
    #[serde(default)]
    title_slug: Option<String>,
    #[serde(default)]
    question_title: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    example_testcases: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
}

/// [`ProblemDetailsGateway`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProblemGateway {
    endpoint: String,
    http_client: reqwest::Client,
    timeout: Duration,
}

impl HttpProblemGateway {
    pub fn new(endpoint: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_http_config(endpoint: impl Into<String>, http_config: &HttpConfig) -> Result<Self> {
        Ok(Self::new(endpoint, build_http_client_from_config(http_config)?))
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn unavailable(&self, slug: &ProblemSlug, message: impl Into<String>) -> BuddyError {
        BuddyError::gateway_unavailable(message)
            .with_context(keys::ENDPOINT, self.endpoint.as_str())
            .with_context(keys::SLUG, slug.as_str())
    }

    fn not_found(&self, slug: &ProblemSlug, status: u16) -> BuddyError {
        BuddyError::problem_not_found(format!("no problem with slug '{slug}'"))
            .with_context(keys::ENDPOINT, self.endpoint.as_str())
            .with_context(keys::SLUG, slug.as_str())
            .with_context(keys::STATUS_CODE, status)
    }

    async fn fetch_inner(&self, slug: &ProblemSlug) -> Result<ProblemDetails> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("titleSlug", slug.as_str())])
            .send()
            .await
            .map_err(|e| self.unavailable(slug, format!("request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.unavailable(slug, format!("failed to read response body: {e}")))?;

        if status == 404 {
            return Err(self.not_found(slug, status));
        }
        if !(200..300).contains(&status) {
            return Err(self
                .unavailable(slug, format!("unexpected status {status}"))
                .with_context(keys::STATUS_CODE, status)
                .with_context(keys::RESPONSE_BODY, truncate_body(&body)));
        }

        let payload: ProblemPayload = serde_json::from_str(&body).map_err(|e| {
            self.unavailable(slug, format!("undecodable response body: {e}"))
                .with_context(keys::STATUS_CODE, status)
                .with_context(keys::RESPONSE_BODY, truncate_body(&body))
        })?;

        let present = |field: Option<String>| field.filter(|v| !v.trim().is_empty());
        let (Some(title), Some(content)) =
            (present(payload.question_title), present(payload.question))
        else {
            return Err(self.not_found(slug, status));
        };

        if let Some(returned) = payload.title_slug.as_deref()
            && returned != slug.as_str()
        {
            tracing::debug!(
                requested = %slug,
                returned,
                "problem source returned a different slug"
            );
        }

        Ok(ProblemDetails {
            slug: slug.clone(),
            title,
            content,
            example_testcases: payload.example_testcases.unwrap_or_default(),
            difficulty: payload.difficulty.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ProblemDetailsGateway for HttpProblemGateway {
    async fn fetch(&self, slug: &ProblemSlug) -> Result<ProblemDetails> {
        let started = Instant::now();
        let result = match tokio::time::timeout(self.timeout, self.fetch_inner(slug)).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                Err(self
                    .unavailable(slug, format!("request timed out after {timeout_ms}ms"))
                    .with_context(keys::TIMEOUT_MS, timeout_ms))
            }
        };

        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(details) => tracing::info!(
                slug = %slug,
                difficulty = %details.difficulty,
                latency_ms,
                "fetched problem details"
            ),
            Err(e) => tracing::warn!(
                slug = %slug,
                kind = %e.kind(),
                latency_ms,
                "problem details fetch failed"
            ),
        }
        result
    }
}
