//! Explanation pipeline: slug, problem details, prompts, text generation.

use leetbuddy_core::error::{BuddyError, Result};
use leetbuddy_core::slug::SlugExtractor;
use leetbuddy_core::traits::{ProblemDetailsGateway, TextCapability};
use leetbuddy_core::types::{DEFAULT_TEMPERATURE, GenerationRequest};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::{Explanation, ExplanationMode};
use crate::prompts::explain::{system_prompt, user_prompt};

/// Explains a problem statement without giving away a solution.
#[derive(Clone)]
pub struct ExplanationPipeline {
    extractor: Arc<dyn SlugExtractor>,
    gateway: Arc<dyn ProblemDetailsGateway>,
    llm: Arc<dyn TextCapability>,
    temperature: f32,
    timeout: Option<Duration>,
}

impl ExplanationPipeline {
    pub fn new(
        extractor: Arc<dyn SlugExtractor>,
        gateway: Arc<dyn ProblemDetailsGateway>,
        llm: Arc<dyn TextCapability>,
    ) -> Self {
        Self {
            extractor,
            gateway,
            llm,
            temperature: DEFAULT_TEMPERATURE,
            timeout: None,
        }
    }

    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Beginner-level explanation of the problem named in `user_input`.
    pub async fn explain(&self, user_input: &str) -> Result<Explanation> {
        self.explain_with_mode(user_input, ExplanationMode::Beginner).await
    }

    /// Explanation for the audience selected by `mode`.
    ///
    /// Extraction and gateway failures pass through unchanged; generation
    /// failures surface as `ExplanationFailed` with the cause chained.
    pub async fn explain_with_mode(
        &self,
        user_input: &str,
        mode: ExplanationMode,
    ) -> Result<Explanation> {
        let slug = self.extractor.extract(user_input)?;
        let details = self.gateway.fetch(&slug).await?;

        let mut request = GenerationRequest::new(user_prompt(mode))
            .with_system_prompt(system_prompt(&details, mode))
            .with_temperature(self.temperature);
        if let Some(timeout) = self.timeout {
            request = request.with_timeout(timeout);
        }

        tracing::debug!(
            slug = %slug,
            %mode,
            temperature = self.temperature,
            "requesting explanation"
        );

        let started = Instant::now();
        let explanation = self.llm.generate_text(request).await.map_err(|cause| {
            tracing::warn!(
                slug = %slug,
                kind = %cause.kind(),
                error = %cause,
                "explanation failed"
            );
            BuddyError::explanation_failed(cause)
        })?;

        tracing::info!(
            slug = %slug,
            %mode,
            chars = explanation.len(),
            latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "generated explanation"
        );

        Ok(Explanation {
            slug,
            explanation: explanation.trim().to_string(),
        })
    }
}

impl std::fmt::Debug for ExplanationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplanationPipeline")
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
