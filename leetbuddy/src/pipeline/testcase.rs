//! Test-case pipeline: slug, problem details, prompts, structured generation.

use leetbuddy_core::error::{BuddyError, Result};
use leetbuddy_core::slug::SlugExtractor;
use leetbuddy_core::traits::{ProblemDetailsGateway, StructuredCapability, generate_object};
use leetbuddy_core::types::GenerationRequest;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::models::{Difficulty, PROBLEM_TEST_CASES_SCHEMA, ProblemTestCases, TestCase, TestCaseSet};
use crate::prompts::testcase::{system_prompt, user_prompt};

pub const MIN_TEST_CASES: u32 = 1;
pub const MAX_TEST_CASES: u32 = 10;
pub const DEFAULT_TESTCASE_TEMPERATURE: f32 = 0.7;

/// Bound a requested test-case count to `[MIN_TEST_CASES, MAX_TEST_CASES]`.
pub fn clamp_count(count: u32) -> u32 {
    count.clamp(MIN_TEST_CASES, MAX_TEST_CASES)
}

/// Generates practice test cases for a problem named in free-form text.
///
/// Collaborators are injected and shared; the pipeline itself holds no
/// per-call state, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct TestCasePipeline {
    extractor: Arc<dyn SlugExtractor>,
    gateway: Arc<dyn ProblemDetailsGateway>,
    llm: Arc<dyn StructuredCapability>,
    temperature: f32,
    timeout: Option<Duration>,
}

impl TestCasePipeline {
    pub fn new(
        extractor: Arc<dyn SlugExtractor>,
        gateway: Arc<dyn ProblemDetailsGateway>,
        llm: Arc<dyn StructuredCapability>,
    ) -> Self {
        Self {
            extractor,
            gateway,
            llm,
            temperature: DEFAULT_TESTCASE_TEMPERATURE,
            timeout: None,
        }
    }

    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Timeout budget for the LLM call; the provider default applies otherwise.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Generate up to `count` test cases (clamped to 1..=10).
    ///
    /// `ProblemNotFound` and `GatewayUnavailable` from slug extraction and the
    /// gateway pass through unchanged. Any failure of the generation step
    /// surfaces as `TestCasesNotGenerated` with the cause chained.
    pub async fn generate(
        &self,
        user_input: &str,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<TestCaseSet> {
        let count = clamp_count(count);
        let slug = self.extractor.extract(user_input)?;
        let details = self.gateway.fetch(&slug).await?;

        let mut request = GenerationRequest::new(user_prompt(&details, count))
            .with_system_prompt(system_prompt(difficulty))
            .with_temperature(self.temperature);
        if let Some(timeout) = self.timeout {
            request = request.with_timeout(timeout);
        }

        tracing::debug!(
            slug = %slug,
            %difficulty,
            count,
            temperature = self.temperature,
            system_prompt_len = request.system_prompt.as_deref().map_or(0, str::len),
            user_prompt_len = request.user_prompt.len(),
            "requesting test cases"
        );

        let started = Instant::now();
        let response = generate_object::<ProblemTestCases, _>(self.llm.as_ref(), request)
            .await
            .and_then(|response| {
                if response.content.test_cases.is_empty() {
                    Err(BuddyError::structured_output_not_generated(
                        response.provider.as_str(),
                        PROBLEM_TEST_CASES_SCHEMA,
                        "model returned no test cases",
                    ))
                } else {
                    Ok(response)
                }
            })
            .map_err(|cause| {
                tracing::warn!(
                    slug = %slug,
                    kind = %cause.kind(),
                    error = %cause,
                    "test case generation failed"
                );
                BuddyError::test_cases_not_generated(cause)
            })?;

        let test_cases: Vec<TestCase> = response
            .content
            .test_cases
            .into_iter()
            .take(count as usize)
            .map(TestCase::from)
            .collect();

        tracing::info!(
            slug = %slug,
            provider = %response.provider,
            model = %response.model_name,
            test_cases = test_cases.len(),
            latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "generated test cases"
        );

        Ok(TestCaseSet { slug, test_cases })
    }
}

impl std::fmt::Debug for TestCasePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCasePipeline")
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
