//! Service wiring: configuration plus registry in, ready-to-use pipelines out.

use leetbuddy_core::error::Result;
use leetbuddy_core::execution::http::{HttpConfig, build_http_client_from_config};
use leetbuddy_core::slug::{RuleBasedSlugExtractor, SlugExtractor};
use leetbuddy_core::traits::{LlmPort, ProblemDetailsGateway, StructuredCapability, TextCapability};
use leetbuddy_registry::{BuildContext, ProviderRegistry};
use std::sync::Arc;

use crate::config::BuddyConfig;
use crate::gateway::HttpProblemGateway;
use crate::models::{Difficulty, Explanation, ExplanationMode, TestCaseSet};
use crate::pipeline::{ExplanationPipeline, TestCasePipeline};

/// A registry with every built-in provider enabled at compile time.
pub fn default_registry() -> ProviderRegistry {
    leetbuddy_registry::with_builtin_providers()
}

/// Both pipelines, sharing one slug extractor and one gateway.
#[derive(Debug, Clone)]
pub struct Services {
    pub testcases: TestCasePipeline,
    pub explanations: ExplanationPipeline,
}

impl Services {
    /// Resolve the configured provider for each pipeline's model and wire
    /// them around the HTTP problem gateway.
    pub async fn from_config(config: &BuddyConfig, registry: &ProviderRegistry) -> Result<Self> {
        let http_config = HttpConfig::builder()
            .user_agent(concat!("leetbuddy/", env!("CARGO_PKG_VERSION")))
            .build();
        let http_client = build_http_client_from_config(&http_config)?;

        let ctx = BuildContext::new()
            .with_api_key(config.api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_http_config(http_config)
            .with_http_client(http_client.clone())
            .with_timeout(config.timeout);

        let testcase_llm = registry
            .resolve(&config.provider, &config.testcase_model, &ctx)
            .await?;
        let explain_llm = registry
            .resolve(&config.provider, &config.explain_model, &ctx)
            .await?;

        let gateway = HttpProblemGateway::new(config.problem_endpoint.clone(), http_client)
            .with_timeout(config.timeout);

        tracing::info!(
            provider = %config.provider,
            testcase_model = %testcase_llm.model_name(),
            explain_model = %explain_llm.model_name(),
            endpoint = %gateway.endpoint(),
            "services wired"
        );
        let gateway: Arc<dyn ProblemDetailsGateway> = Arc::new(gateway);

        Ok(Self::from_parts(
            Arc::new(RuleBasedSlugExtractor::new()),
            gateway,
            testcase_llm,
            explain_llm,
        )
        .with_testcase_temperature(config.testcase_temperature))
    }

    /// Wire pipelines from already-built collaborators.
    pub fn from_parts(
        extractor: Arc<dyn SlugExtractor>,
        gateway: Arc<dyn ProblemDetailsGateway>,
        testcase_llm: Arc<dyn LlmPort>,
        explain_llm: Arc<dyn LlmPort>,
    ) -> Self {
        let structured: Arc<dyn StructuredCapability> = testcase_llm;
        let text: Arc<dyn TextCapability> = explain_llm;
        Self {
            testcases: TestCasePipeline::new(extractor.clone(), gateway.clone(), structured),
            explanations: ExplanationPipeline::new(extractor, gateway, text),
        }
    }

    fn with_testcase_temperature(mut self, temperature: f32) -> Self {
        self.testcases = self.testcases.with_temperature(temperature);
        self
    }

    /// `GenerateTestCases` at the boundary.
    pub async fn generate_test_cases(
        &self,
        user_input: &str,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<TestCaseSet> {
        self.testcases.generate(user_input, difficulty, count).await
    }

    /// `ExplainProblem` at the boundary.
    pub async fn explain_problem(&self, user_input: &str) -> Result<Explanation> {
        self.explanations.explain(user_input).await
    }

    pub async fn explain_problem_with_mode(
        &self,
        user_input: &str,
        mode: ExplanationMode,
    ) -> Result<Explanation> {
        self.explanations.explain_with_mode(user_input, mode).await
    }
}
