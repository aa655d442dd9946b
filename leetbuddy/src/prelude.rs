//! Common imports.

pub use crate::config::BuddyConfig;
pub use crate::gateway::HttpProblemGateway;
pub use crate::models::{Difficulty, Explanation, ExplanationMode, TestCase, TestCaseSet};
pub use crate::pipeline::{ExplanationPipeline, TestCasePipeline};
pub use crate::services::{Services, default_registry};
pub use leetbuddy_core::{
    BuddyError, ErrorKind, GenerationRequest, GenerationResponse, LlmPort, OutputSchema,
    ProblemDetails, ProblemDetailsGateway, ProblemSlug, Result, RuleBasedSlugExtractor,
    SlugExtractor, StructuredCapability, StructuredOutput, TextCapability, extract_slug,
    generate_object,
};
pub use leetbuddy_registry::{BuildContext, ProviderFactory, ProviderRegistry};
