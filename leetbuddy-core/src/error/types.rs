//! Core error types.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use super::context::ErrorContext;

/// Context keys shared by producers and consumers of `BuddyError`.
pub mod keys {
    pub const SLUG: &str = "slug";
    pub const ATTEMPTED_SLUG: &str = "attemptedSlug";
    pub const INPUT: &str = "input";
    pub const ENDPOINT: &str = "endpoint";
    pub const STATUS_CODE: &str = "statusCode";
    pub const RESPONSE_BODY: &str = "responseBody";
    pub const PROVIDER: &str = "provider";
    pub const PROVIDER_ID: &str = "providerId";
    pub const KNOWN_PROVIDERS: &str = "knownProviders";
    pub const MODEL: &str = "model";
    pub const SCHEMA_NAME: &str = "schemaName";
    pub const REASON: &str = "reason";
    pub const TIMEOUT_MS: &str = "timeoutMs";
    pub const VARIABLE: &str = "variable";
}

/// Machine-readable discriminant of a `BuddyError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ProblemNotFound,
    GatewayUnavailable,
    EmptyResponse,
    ProviderError,
    StructuredOutputNotGenerated,
    UnknownProvider,
    ConfigurationError,
    TestCasesNotGenerated,
    ExplanationFailed,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProblemNotFound => "problem_not_found",
            Self::GatewayUnavailable => "gateway_unavailable",
            Self::EmptyResponse => "empty_response",
            Self::ProviderError => "provider_error",
            Self::StructuredOutputNotGenerated => "structured_output_not_generated",
            Self::UnknownProvider => "unknown_provider",
            Self::ConfigurationError => "configuration_error",
            Self::TestCasesNotGenerated => "test_cases_not_generated",
            Self::ExplanationFailed => "explanation_failed",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chained cause of a pipeline wrapper.
///
/// Boxed as a trait object so `Error::source` yields the inner `BuddyError`
/// itself, which callers recover with `downcast_ref::<BuddyError>()`.
type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error taxonomy used by every port, provider and pipeline.
#[derive(Error, Debug)]
pub enum BuddyError {
    /// A slug could not be derived, or the gateway knows no such problem.
    #[error("Problem not found: {message}")]
    ProblemNotFound {
        message: String,
        context: ErrorContext,
    },

    /// Transport, status or decoding failure talking to the problem-details service.
    #[error("Problem details service unavailable: {message}")]
    GatewayUnavailable {
        message: String,
        context: ErrorContext,
    },

    /// The vendor answered without usable text.
    #[error("Empty response: {message}")]
    EmptyResponse {
        message: String,
        context: ErrorContext,
    },

    /// The vendor call failed at the transport or vendor level.
    #[error("Provider error: {message}")]
    ProviderError {
        message: String,
        context: ErrorContext,
    },

    /// Schema-constrained generation produced no valid output
    /// (refusal, malformed output, schema violation or vendor failure).
    #[error("Structured output not generated: {message}")]
    StructuredOutputNotGenerated {
        message: String,
        context: ErrorContext,
    },

    /// No factory registered under the requested provider id.
    #[error("Unknown provider: {message}")]
    UnknownProvider {
        message: String,
        context: ErrorContext,
    },

    /// Wiring-time configuration problem.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },

    /// Test-case pipeline failure; the cause stays internal to the chain.
    #[error("{message}")]
    TestCasesNotGenerated {
        message: String,
        context: ErrorContext,
        #[source]
        source: BoxedCause,
    },

    /// Explanation pipeline failure; the cause stays internal to the chain.
    #[error("{message}")]
    ExplanationFailed {
        message: String,
        context: ErrorContext,
        #[source]
        source: BoxedCause,
    },
}

impl BuddyError {
    pub fn problem_not_found(message: impl Into<String>) -> Self {
        Self::ProblemNotFound {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn gateway_unavailable(message: impl Into<String>) -> Self {
        Self::GatewayUnavailable {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    /// Empty vendor response; records the provider in context.
    pub fn empty_response(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        Self::EmptyResponse {
            message: format!("{provider} returned no content"),
            context: ErrorContext::new().with(keys::PROVIDER, provider),
        }
    }

    /// Vendor failure; records the provider in context.
    pub fn provider_error(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderError {
            message: message.into(),
            context: ErrorContext::new().with(keys::PROVIDER, provider.into()),
        }
    }

    /// Structured generation failure; records provider and schema name in context.
    pub fn structured_output_not_generated(
        provider: impl Into<String>,
        schema_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let reason = reason.into();
        Self::StructuredOutputNotGenerated {
            message: reason.clone(),
            context: ErrorContext::new()
                .with(keys::PROVIDER, provider.into())
                .with(keys::SCHEMA_NAME, schema_name.into())
                .with(keys::REASON, reason),
        }
    }

    pub fn unknown_provider(provider_id: impl Into<String>) -> Self {
        let provider_id = provider_id.into();
        Self::UnknownProvider {
            message: format!("no factory registered for '{provider_id}'"),
            context: ErrorContext::new().with(keys::PROVIDER_ID, provider_id),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    /// Opaque test-case pipeline failure chaining `cause`.
    pub fn test_cases_not_generated(cause: BuddyError) -> Self {
        Self::TestCasesNotGenerated {
            message: "Could not generate test cases.".to_string(),
            context: ErrorContext::new(),
            source: Box::new(cause),
        }
    }

    /// Opaque explanation pipeline failure chaining `cause`.
    pub fn explanation_failed(cause: BuddyError) -> Self {
        Self::ExplanationFailed {
            message: "Failed to generate explanation.".to_string(),
            context: ErrorContext::new(),
            source: Box::new(cause),
        }
    }

    /// Attach one diagnostic entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context_mut().insert(key, value);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProblemNotFound { .. } => ErrorKind::ProblemNotFound,
            Self::GatewayUnavailable { .. } => ErrorKind::GatewayUnavailable,
            Self::EmptyResponse { .. } => ErrorKind::EmptyResponse,
            Self::ProviderError { .. } => ErrorKind::ProviderError,
            Self::StructuredOutputNotGenerated { .. } => ErrorKind::StructuredOutputNotGenerated,
            Self::UnknownProvider { .. } => ErrorKind::UnknownProvider,
            Self::ConfigurationError { .. } => ErrorKind::ConfigurationError,
            Self::TestCasesNotGenerated { .. } => ErrorKind::TestCasesNotGenerated,
            Self::ExplanationFailed { .. } => ErrorKind::ExplanationFailed,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::ProblemNotFound { message, .. }
            | Self::GatewayUnavailable { message, .. }
            | Self::EmptyResponse { message, .. }
            | Self::ProviderError { message, .. }
            | Self::StructuredOutputNotGenerated { message, .. }
            | Self::UnknownProvider { message, .. }
            | Self::ConfigurationError { message, .. }
            | Self::TestCasesNotGenerated { message, .. }
            | Self::ExplanationFailed { message, .. } => message,
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::ProblemNotFound { context, .. }
            | Self::GatewayUnavailable { context, .. }
            | Self::EmptyResponse { context, .. }
            | Self::ProviderError { context, .. }
            | Self::StructuredOutputNotGenerated { context, .. }
            | Self::UnknownProvider { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::TestCasesNotGenerated { context, .. }
            | Self::ExplanationFailed { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::ProblemNotFound { context, .. }
            | Self::GatewayUnavailable { context, .. }
            | Self::EmptyResponse { context, .. }
            | Self::ProviderError { context, .. }
            | Self::StructuredOutputNotGenerated { context, .. }
            | Self::UnknownProvider { context, .. }
            | Self::ConfigurationError { context, .. }
            | Self::TestCasesNotGenerated { context, .. }
            | Self::ExplanationFailed { context, .. } => context,
        }
    }

    /// The chained cause of a pipeline wrapper.
    pub fn cause(&self) -> Option<&BuddyError> {
        match self {
            Self::TestCasesNotGenerated { source, .. } | Self::ExplanationFailed { source, .. } => {
                source.downcast_ref::<BuddyError>()
            }
            _ => None,
        }
    }

    /// Provider recorded in context, if any.
    pub fn provider(&self) -> Option<&str> {
        self.context().get_str(keys::PROVIDER)
    }

    /// HTTP status recorded in context, if any.
    pub fn status_code(&self) -> Option<u16> {
        self.context()
            .get_u64(keys::STATUS_CODE)
            .and_then(|c| u16::try_from(c).ok())
    }

    /// Failures raised before any generation happened (bad input or unknown problem).
    pub const fn is_problem_error(&self) -> bool {
        matches!(
            self,
            Self::ProblemNotFound { .. } | Self::GatewayUnavailable { .. }
        )
    }

    /// Boundary rendering: `{ "kind", "message", "context" }`.
    pub fn to_report(&self) -> Value {
        json!({
            "kind": self.kind(),
            "message": self.to_string(),
            "context": self.context(),
        })
    }
}
