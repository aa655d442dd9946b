//! leetbuddy-core
//!
//! Provider-agnostic core: the error taxonomy, the generation envelope, output
//! schemas, problem identifiers, slug extraction and the LLM / gateway ports.
//! Vendor implementations and the pipelines live in other crates.
#![deny(unsafe_code)]

pub mod error;
pub mod execution;
pub mod slug;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::{BuddyError, ErrorContext, ErrorKind, Result};
pub use slug::{RuleBasedSlugExtractor, SlugExtractor, extract_slug};
pub use traits::{
    LlmPort, ProblemDetailsGateway, StructuredCapability, TextCapability, generate_object,
};
pub use types::{
    GenerationRequest, GenerationResponse, OutputSchema, ProblemDetails, ProblemSlug,
    StructuredOutput,
};
