//! Core types: generation envelope, output schemas and problem models.

pub mod generation;
pub mod problem;
pub mod schema;

pub use generation::{DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT, GenerationRequest, GenerationResponse};
pub use problem::{ProblemDetails, ProblemSlug};
pub use schema::{OutputSchema, StructuredOutput, decode_structured, parse_json_text};
