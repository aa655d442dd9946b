//! Capability traits (ports) implemented by providers and gateways.

pub mod gateway;
pub mod generation;

pub use gateway::ProblemDetailsGateway;
pub use generation::{LlmPort, StructuredCapability, TextCapability, generate_object};
