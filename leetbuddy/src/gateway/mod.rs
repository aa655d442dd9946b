//! Problem-details gateway adapters.

pub mod http;

pub use http::{DEFAULT_PROBLEM_ENDPOINT, HttpProblemGateway};
