//! `OpenAI` provider.

mod client;
mod config;
pub mod errors;
mod types;

pub use client::OpenAiClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiConfig};

/// Provider id used in registries, logs and error context.
pub const OPENAI_PROVIDER_ID: &str = "openai";
