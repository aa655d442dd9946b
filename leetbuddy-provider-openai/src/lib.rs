//! leetbuddy-provider-openai
//!
//! OpenAI implementation of the leetbuddy LLM port. Text generation and
//! `json_schema` structured outputs both go through `/chat/completions`.
#![deny(unsafe_code)]

pub mod providers;

pub use providers::openai::{OPENAI_PROVIDER_ID, OpenAiClient, OpenAiConfig};
