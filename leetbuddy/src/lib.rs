//! # LeetBuddy
//!
//! Practice test cases and beginner-friendly explanations for coding-interview
//! problems, generated through any LLM provider registered with
//! `leetbuddy-registry`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leetbuddy::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let _guard = leetbuddy::telemetry::init_default()?;
//!
//!     let config = BuddyConfig::from_env()?;
//!     let services = Services::from_config(&config, &default_registry()).await?;
//!
//!     let set = services
//!         .generate_test_cases("LeetCode 1. Two Sum problem", Difficulty::Medium, 3)
//!         .await?;
//!     for tc in &set.test_cases {
//!         println!("{} -> {}", tc.content, tc.expected_result);
//!     }
//!
//!     let explanation = services.explain_problem("two sum").await?;
//!     println!("{}", explanation.explanation);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`BuddyError`]. Unknown problems surface as
//! `ProblemNotFound`, an unreachable problem source as `GatewayUnavailable`,
//! and generation failures as `TestCasesNotGenerated` / `ExplanationFailed`
//! with the provider-level cause chained as `source()`.
#![deny(unsafe_code)]

pub mod config;
pub mod gateway;
pub mod models;
pub mod pipeline;
pub mod prelude;
pub mod prompts;
pub mod services;
pub mod telemetry;

pub use config::BuddyConfig;
pub use leetbuddy_core::{BuddyError, ErrorKind, Result};
pub use services::{Services, default_registry};

pub use leetbuddy_core;
pub use leetbuddy_registry;
