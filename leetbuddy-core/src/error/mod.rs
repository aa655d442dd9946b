//! Error Handling Module
//!
//! A single closed taxonomy shared by ports, providers and pipelines:
//! - `BuddyError`: one tagged variant per failure kind, each carrying an
//!   `ErrorContext` with machine-readable diagnostics
//! - `ErrorKind`: the `Copy` discriminant used at the boundary
//!
//! # Example
//!
//! ```rust,ignore
//! use leetbuddy_core::error::{BuddyError, ErrorKind};
//!
//! let error = BuddyError::problem_not_found("unknown problem").with_context("slug", "two-sum");
//! assert_eq!(error.kind(), ErrorKind::ProblemNotFound);
//! assert_eq!(error.context().get_str("slug"), Some("two-sum"));
//! ```

mod context;
pub mod types;

pub use context::ErrorContext;
pub use types::*;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, BuddyError>;
