//! Utility helpers shared across crates.

pub mod builder_helpers;
