//! Prompt builders. Pure and deterministic; no I/O.

pub mod explain;
pub mod testcase;
