//! Orchestration pipelines.

pub mod explain;
pub mod testcase;

pub use explain::ExplanationPipeline;
pub use testcase::{
    DEFAULT_TESTCASE_TEMPERATURE, MAX_TEST_CASES, MIN_TEST_CASES, TestCasePipeline, clamp_count,
};
