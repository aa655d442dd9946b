//! Request and result models for the pipelines.

pub mod explain;
pub mod testcase;

pub use explain::{Explanation, ExplanationMode};
pub use testcase::{
    Difficulty, GeneratedTestCase, PROBLEM_TEST_CASES_SCHEMA, ParseDifficultyError,
    ProblemTestCases, TestCase,
    TestCaseSet,
};
