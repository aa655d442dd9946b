//! Test-case generation models.

use leetbuddy_core::types::{OutputSchema, ProblemSlug, StructuredOutput};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

/// Target difficulty of generated test cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    /// Generation rules appended to the test-case system prompt.
    pub const fn rules(&self) -> &'static str {
        match self {
            Self::Easy => {
                "- Focus on basic functionality\n\
                 - Use simple, straightforward inputs\n\
                 - Keep inputs small\n\
                 - Exercise the core behavior of the algorithm"
            }
            Self::Medium => {
                "- Include scenarios of moderate complexity\n\
                 - Probe boundary conditions without turning them into edge cases\n\
                 - Use medium-sized inputs\n\
                 - Cover more than one solution path"
            }
            Self::Hard => {
                "- Build complex, challenging scenarios\n\
                 - Use larger inputs where the problem allows it\n\
                 - Stress the efficiency requirements of the problem\n\
                 - Include intricate cases that need a deep understanding of the problem"
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected EASY, MEDIUM or HARD)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Self::Easy),
            "MEDIUM" => Ok(Self::Medium),
            "HARD" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// One generated test case as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    /// Input in the problem's own format.
    pub content: String,
    pub expected_result: String,
    pub is_edge_case: bool,
}

/// Test cases generated for one problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseSet {
    pub slug: ProblemSlug,
    pub test_cases: Vec<TestCase>,
}

/// LLM-facing shape of one test case.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedTestCase {
    pub content: String,
    pub expected_result: String,
    pub is_edge_case: bool,
}

/// LLM-facing structured output for test-case generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProblemTestCases {
    pub test_cases: Vec<GeneratedTestCase>,
}

pub const PROBLEM_TEST_CASES_SCHEMA: &str = "problem_test_cases";

// Built once so every call shares the compiled validator.
static PROBLEM_TEST_CASES_OUTPUT: Lazy<OutputSchema> = Lazy::new(|| {
    OutputSchema::new(
        PROBLEM_TEST_CASES_SCHEMA,
        json!({
            "type": "object",
            "properties": {
                "test_cases": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "content": { "type": "string" },
                            "expected_result": { "type": "string" },
                            "is_edge_case": { "type": "boolean" }
                        },
                        "required": ["content", "expected_result", "is_edge_case"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["test_cases"],
            "additionalProperties": false
        }),
    )
    .with_description("Practice test cases for a coding-interview problem")
});

impl StructuredOutput for ProblemTestCases {
    fn output_schema() -> OutputSchema {
        PROBLEM_TEST_CASES_OUTPUT.clone()
    }
}

impl From<GeneratedTestCase> for TestCase {
    fn from(tc: GeneratedTestCase) -> Self {
        Self {
            content: tc.content,
            expected_result: tc.expected_result,
            is_edge_case: tc.is_edge_case,
        }
    }
}
