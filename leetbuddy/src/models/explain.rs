//! Explanation models.

use leetbuddy_core::types::ProblemSlug;
use serde::{Deserialize, Serialize};

/// Audience an explanation is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationMode {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExplanationMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for ExplanationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated explanation of one problem statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub slug: ProblemSlug,
    pub explanation: String,
}
