//! Problem identifiers and details.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BuddyError, Result, keys};

static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]+(-[a-z]+)*$").unwrap_or_else(|e| panic!("invalid slug pattern: {e}"))
});

/// Canonical problem key: lowercase ASCII letters joined by single hyphens.
///
/// Construction fails closed; a `ProblemSlug` that exists is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProblemSlug(String);

impl ProblemSlug {
    /// Validate and wrap `slug`.
    ///
    /// Fails with `ProblemNotFound` (attempted slug in context) when the value
    /// is empty, hyphens only, or outside `^[a-z]+(-[a-z]+)*$`.
    pub fn new(slug: impl Into<String>) -> Result<Self> {
        let slug = slug.into();
        if SLUG_PATTERN.is_match(&slug) {
            Ok(Self(slug))
        } else {
            let reason = if slug.trim().is_empty() {
                "slug is empty"
            } else if slug.chars().all(|c| c == '-') {
                "slug contains only hyphens"
            } else {
                "slug must contain only lowercase letters separated by single hyphens"
            };
            Err(BuddyError::problem_not_found(reason).with_context(keys::ATTEMPTED_SLUG, slug))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProblemSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProblemSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ProblemSlug {
    type Error = BuddyError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for ProblemSlug {
    type Error = BuddyError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for ProblemSlug {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Snapshot of one problem as returned by the problem-details gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub slug: ProblemSlug,
    pub title: String,
    /// Problem statement body (HTML or plain text, passed to prompts verbatim).
    pub content: String,
    /// Example test cases as one raw text block.
    pub example_testcases: String,
    /// Difficulty as stated by the problem source ("Easy", "Medium", "Hard").
    pub difficulty: String,
}
