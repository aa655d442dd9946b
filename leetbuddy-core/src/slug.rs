//! Problem slug extraction
//!
//! Turns free-form user text ("LeetCode 1. Two Sum problem", "two sum",
//! "two-sum") into a canonical [`ProblemSlug`]. Extraction is pure and
//! deterministic, and every canonical slug is a fixed point.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BuddyError, Result, keys};
use crate::types::ProblemSlug;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid slug rule {pattern:?}: {e}"))
}

// Vendor tag only counts when separated from the name or directly followed by a
// problem number ("leetcode1. two sum"), so "leetcode-x" stays intact.
static VENDOR_PREFIX: Lazy<Regex> = Lazy::new(|| {
    compile(r"^leetcode(?:\s*[:#.]\s*|\s+|\s*#?\d+(?:\s*[.:)\-]+\s*|\s+))")
});
// Digits only count when followed by punctuation or whitespace ("3sum" stays intact).
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| compile(r"^#?\d+(?:\s*[.:)\-]+\s*|\s+)"));
static TRAILING_KEYWORD: Lazy<Regex> =
    Lazy::new(|| compile(r"\s+(?:problem|question)[^a-z0-9]*$"));
static DISALLOWED: Lazy<Regex> = Lazy::new(|| compile(r"[^a-z0-9\s_-]"));
static SEPARATORS: Lazy<Regex> = Lazy::new(|| compile(r"[\s_]+"));
static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| compile(r"-{2,}"));

/// Port for turning user text into a problem slug.
pub trait SlugExtractor: Send + Sync {
    fn extract(&self, raw: &str) -> Result<ProblemSlug>;
}

/// Default rule-based extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedSlugExtractor;

impl RuleBasedSlugExtractor {
    pub const fn new() -> Self {
        Self
    }
}

impl SlugExtractor for RuleBasedSlugExtractor {
    fn extract(&self, raw: &str) -> Result<ProblemSlug> {
        extract_slug(raw)
    }
}

/// Normalize `raw` into a slug candidate without validating it.
pub fn normalize(raw: &str) -> String {
    let text = raw.trim().to_lowercase();

    let text = VENDOR_PREFIX.replace(&text, "");
    let text = NUMERIC_PREFIX.replace(&text, "");
    let text = TRAILING_KEYWORD.replace(&text, "");
    let text = DISALLOWED.replace_all(&text, "");
    let text = SEPARATORS.replace_all(text.trim(), "-");
    let text = HYPHEN_RUNS.replace_all(&text, "-");

    text.trim_matches('-').to_string()
}

/// Extract a canonical slug from free-form text.
///
/// Fails with `ProblemNotFound` when the input is blank or normalizes to
/// something that is not a valid slug; the attempted slug is kept in context.
pub fn extract_slug(raw: &str) -> Result<ProblemSlug> {
    if raw.trim().is_empty() {
        return Err(BuddyError::problem_not_found("no problem name was given")
            .with_context(keys::INPUT, raw));
    }

    let candidate = normalize(raw);
    tracing::debug!(input_len = raw.len(), candidate = %candidate, "normalized problem slug");

    ProblemSlug::new(candidate.clone()).map_err(|e| {
        BuddyError::problem_not_found(format!(
            "could not derive a problem slug: {}",
            e.message()
        ))
        .with_context(keys::ATTEMPTED_SLUG, candidate)
        .with_context(keys::INPUT, raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    fn slug(raw: &str) -> String {
        extract_slug(raw).unwrap().into_inner()
    }

    #[test]
    fn strips_vendor_number_and_keyword() {
        assert_eq!(slug("LeetCode 1. Two Sum problem"), "two-sum");
        assert_eq!(slug("leetcode #1 - Two Sum"), "two-sum");
        assert_eq!(slug("LeetCode: Valid Parentheses question"), "valid-parentheses");
        assert_eq!(slug("20) valid parentheses"), "valid-parentheses");
    }

    #[test]
    fn number_may_follow_vendor_tag_directly() {
        assert_eq!(slug("LeetCode1. Two Sum"), "two-sum");
        assert_eq!(slug("leetcode#20 valid parentheses"), "valid-parentheses");
        assert_eq!(slug("leetcode 1: two sum"), "two-sum");
    }

    #[test]
    fn normalizes_separators_and_punctuation() {
        assert_eq!(slug("  Two   Sum  "), "two-sum");
        assert_eq!(slug("merge_two_sorted_lists"), "merge-two-sorted-lists");
        assert_eq!(slug("Best Time to Buy & Sell Stock!"), "best-time-to-buy-sell-stock");
        assert_eq!(slug("--two---sum--"), "two-sum");
        assert_eq!(slug("Two-Sum"), "two-sum");
    }

    #[test]
    fn keeps_words_that_only_look_like_prefixes() {
        assert_eq!(slug("leetcode-contest"), "leetcode-contest");
        assert_eq!(slug("problem-solving"), "problem-solving");
    }

    #[test]
    fn blank_input_is_not_found() {
        for raw in ["", "   ", "\t\n"] {
            let err = extract_slug(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ProblemNotFound);
            assert_eq!(err.context().get_str(keys::INPUT), Some(raw));
        }
    }

    #[test]
    fn hyphens_only_is_not_found() {
        let err = extract_slug("---").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProblemNotFound);
        assert_eq!(err.context().get_str(keys::ATTEMPTED_SLUG), Some(""));
    }

    #[test]
    fn digits_do_not_form_a_valid_slug() {
        let err = extract_slug("15. 3Sum").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProblemNotFound);
        assert_eq!(err.context().get_str(keys::ATTEMPTED_SLUG), Some("3sum"));
    }

    #[test]
    fn extractor_port_delegates() {
        let extractor = RuleBasedSlugExtractor::new();
        assert_eq!(extractor.extract("Two Sum").unwrap().as_str(), "two-sum");
    }

    proptest! {
        #[test]
        fn canonical_slugs_are_fixed_points(s in "[a-z]{1,10}(-[a-z]{1,10}){0,5}") {
            prop_assert_eq!(slug(&s), s.clone());
        }

        #[test]
        fn extraction_is_idempotent(raw in "[A-Za-z0-9 _.#-]{0,40}") {
            if let Ok(first) = extract_slug(&raw) {
                let second = extract_slug(first.as_str()).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }
}
