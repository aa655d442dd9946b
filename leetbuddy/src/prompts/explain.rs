//! Explanation prompts.

use leetbuddy_core::types::ProblemDetails;

use crate::models::ExplanationMode;

const GUIDELINES: &str = "\
<GUIDELINES>
- You MUST NOT provide any code or any solution to the problem.
- You MUST NOT go beyond the borders of the problem.
- You MUST focus on the problem statement in the <PROBLEM_STATEMENT> section.
- You MUST take into account the edge cases and constraints stated in the problem statement.
</GUIDELINES>
<OUTPUT_FORMAT>
- A simple explanation in plain text.
- You MUST NOT provide any code or any solution to the problem.
</OUTPUT_FORMAT>";

const fn audience(mode: ExplanationMode) -> &'static str {
    match mode {
        ExplanationMode::Beginner => {
            "Explain the problem as if you were talking to a complete beginner \
             or a 5-year-old child."
        }
        ExplanationMode::Intermediate => {
            "Explain the problem to someone who knows basic data structures \
             but finds the statement confusing."
        }
        ExplanationMode::Advanced => {
            "Explain the problem to an experienced programmer: \
             be concise and highlight the constraints that matter."
        }
    }
}

/// Teaching guidelines, the audience for `mode` and the verbatim problem prose.
pub fn system_prompt(details: &ProblemDetails, mode: ExplanationMode) -> String {
    format!(
        "You are an expert teacher with years of experience who explains LeetCode \
         problem statements and makes them easy to understand.\n\
         Problem statements are often complex and can lead to a wrong approach.\n\
         Your task is to explain the problem statement \
         so the user understands what they have to do.\n\
         {audience}\n\
         {GUIDELINES}\n\
         <PROBLEM_STATEMENT>\n{content}\n</PROBLEM_STATEMENT>",
        audience = audience(mode),
        content = details.content,
    )
}

pub fn user_prompt(mode: ExplanationMode) -> String {
    format!("Explain the problem statement. {}", audience(mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use leetbuddy_core::types::ProblemSlug;

    fn details() -> ProblemDetails {
        ProblemDetails {
            slug: ProblemSlug::new("valid-parentheses").unwrap(),
            title: "Valid Parentheses".into(),
            content: "<p>Given a string s containing just the characters '(', ')'...</p>".into(),
            example_testcases: "\"()\"".into(),
            difficulty: "Easy".into(),
        }
    }

    #[test]
    fn system_prompt_carries_prose_verbatim() {
        let prompt = system_prompt(&details(), ExplanationMode::Beginner);
        assert!(prompt.contains(&format!(
            "<PROBLEM_STATEMENT>\n{}\n</PROBLEM_STATEMENT>",
            details().content
        )));
        assert!(prompt.contains("MUST NOT provide any code"));
        assert!(prompt.contains("complete beginner"));
    }

    #[test]
    fn guidelines_are_shared_by_every_mode() {
        for mode in [
            ExplanationMode::Beginner,
            ExplanationMode::Intermediate,
            ExplanationMode::Advanced,
        ] {
            let prompt = system_prompt(&details(), mode);
            assert!(prompt.contains(GUIDELINES));
            assert!(prompt.contains(audience(mode)));
        }
    }

    #[test]
    fn user_prompt_is_short_and_fixed() {
        assert_eq!(user_prompt(ExplanationMode::Beginner), user_prompt(ExplanationMode::default()));
        assert!(user_prompt(ExplanationMode::Beginner).contains("beginner"));
    }
}
