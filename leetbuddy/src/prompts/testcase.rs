//! Test-case prompts.

use leetbuddy_core::types::ProblemDetails;

use crate::models::Difficulty;

const GUIDELINES: &str = "\
You are an expert at writing test cases for LeetCode problems. Your task is to:

1. Identify the problem from the supplied problem statement.
2. Generate diverse, non-edge test cases for the requested difficulty level.
3. Make the test cases cover different scenarios without being edge cases.
4. Analyze the problem statement and its example test cases BEFORE generating anything.
5. Read the problem description and its constraints BEFORE generating anything.

You MAY generate test cases ONLY for the problem described in the supplied problem statement.
You MUST NOT generate test cases for any other problem.

Guidelines:
- Generate NORMAL test cases only, never edge cases
- Cover different input patterns and scenarios
- Make sure every expected result is correct
- Use the input and output format of the problem
- Scale the challenge of the test cases with the difficulty
- NEVER reproduce test cases that already appear in the problem description or its examples
- Write test cases that help the user check their own approach to the problem
YOU MUST NOT GENERATE EDGE CASES.";

/// Fixed guidelines followed by the rules for `difficulty`.
pub fn system_prompt(difficulty: Difficulty) -> String {
    format!("{GUIDELINES}\n\nDifficulty: {difficulty}\n{}", difficulty.rules())
}

/// Requested count, problem prose and example cases.
pub fn user_prompt(details: &ProblemDetails, count: u32) -> String {
    format!(
        "Generate {count} test cases for the problem in the <PROBLEM_STATEMENT> section.\n\
         YOU MUST NOT GENERATE EDGE CASES. \
         YOU MUST NOT REPEAT TEST CASES THAT ALREADY APPEAR IN THE <EXAMPLE_TESTCASES> SECTION.\n\
         <PROBLEM_STATEMENT>\n{content}\n</PROBLEM_STATEMENT>\n\
         <EXAMPLE_TESTCASES>\n{examples}\n</EXAMPLE_TESTCASES>\n",
        content = details.content,
        examples = details.example_testcases,
    )
}
