//! Test-case pipeline behavior against fake ports.

mod support;

use leetbuddy::models::Difficulty;
use leetbuddy::pipeline::TestCasePipeline;
use leetbuddy_core::error::{BuddyError, keys};
use leetbuddy_core::{ErrorKind, RuleBasedSlugExtractor};
use serde_json::json;
use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;
use support::{FakeGateway, FakeLlm, Reply, details};

fn pipeline(gateway: FakeGateway, llm: Arc<FakeLlm>) -> TestCasePipeline {
    TestCasePipeline::new(Arc::new(RuleBasedSlugExtractor), Arc::new(gateway), llm)
}

fn known_problems() -> FakeGateway {
    FakeGateway::default()
        .with_problem(details("two-sum", "Two Sum"))
        .with_problem(details("valid-parentheses", "Valid Parentheses"))
}

fn cause_kind(err: &BuddyError) -> Option<ErrorKind> {
    err.source()
        .and_then(|s| s.downcast_ref::<BuddyError>())
        .map(BuddyError::kind)
}

#[tokio::test]
async fn generates_non_edge_cases_for_easy_and_medium() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium] {
        let llm = Arc::new(FakeLlm::new(Reply::TestCases(3)));
        let set = pipeline(known_problems(), llm.clone())
            .generate("LeetCode 1. Two Sum problem", difficulty, 3)
            .await
            .unwrap();

        assert_eq!(set.slug.as_str(), "two-sum");
        assert_eq!(set.test_cases.len(), 3);
        assert!(set.test_cases.iter().all(|tc| !tc.is_edge_case));

        let request = llm.last_request();
        assert!(request.system_prompt.unwrap().ends_with(difficulty.rules()));
        assert!(request.user_prompt.contains("example-of-two-sum"));
    }
}

#[tokio::test]
async fn count_above_ten_behaves_like_ten() {
    let llm = Arc::new(FakeLlm::new(Reply::TestCases(12)));
    let p = pipeline(known_problems(), llm.clone());

    let capped = p.generate("two sum", Difficulty::Hard, 15).await.unwrap();
    let capped_prompt = llm.last_request().user_prompt;
    let ten = p.generate("two sum", Difficulty::Hard, 10).await.unwrap();
    let ten_prompt = llm.last_request().user_prompt;

    assert_eq!(capped.test_cases.len(), 10);
    assert_eq!(capped, ten);
    assert_eq!(capped_prompt, ten_prompt);
    assert!(capped_prompt.starts_with("Generate 10 test cases"));
}

#[tokio::test]
async fn zero_count_asks_for_one() {
    let llm = Arc::new(FakeLlm::new(Reply::TestCases(1)));
    let set = pipeline(known_problems(), llm.clone())
        .generate("two-sum", Difficulty::Easy, 0)
        .await
        .unwrap();
    assert_eq!(set.test_cases.len(), 1);
    assert!(llm.last_request().user_prompt.starts_with("Generate 1 test cases"));
}

#[tokio::test]
async fn uses_pipeline_temperature() {
    let llm = Arc::new(FakeLlm::new(Reply::TestCases(1)));
    let p = pipeline(known_problems(), llm.clone());
    p.generate("two-sum", Difficulty::Easy, 1).await.unwrap();
    assert_eq!(llm.last_request().temperature, 0.7);

    let p = p.with_temperature(0.3).with_timeout(Duration::from_secs(2));
    assert_eq!(p.temperature(), 0.3);
    p.generate("two-sum", Difficulty::Easy, 1).await.unwrap();
    let request = llm.last_request();
    assert_eq!(request.temperature, 0.3);
    assert_eq!(request.timeout, Some(Duration::from_secs(2)));
}

#[tokio::test]
async fn blank_input_is_problem_not_found_without_any_calls() {
    let llm = Arc::new(FakeLlm::new(Reply::TestCases(1)));
    let err = pipeline(known_problems(), llm.clone())
        .generate("   ", Difficulty::Easy, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProblemNotFound);
    assert!(llm.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_problem_passes_through() {
    let llm = Arc::new(FakeLlm::new(Reply::TestCases(1)));
    let err = pipeline(known_problems(), llm)
        .generate("merge k sorted lists", Difficulty::Hard, 2)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProblemNotFound);
    assert_eq!(err.context().get_str(keys::SLUG), Some("merge-k-sorted-lists"));
}

#[tokio::test]
async fn gateway_unavailable_is_not_wrapped() {
    let gateway = FakeGateway::failing(|slug| {
        BuddyError::gateway_unavailable("unexpected status 503")
            .with_context(keys::SLUG, slug.as_str())
            .with_context(keys::STATUS_CODE, 503)
    });
    let llm = Arc::new(FakeLlm::new(Reply::TestCases(1)));
    let err = pipeline(gateway, llm.clone())
        .generate("two sum", Difficulty::Easy, 1)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::GatewayUnavailable);
    assert_eq!(err.status_code(), Some(503));
    assert!(llm.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn provider_failure_becomes_test_cases_not_generated() {
    let cause = BuddyError::provider_error("fake", "HTTP 500").with_context(keys::STATUS_CODE, 500);
    let llm = Arc::new(FakeLlm::new(Reply::Fail(cause)));
    let err = pipeline(known_problems(), llm)
        .generate("two sum", Difficulty::Medium, 2)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TestCasesNotGenerated);
    assert_eq!(err.to_string(), "Could not generate test cases.");
    assert!(err.status_code().is_none());
    assert_eq!(cause_kind(&err), Some(ErrorKind::ProviderError));
}

#[tokio::test]
async fn schema_violation_becomes_test_cases_not_generated() {
    let llm = Arc::new(FakeLlm::new(Reply::Raw(json!({
        "test_cases": [{ "content": "[1]", "expected_result": 1, "is_edge_case": false }]
    }))));
    let err = pipeline(known_problems(), llm)
        .generate("two sum", Difficulty::Medium, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TestCasesNotGenerated);
    assert_eq!(cause_kind(&err), Some(ErrorKind::StructuredOutputNotGenerated));
}

#[tokio::test]
async fn empty_case_list_becomes_test_cases_not_generated() {
    let llm = Arc::new(FakeLlm::new(Reply::Raw(json!({ "test_cases": [] }))));
    let err = pipeline(known_problems(), llm)
        .generate("two sum", Difficulty::Medium, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TestCasesNotGenerated);
    assert_eq!(cause_kind(&err), Some(ErrorKind::StructuredOutputNotGenerated));
}

#[tokio::test]
async fn concurrent_calls_overlap_and_keep_their_own_slugs() {
    let llm = Arc::new(FakeLlm::new(Reply::TestCases(2)).with_delay(Duration::from_millis(100)));
    let p = pipeline(known_problems().with_delay(Duration::from_millis(10)), llm.clone());

    let (a, b) = tokio::join!(
        p.generate("Two Sum", Difficulty::Easy, 2),
        p.generate("valid parentheses question", Difficulty::Medium, 2),
    );

    let a = a.unwrap();
    let b = b.unwrap();
    assert_eq!(a.slug.as_str(), "two-sum");
    assert_eq!(b.slug.as_str(), "valid-parentheses");
    assert!(a.test_cases.iter().all(|tc| tc.content.contains("Two Sum")));
    assert!(b.test_cases.iter().all(|tc| tc.content.contains("Valid Parentheses")));
    assert_eq!(llm.max_in_flight(), 2, "generation calls did not overlap");
}

#[tokio::test]
async fn many_concurrent_calls_complete_independently() {
    let llm = Arc::new(FakeLlm::new(Reply::TestCases(1)).with_delay(Duration::from_millis(20)));
    let p = pipeline(known_problems(), llm.clone());
    let inputs = ["two sum", "valid parentheses"].repeat(4);

    let calls = inputs.iter().map(|input| p.generate(input, Difficulty::Easy, 1));
    let results = futures::future::join_all(calls).await;

    for (input, result) in inputs.iter().zip(results) {
        assert_eq!(result.unwrap().slug.as_str(), input.replace(' ', "-"));
    }
    assert_eq!(llm.requests.lock().unwrap().len(), 8);
}
