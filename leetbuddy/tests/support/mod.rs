//! Hand-written fakes for the pipeline ports.
#![allow(dead_code)]

use async_trait::async_trait;
use leetbuddy_core::error::{BuddyError, Result, keys};
use leetbuddy_core::traits::{LlmPort, ProblemDetailsGateway, StructuredCapability, TextCapability};
use leetbuddy_core::types::{
    GenerationRequest, GenerationResponse, OutputSchema, ProblemDetails, ProblemSlug,
};
use serde_json::{Value, json};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn details(slug: &str, title: &str) -> ProblemDetails {
    ProblemDetails {
        slug: ProblemSlug::new(slug).unwrap(),
        title: title.to_string(),
        content: format!("<p>Statement of {title}.</p>"),
        example_testcases: format!("example-of-{slug}"),
        difficulty: "Medium".to_string(),
    }
}

/// In-memory gateway with an optional artificial delay.
#[derive(Default)]
pub struct FakeGateway {
    problems: HashMap<String, ProblemDetails>,
    delay: Option<Duration>,
    failure: Option<fn(&ProblemSlug) -> BuddyError>,
}

impl FakeGateway {
    pub fn with_problem(mut self, details: ProblemDetails) -> Self {
        self.problems.insert(details.slug.as_str().to_string(), details);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(failure: fn(&ProblemSlug) -> BuddyError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ProblemDetailsGateway for FakeGateway {
    async fn fetch(&self, slug: &ProblemSlug) -> Result<ProblemDetails> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(failure) = self.failure {
            return Err(failure(slug));
        }
        self.problems.get(slug.as_str()).cloned().ok_or_else(|| {
            BuddyError::problem_not_found(format!("no problem with slug '{slug}'"))
                .with_context(keys::SLUG, slug.as_str())
        })
    }
}

/// What the fake LLM answers with.
pub enum Reply {
    /// `n` well-formed, non-edge test cases derived from the prompt.
    TestCases(usize),
    /// A raw structured value returned as-is (may violate the schema).
    Raw(Value),
    /// Plain text.
    Text(String),
    Fail(BuddyError),
}

/// Scriptable LLM port that records every request it sees.
pub struct FakeLlm {
    reply: Reply,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeLlm {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }

    /// Highest number of calls that were inside the port at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn record(&self, request: &GenerationRequest) {
        self.requests.lock().unwrap().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

fn test_cases_for(request: &GenerationRequest, n: usize) -> Value {
    // Tag each case with the problem prose so callers can check slug association.
    let marker = request
        .user_prompt
        .lines()
        .find(|l| l.starts_with("<p>Statement of "))
        .unwrap_or("unknown")
        .to_string();
    let cases: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "content": format!("{marker} #{i}"),
                "expected_result": format!("{i}"),
                "is_edge_case": false
            })
        })
        .collect();
    json!({ "test_cases": cases })
}

#[async_trait]
impl StructuredCapability for FakeLlm {
    async fn generate_structured(
        &self,
        request: GenerationRequest,
        schema: &OutputSchema,
    ) -> Result<GenerationResponse<Value>> {
        self.record(&request).await;
        match &self.reply {
            Reply::TestCases(n) => Ok(GenerationResponse::new(
                test_cases_for(&request, *n),
                "fake-1",
                "fake",
            )),
            Reply::Raw(v) => Ok(GenerationResponse::new(v.clone(), "fake-1", "fake")),
            Reply::Text(_) => Err(BuddyError::structured_output_not_generated(
                "fake",
                &schema.name,
                "text reply",
            )),
            Reply::Fail(e) => Err(clone_error(e)),
        }
    }
}

#[async_trait]
impl TextCapability for FakeLlm {
    async fn generate_text(&self, request: GenerationRequest) -> Result<String> {
        self.record(&request).await;
        match &self.reply {
            Reply::Text(t) if !t.trim().is_empty() => Ok(t.clone()),
            Reply::Text(_) => Err(BuddyError::empty_response("fake")),
            Reply::Fail(e) => Err(clone_error(e)),
            _ => Err(BuddyError::provider_error("fake", "unexpected text call")),
        }
    }
}

impl LlmPort for FakeLlm {
    fn provider_id(&self) -> Cow<'static, str> {
        Cow::Borrowed("fake")
    }

    fn model_name(&self) -> &str {
        "fake-1"
    }
}

/// `BuddyError` is not `Clone`; rebuild a same-kind error for scripted failures.
fn clone_error(e: &BuddyError) -> BuddyError {
    let mut out = match e.kind() {
        leetbuddy_core::ErrorKind::EmptyResponse => BuddyError::empty_response("fake"),
        leetbuddy_core::ErrorKind::StructuredOutputNotGenerated => {
            BuddyError::structured_output_not_generated("fake", "problem_test_cases", e.message())
        }
        _ => BuddyError::provider_error("fake", e.message()),
    };
    for (k, v) in e.context().iter() {
        out = out.with_context(k.clone(), v.clone());
    }
    out
}
