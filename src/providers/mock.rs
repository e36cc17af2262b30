/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock translation and generation providers that simulate
 * different behaviors:
 * - `working()` - Always succeeds
 * - `intermittent(n)` - Fails every n-th request
 * - `failing()` - Always fails with an API error
 * - `empty()` - Succeeds with an empty answer
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::gemini::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part};
use crate::providers::google_translate::{TranslateRequest, TranslateResponse};

/// Behavior mode for the mock providers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Shared behavior and request counter
#[derive(Debug, Clone)]
struct MockState {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
}

/// What a single mock call should produce
enum MockOutcome {
    Text,
    Empty,
}

impl MockState {
    fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    async fn next(&self) -> Result<MockOutcome, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(MockOutcome::Text),
            MockBehavior::Intermittent { fail_every } => {
                // Zero behaves like one: every request fails
                let fail_every = fail_every.max(1);
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(MockOutcome::Text)
                }
            }
            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),
            MockBehavior::Empty => Ok(MockOutcome::Empty),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(MockOutcome::Text)
            }
        }
    }

    fn count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

/// Mock translation provider
#[derive(Debug, Clone)]
pub struct MockTranslateProvider {
    state: MockState,
    /// Custom response generator (optional)
    custom_response: Option<fn(&TranslateRequest) -> String>,
}

impl MockTranslateProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            state: MockState::new(behavior),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty translations
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&TranslateRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.state.count()
    }
}

#[async_trait]
impl Provider for MockTranslateProvider {
    type Request = TranslateRequest;
    type Response = TranslateResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        match self.state.next().await? {
            MockOutcome::Text => {
                let text = match self.custom_response {
                    Some(generator) => generator(&request),
                    None => format!("[{}] {}", request.target, request.text),
                };
                Ok(TranslateResponse {
                    segments: vec![text],
                    detected_source: Some(request.source),
                })
            }
            MockOutcome::Empty => Ok(TranslateResponse::default()),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.segments.concat()
    }
}

/// Mock generative provider
#[derive(Debug, Clone)]
pub struct MockGeminiProvider {
    state: MockState,
    /// Custom response generator (optional), called with the prompt
    custom_response: Option<fn(&str) -> String>,
}

impl MockGeminiProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            state: MockState::new(behavior),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns no candidates
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.state.count()
    }

    /// Build a single-candidate response
    pub fn response_with_text(text: impl Into<String>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part { text: Some(text.into()) }],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            ..Default::default()
        }
    }
}

#[async_trait]
impl Provider for MockGeminiProvider {
    type Request = GenerateContentRequest;
    type Response = GenerateContentResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        match self.state.next().await? {
            MockOutcome::Text => {
                let prompt = request.prompt().unwrap_or_default();
                let text = match self.custom_response {
                    Some(generator) => generator(prompt),
                    None => format!("[EXPLAINED] {}", prompt),
                };
                Ok(Self::response_with_text(text))
            }
            MockOutcome::Empty => Ok(GenerateContentResponse::default()),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        crate::providers::gemini::Gemini::extract_text(response)
    }
}
