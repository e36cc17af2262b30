/*!
 * Explanation service on top of the generative provider.
 *
 * Failures never escape this module as errors: they become an
 * `Explanation::Unavailable` value that the pipeline carries along like any
 * other answer.
 */

use async_trait::async_trait;
use log::{debug, warn};

use crate::errors::ProviderError;
use crate::messages;
use crate::providers::Provider;
use crate::providers::gemini::{GenerateContentRequest, GenerateContentResponse, HarmBlockThreshold};

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Default cap on generated tokens
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 400;

/// Why no explanation text is available
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplanationFailure {
    /// The provider answered without any text
    Empty,
    /// The provider API rejected the request
    Api(String),
    /// Transport or decoding failure
    Unknown(String),
}

/// Result of asking the generative provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    /// Trimmed, non-empty answer text
    Answer(String),
    /// No usable answer
    Unavailable(ExplanationFailure),
}

impl Explanation {
    /// Text shown to the user: the answer, or a warning for failures
    pub fn render(&self) -> String {
        match self {
            Self::Answer(text) => text.clone(),
            Self::Unavailable(ExplanationFailure::Empty) => messages::EMPTY_ANSWER.to_string(),
            Self::Unavailable(ExplanationFailure::Api(message)) => messages::ai_api_error(message),
            Self::Unavailable(ExplanationFailure::Unknown(message)) => messages::ai_unknown_error(message),
        }
    }

    /// Answer text, if any
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Answer(text) => Some(text),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<ProviderError> for ExplanationFailure {
    fn from(error: ProviderError) -> Self {
        if error.is_api_error() {
            Self::Api(error.to_string())
        } else {
            Self::Unknown(error.to_string())
        }
    }
}

/// Produces explanations for prompts
#[async_trait]
pub trait Explainer: Send + Sync {
    /// Ask the provider; never fails, failures are part of the result
    async fn explain(&self, prompt: &str) -> Explanation;
}

/// Generation parameters applied to every request
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Cap on generated tokens
    pub max_output_tokens: u32,
}

impl GenerationSettings {
    /// Settings for `model` with the default temperature and token cap
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Explanation service backed by a generative provider
#[derive(Debug)]
pub struct ExplanationService<P> {
    provider: P,
    settings: GenerationSettings,
}

impl<P> ExplanationService<P>
where
    P: Provider<Request = GenerateContentRequest, Response = GenerateContentResponse>,
{
    /// Create a new explanation service
    pub fn new(provider: P, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Build the request sent for a prompt
    ///
    /// Safety filtering is relaxed on every category so that ordinary phrases
    /// are not refused as false positives.
    pub fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest::new(self.settings.model.clone(), prompt)
            .temperature(self.settings.temperature)
            .max_output_tokens(self.settings.max_output_tokens)
            .safety_threshold(HarmBlockThreshold::BlockNone)
    }

    /// Check that the provider is reachable
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }
}

#[async_trait]
impl<P> Explainer for ExplanationService<P>
where
    P: Provider<Request = GenerateContentRequest, Response = GenerateContentResponse>,
{
    async fn explain(&self, prompt: &str) -> Explanation {
        let request = self.build_request(prompt);

        match self.provider.complete(request).await {
            Ok(response) => {
                if let Some(reason) = response.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_deref()) {
                    warn!("Gemini blocked the prompt: {}", reason);
                }
                let text = P::extract_text(&response);
                if text.is_empty() {
                    debug!("Gemini returned no text");
                    Explanation::Unavailable(ExplanationFailure::Empty)
                } else {
                    Explanation::Answer(text)
                }
            }
            Err(e) => {
                warn!("Gemini request failed: {}", e);
                Explanation::Unavailable(e.into())
            }
        }
    }
}
