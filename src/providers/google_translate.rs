use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Google Translate client using the public `gtx` endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the translation service
    endpoint: String,
}

/// A single translation request
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, or "auto" for detection
    pub source: String,
    /// Target language code
    pub target: String,
}

/// Parsed translation response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslateResponse {
    /// Translated sentence segments, in order
    pub segments: Vec<String>,
    /// Source language reported by the service
    pub detected_source: Option<String>,
}

impl TranslateRequest {
    /// Create a new translation request
    pub fn new(text: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

impl TranslateResponse {
    /// Parse the nested-array body returned by the `gtx` endpoint
    ///
    /// The body looks like `[[["Привет","Hello",null,null,10], ...], null, "en", ...]`:
    /// element 0 holds the sentence segments and element 2 the detected language.
    pub fn from_json(value: &Value) -> Result<Self, ProviderError> {
        let sentences = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("missing sentence array in translation response".to_string()))?;

        let segments = sentences
            .iter()
            .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        let detected_source = value.get(2).and_then(Value::as_str).map(str::to_string);

        Ok(Self { segments, detected_source })
    }
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the request URL with all query parameters encoded
    pub fn request_url(&self, request: &TranslateRequest) -> Result<Url, ProviderError> {
        let base = if self.endpoint.is_empty() {
            "https://translate.googleapis.com".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        };

        Url::parse_with_params(
            &format!("{}/translate_a/single", base),
            &[
                ("client", "gtx"),
                ("sl", request.source.as_str()),
                ("tl", request.target.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid translation endpoint: {}", e)))
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = TranslateRequest;
    type Response = TranslateResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = self.request_url(&request)?;
        debug!("Translating {} chars {} -> {}", request.text.chars().count(), request.source, request.target);

        let response = self.client.get(url)
            .send()
            .await
            .map_err(ProviderError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, error_text);
            return Err(ProviderError::from_status(status.as_u16(), error_text));
        }

        let body = response.json::<Value>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse translation response: {}", e)))?;

        TranslateResponse::from_json(&body)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(TranslateRequest::new("hello", "en", "ru")).await?;
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.segments.concat().trim().to_string()
    }
}
