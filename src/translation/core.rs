/*!
 * Core translation service implementation.
 *
 * This module contains the `Translator` seam used by the pipeline and the
 * `TranslationService` that implements it on top of a translation provider.
 * Source and target languages are call parameters, so one service instance
 * is safely shared by every concurrent request.
 */

use async_trait::async_trait;
use log::{debug, warn};

use crate::errors::TranslationError;
use crate::language_utils::{Language, SourceLanguage};
use crate::providers::Provider;
use crate::providers::google_translate::{TranslateRequest, TranslateResponse};

/// Default provider limit on characters per request
pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Translates text between languages
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` into `target`
    ///
    /// Never returns an empty string on success: an empty provider result
    /// falls back to the original text.
    async fn translate(&self, text: &str, source: SourceLanguage, target: Language) -> Result<String, TranslationError>;
}

/// Translation service backed by a translation provider
#[derive(Debug)]
pub struct TranslationService<P> {
    /// Provider used for every request
    provider: P,
    /// Maximum characters accepted per request
    max_chars: usize,
}

impl<P> TranslationService<P>
where
    P: Provider<Request = TranslateRequest, Response = TranslateResponse>,
{
    /// Create a new translation service
    pub fn new(provider: P, max_chars: usize) -> Self {
        Self { provider, max_chars }
    }

    /// Underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Check that the provider is reachable
    pub async fn test_connection(&self) -> Result<(), TranslationError> {
        self.provider.test_connection().await?;
        Ok(())
    }
}

#[async_trait]
impl<P> Translator for TranslationService<P>
where
    P: Provider<Request = TranslateRequest, Response = TranslateResponse>,
{
    async fn translate(&self, text: &str, source: SourceLanguage, target: Language) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyText);
        }

        let length = text.chars().count();
        if length > self.max_chars {
            return Err(TranslationError::TextTooLong { length, limit: self.max_chars });
        }

        let request = TranslateRequest::new(text, source.code(), target.code());
        let response = self.provider.complete(request).await?;

        if let Some(detected) = &response.detected_source {
            debug!("Translated {} -> {} (detected {})", source.code(), target, detected);
        }

        let translated = P::extract_text(&response);
        if translated.trim().is_empty() {
            warn!("Provider returned an empty translation, keeping the original text");
            return Ok(text.to_string());
        }

        Ok(translated)
    }
}
