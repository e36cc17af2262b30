/*!
 * Recording test doubles for the bot's seams
 *
 * These doubles sit one level above the HTTP providers: they implement the
 * `Translator`, `Explainer` and `ChatTransport` traits directly, record
 * every call, and answer through a replaceable closure.
 */

use async_trait::async_trait;
use std::sync::Mutex;

use lingobot::bot::ChatTransport;
use lingobot::errors::{ProviderError, TranslationError};
use lingobot::language_utils::{Language, SourceLanguage};
use lingobot::providers::telegram::SendMessageRequest;
use lingobot::translation::{Explainer, Explanation, ExplanationFailure, Translator};

type TranslateFn = dyn Fn(&str, SourceLanguage, Language) -> Result<String, TranslationError> + Send + Sync;
type ExplainFn = dyn Fn(&str) -> Explanation + Send + Sync;

/// A recorded translation call
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateCall {
    pub text: String,
    pub source: SourceLanguage,
    pub target: Language,
}

/// Translator that records calls and answers through a closure
pub struct RecordingTranslator {
    calls: Mutex<Vec<TranslateCall>>,
    responder: Box<TranslateFn>,
}

impl RecordingTranslator {
    /// Answer with `"[<target>] <text>"`
    pub fn tagging() -> Self {
        Self::with(|text, _, target| Ok(format!("[{}] {}", target.code(), text)))
    }

    /// Answer through a custom closure
    pub fn with<F>(responder: F) -> Self
    where
        F: Fn(&str, SourceLanguage, Language) -> Result<String, TranslationError> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Every call made so far
    pub fn calls(&self) -> Vec<TranslateCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for RecordingTranslator {
    async fn translate(&self, text: &str, source: SourceLanguage, target: Language) -> Result<String, TranslationError> {
        self.calls.lock().unwrap().push(TranslateCall {
            text: text.to_string(),
            source,
            target,
        });
        (self.responder)(text, source, target)
    }
}

/// Explainer that records prompts and answers through a closure
pub struct RecordingExplainer {
    prompts: Mutex<Vec<String>>,
    responder: Box<ExplainFn>,
}

impl RecordingExplainer {
    /// Always answer with the same text
    pub fn answering(text: &'static str) -> Self {
        Self::with(move |_| Explanation::Answer(text.to_string()))
    }

    /// Always fail with the given reason
    pub fn unavailable(failure: ExplanationFailure) -> Self {
        Self::with(move |_| Explanation::Unavailable(failure.clone()))
    }

    /// Answer through a custom closure
    pub fn with<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Explanation + Send + Sync + 'static,
    {
        Self {
            prompts: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Every prompt received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Explainer for RecordingExplainer {
    async fn explain(&self, prompt: &str) -> Explanation {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.responder)(prompt)
    }
}

/// A recorded chat transport call
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCall {
    Send(SendMessageRequest),
    RemoveKeyboard { chat_id: i64, message_id: i64 },
    AnswerCallback { callback_id: String, text: Option<String> },
}

/// Chat transport that records everything the bot sends
#[derive(Debug, Default)]
pub struct RecordingChat {
    calls: Mutex<Vec<ChatCall>>,
    fail_keyboard_removal: bool,
    fail_callback_answers: bool,
}

impl RecordingChat {
    /// Transport where every call succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport that cannot edit messages
    pub fn failing_keyboard_removal() -> Self {
        Self {
            fail_keyboard_removal: true,
            ..Self::default()
        }
    }

    /// Transport whose callback answers are rejected as too old
    pub fn failing_callback_answers() -> Self {
        Self {
            fail_callback_answers: true,
            ..Self::default()
        }
    }

    /// Every call made so far
    pub fn calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the sent messages
    pub fn sent_messages(&self) -> Vec<SendMessageRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ChatCall::Send(request) => Some(request),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingChat {
    async fn send_message(&self, request: SendMessageRequest) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(ChatCall::Send(request));
        Ok(())
    }

    async fn remove_inline_keyboard(&self, chat_id: i64, message_id: i64) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(ChatCall::RemoveKeyboard { chat_id, message_id });
        if self.fail_keyboard_removal {
            return Err(ProviderError::ApiError {
                status_code: 400,
                message: "message can't be edited".into(),
            });
        }
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), ProviderError> {
        self.calls.lock().unwrap().push(ChatCall::AnswerCallback {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
        });
        if self.fail_callback_answers {
            return Err(ProviderError::ApiError {
                status_code: 400,
                message: "query is too old and response timeout expired".into(),
            });
        }
        Ok(())
    }
}

/// Error a failing translator returns
pub fn translation_down() -> TranslationError {
    TranslationError::Provider(ProviderError::ConnectionError("translator unreachable".into()))
}
