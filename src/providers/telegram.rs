use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

use crate::bot::ChatTransport;
use crate::errors::ProviderError;

/// Telegram Bot API client
pub struct Telegram {
    /// HTTP client for API requests
    client: Client,
    /// Bot token, part of every method URL
    token: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

impl std::fmt::Debug for Telegram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telegram")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Telegram user
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Telegram chat
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Incoming message; only the fields the bot reads
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

/// Callback query from an inline keyboard button
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// Message the button was attached to; may be absent for old messages
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

/// A single update from getUpdates
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// Inline keyboard button carrying callback data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

/// Reply keyboard button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

/// Reply markup attached to an outgoing message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    /// Buttons under the message
    InlineKeyboard {
        inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
    },
    /// Custom keyboard replacing the user's keyboard
    ReplyKeyboard {
        keyboard: Vec<Vec<KeyboardButton>>,
        resize_keyboard: bool,
        one_time_keyboard: bool,
    },
    /// Hide a previously shown custom keyboard
    RemoveKeyboard {
        remove_keyboard: bool,
    },
}

impl ReplyMarkup {
    /// Single inline button
    pub fn inline_button(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self::InlineKeyboard {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: text.into(),
                callback_data: callback_data.into(),
            }]],
        }
    }

    /// One-row reply keyboard that hides itself after use
    pub fn one_time_keyboard<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ReplyKeyboard {
            keyboard: vec![labels.into_iter().map(|label| KeyboardButton { text: label.into() }).collect()],
            resize_keyboard: true,
            one_time_keyboard: true,
        }
    }

    /// Removal of the custom keyboard
    pub fn remove_keyboard() -> Self {
        Self::RemoveKeyboard { remove_keyboard: true }
    }
}

/// sendMessage parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendMessageRequest {
    /// Create a plain text message
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            reply_markup: None,
        }
    }

    /// Render the text as Telegram HTML
    pub fn html(mut self) -> Self {
        self.parse_mode = Some("HTML".to_string());
        self
    }

    /// Attach reply markup
    pub fn reply_markup(mut self, markup: ReplyMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<u16>,
}

impl Telegram {
    /// Create a new Telegram client
    ///
    /// The timeout must exceed the long-polling timeout used with getUpdates.
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            token: token.into(),
            endpoint: endpoint.into(),
        }
    }

    /// URL of a Bot API method
    pub fn method_url(&self, method: &str) -> String {
        let base = if self.endpoint.is_empty() {
            "https://api.telegram.org"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/bot{}/{}", base, self.token, method)
    }

    /// Call a Bot API method and unwrap its envelope
    async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, ProviderError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.client.post(self.method_url(method))
            .json(params)
            .send()
            .await
            .map_err(ProviderError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(ProviderError::from)?;
        Self::parse_envelope(method, status.as_u16(), &body)
    }

    /// Decode a Bot API envelope into its result or the matching error
    pub fn parse_envelope<R: DeserializeOwned>(method: &str, status_code: u16, body: &str) -> Result<R, ProviderError> {
        let envelope: ApiResponse<R> = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Telegram {} response: {}", method, e)))?;

        if !envelope.ok {
            let code = envelope.error_code.unwrap_or(status_code);
            let description = envelope.description.unwrap_or_else(|| "no description".to_string());
            error!("Telegram {} error ({}): {}", method, code, description);
            return Err(ProviderError::from_status(code, description));
        }

        envelope.result
            .ok_or_else(|| ProviderError::ParseError(format!("Telegram {} response has no result", method)))
    }

    /// Identity of the bot; also verifies the token
    pub async fn get_me(&self) -> Result<User, ProviderError> {
        self.call("getMe", &json!({})).await
    }

    /// Long-poll for updates starting at `offset`
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>, ProviderError> {
        let mut params = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(offset) = offset {
            params["offset"] = json!(offset);
        }
        self.call("getUpdates", &params).await
    }

    /// Send a message
    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<Message, ProviderError> {
        debug!("Sending message to chat {}", request.chat_id);
        self.call("sendMessage", request).await
    }

    /// Drop the inline keyboard of a sent message
    pub async fn edit_message_reply_markup(&self, chat_id: i64, message_id: i64) -> Result<(), ProviderError> {
        // Result is either the edited Message or `true`
        let _: Value = self.call("editMessageReplyMarkup", &json!({
            "chat_id": chat_id,
            "message_id": message_id,
        })).await?;
        Ok(())
    }

    /// Acknowledge a callback query, optionally with a toast
    pub async fn answer_callback_query(&self, callback_query_id: &str, text: Option<&str>) -> Result<(), ProviderError> {
        let mut params = json!({ "callback_query_id": callback_query_id });
        if let Some(text) = text {
            params["text"] = json!(text);
        }
        let _: bool = self.call("answerCallbackQuery", &params).await?;
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for Telegram {
    async fn send_message(&self, request: SendMessageRequest) -> Result<(), ProviderError> {
        Telegram::send_message(self, &request).await?;
        Ok(())
    }

    async fn remove_inline_keyboard(&self, chat_id: i64, message_id: i64) -> Result<(), ProviderError> {
        self.edit_message_reply_markup(chat_id, message_id).await
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), ProviderError> {
        self.answer_callback_query(callback_id, text).await
    }
}
