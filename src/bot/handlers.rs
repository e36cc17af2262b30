/*!
 * Update classification and handlers.
 *
 * Each update is turned into an [`InboundEvent`] first; the handlers only
 * ever see classified events.
 */

use log::{debug, info, warn};

use crate::action_token::{SYNONYM_PREFIX, SynonymToken};
use crate::bot::{BotContext, keyboards};
use crate::errors::ProviderError;
use crate::language_utils::Language;
use crate::messages;
use crate::providers::telegram::{CallbackQuery, Message, ReplyMarkup, SendMessageRequest, Update};
use crate::translation::PipelineOutcome;

/// Command opening the language selection
const START_COMMAND: &str = "/start";

/// What an update asks the bot to do
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// `/start` command
    Start { chat_id: i64 },
    /// A language button label was sent
    LanguageSelected { chat_id: i64, user_id: i64, language: Language },
    /// Any other text: translate it
    Text { chat_id: i64, user_id: i64, text: String },
    /// The synonyms button was pressed
    SynonymCallback {
        callback_id: String,
        chat_id: i64,
        /// Message carrying the button, when Telegram still provides it
        message_id: Option<i64>,
        data: String,
    },
    /// Nothing to do
    Ignored,
}

impl InboundEvent {
    /// Classify an update
    pub fn classify(update: &Update) -> Self {
        if let Some(message) = &update.message {
            return Self::from_message(message);
        }
        if let Some(query) = &update.callback_query {
            return Self::from_callback(query);
        }
        Self::Ignored
    }

    fn from_message(message: &Message) -> Self {
        let Some(text) = message.text.as_deref() else {
            return Self::Ignored;
        };
        let chat_id = message.chat.id;
        // Without a sender, private chats are keyed by the chat id
        let user_id = message.from.as_ref().map_or(chat_id, |user| user.id);

        if is_start_command(text) {
            return Self::Start { chat_id };
        }
        if let Some(language) = Language::from_button_label(text) {
            return Self::LanguageSelected { chat_id, user_id, language };
        }
        Self::Text { chat_id, user_id, text: text.to_string() }
    }

    fn from_callback(query: &CallbackQuery) -> Self {
        match query.data.as_deref() {
            Some(data) if data.starts_with(SYNONYM_PREFIX) => Self::SynonymCallback {
                callback_id: query.id.clone(),
                chat_id: query.message.as_ref().map_or(query.from.id, |m| m.chat.id),
                message_id: query.message.as_ref().map(|m| m.message_id),
                data: data.to_string(),
            },
            _ => Self::Ignored,
        }
    }
}

/// Whether a text is the start command, optionally addressed or with a payload
fn is_start_command(text: &str) -> bool {
    match text.strip_prefix(START_COMMAND) {
        Some(rest) => rest.is_empty() || rest.starts_with('@') || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

/// Classify an update and run the matching handler
pub async fn handle_update(ctx: &BotContext, update: Update) -> Result<(), ProviderError> {
    match InboundEvent::classify(&update) {
        InboundEvent::Start { chat_id } => handle_start(ctx, chat_id).await,
        InboundEvent::LanguageSelected { chat_id, user_id, language } => {
            handle_language_selected(ctx, chat_id, user_id, language).await
        }
        InboundEvent::Text { chat_id, user_id, text } => handle_text(ctx, chat_id, user_id, &text).await,
        InboundEvent::SynonymCallback { callback_id, chat_id, message_id, data } => {
            handle_synonym_callback(ctx, &callback_id, chat_id, message_id, &data).await
        }
        InboundEvent::Ignored => {
            debug!("Ignoring update {}", update.update_id);
            Ok(())
        }
    }
}

/// Greet the user and offer the language keyboard
pub async fn handle_start(ctx: &BotContext, chat_id: i64) -> Result<(), ProviderError> {
    let request = SendMessageRequest::new(chat_id, messages::GREETING).reply_markup(keyboards::language_keyboard());
    ctx.chat.send_message(request).await
}

/// Store the selected language and confirm it
pub async fn handle_language_selected(
    ctx: &BotContext,
    chat_id: i64,
    user_id: i64,
    language: Language,
) -> Result<(), ProviderError> {
    ctx.sessions().set(user_id, language);
    info!("User {} selected {}", user_id, language);

    let request = SendMessageRequest::new(chat_id, messages::language_selected(language))
        .reply_markup(ReplyMarkup::remove_keyboard());
    ctx.chat.send_message(request).await
}

/// Translate and explain a message
///
/// A failed primary translation produces exactly one plain error message.
pub async fn handle_text(ctx: &BotContext, chat_id: i64, user_id: i64, text: &str) -> Result<(), ProviderError> {
    match ctx.pipeline.process_message(user_id, text).await {
        PipelineOutcome::Failed(message) => ctx.chat.send_message(SendMessageRequest::new(chat_id, message)).await,
        PipelineOutcome::Replied(reply) => {
            let mut request =
                SendMessageRequest::new(chat_id, messages::translation_reply(&reply.translation, &reply.explanation))
                    .html();
            match &reply.synonym_token {
                Some(token) => request = request.reply_markup(keyboards::synonyms_button(token)),
                None => debug!("No synonym word in translation for user {}", user_id),
            }
            ctx.chat.send_message(request).await
        }
    }
}

/// Look up synonyms for the word carried by a pressed button
pub async fn handle_synonym_callback(
    ctx: &BotContext,
    callback_id: &str,
    chat_id: i64,
    message_id: Option<i64>,
    data: &str,
) -> Result<(), ProviderError> {
    let token = match SynonymToken::decode(data) {
        Ok(token) => token,
        Err(e) => {
            warn!("Rejected callback data '{}': {}", data, e);
            return ctx.chat.answer_callback(callback_id, Some(&messages::invalid_action(&e))).await;
        }
    };

    if let Some(message_id) = message_id {
        if let Err(e) = ctx.chat.remove_inline_keyboard(chat_id, message_id).await {
            warn!("Could not remove synonyms button from message {}: {}", message_id, e);
        }
    }

    // Telegram rejects answers to stale queries; the lookup still goes out
    if let Err(e) = ctx.chat.answer_callback(callback_id, Some(messages::SYNONYMS_SEARCHING)).await {
        warn!("Could not answer callback {}: {}", callback_id, e);
    }

    let synonyms = ctx.pipeline.lookup_synonyms(&token).await;
    let request = SendMessageRequest::new(chat_id, messages::synonyms_reply(token.word(), &synonyms)).html();
    ctx.chat.send_message(request).await
}
