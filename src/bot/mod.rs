/*!
 * Chat interface of the bot.
 *
 * This module is split into several submodules:
 * - `handlers`: Classifies inbound updates and reacts to each kind
 * - `keyboards`: Builds the reply and inline keyboards
 * - `dispatcher`: Long-polling loop feeding updates to the handlers
 */

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::telegram::SendMessageRequest;
use crate::session::SessionStore;
use crate::translation::MessagePipeline;

pub mod dispatcher;
pub mod handlers;
pub mod keyboards;

// Re-export main types
pub use dispatcher::{ChatQueue, Dispatcher};
pub use handlers::{InboundEvent, handle_update};

/// Outgoing side of the chat platform
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a message
    async fn send_message(&self, request: SendMessageRequest) -> Result<(), ProviderError>;

    /// Remove the inline keyboard from a sent message
    async fn remove_inline_keyboard(&self, chat_id: i64, message_id: i64) -> Result<(), ProviderError>;

    /// Acknowledge a button press, optionally with a toast
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), ProviderError>;
}

/// Shared dependencies of every handler
#[derive(Clone)]
pub struct BotContext {
    /// Translation pipeline and synonym lookup
    pub pipeline: Arc<MessagePipeline>,
    /// Chat transport replies go through
    pub chat: Arc<dyn ChatTransport>,
}

impl BotContext {
    /// Create a new context
    pub fn new(pipeline: Arc<MessagePipeline>, chat: Arc<dyn ChatTransport>) -> Self {
        Self { pipeline, chat }
    }

    /// Session store shared with the pipeline
    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        self.pipeline.sessions()
    }
}
