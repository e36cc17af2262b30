/*!
 * Long-polling dispatcher.
 *
 * Updates are fetched with `getUpdates` and handed to a [`ChatQueue`]. Each
 * chat gets its own chain of tasks: updates from one chat are handled in
 * arrival order, while different chats never wait for each other. Handler
 * errors are logged and never stop the loop.
 */

use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::bot::{BotContext, handle_update};
use crate::errors::ProviderError;
use crate::providers::telegram::{Telegram, Update};

/// Pause after a failed poll before trying again
const POLL_ERROR_PAUSE: Duration = Duration::from_secs(3);

/// Polling loop settings
#[derive(Debug, Clone)]
pub struct PollingSettings {
    /// Long-polling timeout passed to getUpdates
    pub poll_timeout_secs: u64,
    /// Skip updates that arrived while the bot was offline
    pub drop_pending_updates: bool,
}

/// Feeds Telegram updates to the handlers
pub struct Dispatcher {
    telegram: Arc<Telegram>,
    queue: ChatQueue,
    settings: PollingSettings,
}

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new(telegram: Arc<Telegram>, context: BotContext, settings: PollingSettings) -> Self {
        Self { telegram, queue: ChatQueue::new(context), settings }
    }

    /// Poll forever; returns only if the pending updates cannot be skipped
    pub async fn run(&self) -> Result<(), ProviderError> {
        let mut offset = if self.settings.drop_pending_updates {
            self.skip_pending_updates().await?
        } else {
            None
        };

        info!("Polling for updates");
        loop {
            let updates = match self.telegram.get_updates(offset, self.settings.poll_timeout_secs).await {
                Ok(updates) => updates,
                Err(e) => {
                    error!("Polling failed: {}", e);
                    tokio::time::sleep(POLL_ERROR_PAUSE).await;
                    continue;
                }
            };

            if let Some(next) = next_offset(&updates) {
                offset = Some(next);
            }
            for update in updates {
                self.queue.dispatch(update);
            }
        }
    }

    /// Let handlers already started finish their replies
    pub async fn finish_pending(&self) {
        self.queue.drain().await;
    }

    /// Confirm everything queued so far and return the offset to poll from
    async fn skip_pending_updates(&self) -> Result<Option<i64>, ProviderError> {
        // Offset -1 returns only the newest update, confirming all older ones
        let pending = self.telegram.get_updates(Some(-1), 0).await?;
        let offset = next_offset(&pending);
        if offset.is_some() {
            info!("Skipped pending updates");
        }
        Ok(offset)
    }
}

/// Runs handlers in one task chain per chat
pub struct ChatQueue {
    context: BotContext,
    /// Last spawned task of every chat with work in flight
    tails: Mutex<HashMap<i64, JoinHandle<()>>>,
}

impl ChatQueue {
    /// Create an empty queue
    pub fn new(context: BotContext) -> Self {
        Self { context, tails: Mutex::new(HashMap::new()) }
    }

    /// Spawn the handler for an update behind any earlier work of its chat
    pub fn dispatch(&self, update: Update) {
        let context = self.context.clone();
        let Some(chat_id) = chat_key(&update) else {
            tokio::spawn(async move { run_handler(&context, update).await });
            return;
        };

        let mut tails = self.tails.lock();
        tails.retain(|_, tail| !tail.is_finished());
        let previous = tails.remove(&chat_id);
        let task = tokio::spawn(async move {
            if let Some(previous) = previous {
                // A panicked predecessor must not block the chat
                let _ = previous.await;
            }
            run_handler(&context, update).await;
        });
        tails.insert(chat_id, task);
    }

    /// Wait until every dispatched update has been handled
    pub async fn drain(&self) {
        let tails = std::mem::take(&mut *self.tails.lock());
        for (_, tail) in tails {
            let _ = tail.await;
        }
    }
}

async fn run_handler(context: &BotContext, update: Update) {
    let update_id = update.update_id;
    debug!("Handling update {}", update_id);
    if let Err(e) = handle_update(context, update).await {
        warn!("Failed to handle update {}: {}", update_id, e);
    }
}

/// Chat an update belongs to, if any
fn chat_key(update: &Update) -> Option<i64> {
    if let Some(message) = &update.message {
        return Some(message.chat.id);
    }
    update
        .callback_query
        .as_ref()
        .map(|query| query.message.as_ref().map_or(query.from.id, |message| message.chat.id))
}

/// Offset confirming every update in the batch
pub fn next_offset(updates: &[Update]) -> Option<i64> {
    updates.iter().map(|update| update.update_id).max().map(|id| id + 1)
}
