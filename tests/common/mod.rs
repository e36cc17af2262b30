/*!
 * Common test utilities for the lingobot test suite
 */

use anyhow::Result;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use lingobot::bot::BotContext;
use lingobot::language_utils::Language;
use lingobot::providers::telegram::Update;
use lingobot::session::InMemorySessionStore;
use lingobot::translation::MessagePipeline;

// Re-export the mock providers module
pub mod mock_providers;

use mock_providers::{RecordingChat, RecordingExplainer, RecordingTranslator};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route library logs through env_logger; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A bot wired to recording doubles
pub struct TestBot {
    pub context: BotContext,
    pub sessions: Arc<InMemorySessionStore>,
    pub translator: Arc<RecordingTranslator>,
    pub explainer: Arc<RecordingExplainer>,
    pub chat: Arc<RecordingChat>,
}

impl TestBot {
    /// Wire the doubles together with an English default language
    pub fn new(translator: RecordingTranslator, explainer: RecordingExplainer) -> Self {
        Self::with_chat(translator, explainer, RecordingChat::new())
    }

    /// Same as `new` with a specific chat transport
    pub fn with_chat(translator: RecordingTranslator, explainer: RecordingExplainer, chat: RecordingChat) -> Self {
        init_test_logging();

        let sessions = Arc::new(InMemorySessionStore::new(Language::En));
        let translator = Arc::new(translator);
        let explainer = Arc::new(explainer);
        let chat = Arc::new(chat);

        let pipeline = Arc::new(MessagePipeline::new(sessions.clone(), translator.clone(), explainer.clone()));
        let context = BotContext::new(pipeline, chat.clone());

        Self { context, sessions, translator, explainer, chat }
    }
}

/// Text message from a user in their private chat
pub fn text_update(update_id: i64, user_id: i64, text: &str) -> Update {
    serde_json::from_value(json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id * 10,
            "from": {"id": user_id, "is_bot": false, "first_name": "Tester"},
            "chat": {"id": user_id, "type": "private"},
            "date": 1_700_000_000,
            "text": text
        }
    }))
    .expect("valid message update")
}

/// Button press on a message sent to a user
pub fn callback_update(update_id: i64, user_id: i64, message_id: i64, data: &str) -> Update {
    serde_json::from_value(json!({
        "update_id": update_id,
        "callback_query": {
            "id": format!("cb-{}", update_id),
            "from": {"id": user_id, "is_bot": false, "first_name": "Tester"},
            "message": {
                "message_id": message_id,
                "chat": {"id": user_id, "type": "private"},
                "date": 1_700_000_000
            },
            "chat_instance": "42",
            "data": data
        }
    }))
    .expect("valid callback update")
}
