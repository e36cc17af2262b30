/*!
 * # LingoBot - translating Telegram bot with AI explanations
 *
 * A Rust library behind a Telegram bot that translates messages into a
 * per-user target language and explains the result using Gemini.
 *
 * ## Features
 *
 * - Per-user target language (Russian, English, Uzbek)
 * - Machine translation through the Google Translate endpoint
 * - Short AI explanations of every translation, localized to the target language
 * - On-demand synonym lookup from an inline button
 * - Uzbek handled through English as a pivot language
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `bot`: Chat interface (classification, handlers, polling)
 * - `translation`: Translation and explanation services:
 *   - `translation::core`: Machine translation
 *   - `translation::explain`: AI explanations
 *   - `translation::prompts`: Prompt templates
 *   - `translation::pipeline`: Per-message orchestration and synonyms
 * - `session`: Per-user target language
 * - `action_token`: Synonym button payload codec
 * - `messages`: User-facing texts
 * - `language_utils`: Supported languages and ISO code utilities
 * - `providers`: Client implementations for the external services:
 *   - `providers::telegram`: Telegram Bot API client
 *   - `providers::google_translate`: Google Translate client
 *   - `providers::gemini`: Gemini API client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod action_token;
pub mod app_config;
pub mod bot;
pub mod errors;
pub mod language_utils;
pub mod messages;
pub mod providers;
pub mod session;
pub mod translation;

// Re-export main types for easier usage
pub use action_token::SynonymToken;
pub use app_config::Config;
pub use bot::{BotContext, ChatTransport, Dispatcher};
pub use errors::{ActionTokenError, ProviderError, TranslationError};
pub use language_utils::{get_language_name, Language, SourceLanguage};
pub use session::{InMemorySessionStore, SessionStore};
pub use translation::{MessagePipeline, TranslationService};
