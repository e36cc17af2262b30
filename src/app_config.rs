use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::language_utils::{get_language_name, Language};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Secrets are never written back to disk; they come from the environment.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Telegram Bot API settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Gemini settings
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Machine translation settings
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Target language for users who have not picked one (ISO code)
    #[serde(default = "default_language_code")]
    pub default_language: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Telegram Bot API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TelegramConfig {
    // @field: Bot token, supplied via BOT_TOKEN
    #[serde(default, skip_serializing)]
    pub bot_token: String,

    // @field: API endpoint URL (empty for the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Long-polling timeout in seconds
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,

    // @field: Extra HTTP timeout on top of the polling timeout
    #[serde(default = "default_telegram_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Skip updates queued while the bot was offline
    #[serde(default = "default_true")]
    pub drop_pending_updates: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            endpoint: String::new(),
            poll_timeout_secs: default_poll_timeout_secs(),
            timeout_secs: default_telegram_timeout_secs(),
            drop_pending_updates: default_true(),
        }
    }
}

impl TelegramConfig {
    /// HTTP timeout for Bot API calls; always outlasts a long poll
    pub fn http_timeout_secs(&self) -> u64 {
        self.poll_timeout_secs + self.timeout_secs
    }
}

/// Gemini configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiConfig {
    // @field: API key, supplied via GEMINI_API_KEY
    #[serde(default, skip_serializing)]
    pub api_key: String,

    // @field: Model name
    #[serde(default = "default_gemini_model")]
    pub model: String,

    // @field: Service URL (empty for the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    // @field: Cap on generated tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    // @field: Timeout seconds
    #[serde(default = "default_gemini_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            endpoint: String::new(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_gemini_timeout_secs(),
        }
    }
}

/// Machine translation configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslatorConfig {
    // @field: Service URL (empty for the public endpoint)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_translator_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Max chars per request
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_secs: default_translator_timeout_secs(),
            max_chars: default_max_chars(),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_language_code() -> String {
    Language::default().code().to_string()
}

fn default_poll_timeout_secs() -> u64 {
    30
}

fn default_telegram_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    crate::translation::explain::DEFAULT_TEMPERATURE
}

fn default_max_output_tokens() -> u32 {
    crate::translation::explain::DEFAULT_MAX_OUTPUT_TOKENS
}

fn default_gemini_timeout_secs() -> u64 {
    60
}

fn default_translator_timeout_secs() -> u64 {
    15
}

fn default_max_chars() -> usize {
    crate::translation::core::DEFAULT_MAX_CHARS
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write this configuration as pretty JSON, without secrets
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Apply secrets obtained from the environment or the command line
    pub fn with_secrets(mut self, bot_token: Option<String>, gemini_api_key: Option<String>) -> Self {
        if let Some(token) = bot_token {
            self.telegram.bot_token = token;
        }
        if let Some(key) = gemini_api_key {
            self.gemini.api_key = key;
        }
        self
    }

    /// Language for users without a session
    pub fn default_language(&self) -> Result<Language> {
        if let Some(language) = Language::from_code(&self.default_language) {
            return Ok(language);
        }
        let name = get_language_name(&self.default_language)
            .with_context(|| format!("Invalid default language: {}", self.default_language))?;
        Err(anyhow!(
            "Unsupported default language: {} ({}), expected one of ru, en, uz",
            self.default_language,
            name
        ))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate secrets
        if self.telegram.bot_token.trim().is_empty() {
            return Err(anyhow!("Bot token is required (set BOT_TOKEN)"));
        }
        if self.gemini.api_key.trim().is_empty() {
            return Err(anyhow!("Gemini API key is required (set GEMINI_API_KEY)"));
        }

        // Validate languages
        self.default_language()?;

        // Validate generation settings
        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(anyhow!("Gemini temperature must be between 0.0 and 2.0, got {}", self.gemini.temperature));
        }
        if self.gemini.max_output_tokens == 0 {
            return Err(anyhow!("Gemini max_output_tokens must be greater than zero"));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(anyhow!("Gemini model name is required"));
        }

        if self.translator.max_chars == 0 {
            return Err(anyhow!("Translator max_chars must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            telegram: TelegramConfig::default(),
            gemini: GeminiConfig::default(),
            translator: TranslatorConfig::default(),
            default_language: default_language_code(),
            log_level: LogLevel::default(),
        }
    }
}
