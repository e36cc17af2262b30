// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use lingobot::app_config::{self, Config};
use lingobot::bot::dispatcher::PollingSettings;
use lingobot::bot::{BotContext, Dispatcher};
use lingobot::language_utils::{Language, SourceLanguage};
use lingobot::providers::gemini::Gemini;
use lingobot::providers::google_translate::GoogleTranslate;
use lingobot::providers::telegram::Telegram;
use lingobot::session::InMemorySessionStore;
use lingobot::translation::{
    ExplanationService, GenerationSettings, MessagePipeline, TranslationService, Translator,
};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot (default command)
    Run(RunArgs),

    /// Validate the configuration and probe every external service
    CheckConfig(RunArgs),

    /// Generate shell completions for lingobot
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Telegram bot token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    bot_token: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,
}

/// LingoBot - translating Telegram bot with AI explanations
///
/// Translates every message into the language the user picked, explains the
/// translation with Gemini and offers synonyms on demand.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true,
    after_help = "EXAMPLES:
    # Start the bot with secrets from the environment
    BOT_TOKEN=... GEMINI_API_KEY=... lingobot

    # Check configuration and connectivity
    lingobot check-config -c conf.json

    # Generate bash completions
    lingobot completions bash > lingobot.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. A default file is
    created when none exists. Secrets are read from BOT_TOKEN and
    GEMINI_API_KEY and never written to the file."
)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => "💬",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // The level is raised or lowered once the config is known
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lingobot", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::CheckConfig(args)) => check_config(args).await,
        Some(Commands::Run(args)) => run_bot(args).await,
        None => run_bot(cli.run).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load or create the configuration, apply secrets and validate it
fn load_config(options: &RunArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.write_to_file(config_path)?;
        config
    };

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.into());
    }

    let config = config.with_secrets(options.bot_token.clone(), options.gemini_api_key.clone());
    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

/// Provider clients built from the configuration
struct Clients {
    telegram: Arc<Telegram>,
    translator: TranslationService<GoogleTranslate>,
    explainer: ExplanationService<Gemini>,
}

impl Clients {
    fn new(config: &Config) -> Self {
        let telegram = Telegram::new(
            config.telegram.bot_token.clone(),
            config.telegram.endpoint.clone(),
            config.telegram.http_timeout_secs(),
        );
        let translator = TranslationService::new(
            GoogleTranslate::new(config.translator.endpoint.clone(), config.translator.timeout_secs),
            config.translator.max_chars,
        );
        let gemini = Gemini::new(
            config.gemini.api_key.clone(),
            config.gemini.endpoint.clone(),
            config.gemini.model.clone(),
            config.gemini.timeout_secs,
        );
        let settings = GenerationSettings {
            model: config.gemini.model.clone(),
            temperature: config.gemini.temperature,
            max_output_tokens: config.gemini.max_output_tokens,
        };

        Self {
            telegram: Arc::new(telegram),
            translator,
            explainer: ExplanationService::new(gemini, settings),
        }
    }
}

async fn check_config(options: RunArgs) -> Result<()> {
    let config = load_config(&options)?;
    info!("Configuration is valid");

    let clients = Clients::new(&config);

    let me = clients.telegram.get_me().await.context("Telegram getMe failed")?;
    info!("Telegram: authorized as @{}", me.username.as_deref().unwrap_or(&me.first_name));

    let sample = clients
        .translator
        .translate("hello", SourceLanguage::Known(Language::En), Language::Ru)
        .await
        .context("Test translation failed")?;
    info!("Translator: 'hello' -> '{}'", sample);

    clients.explainer.test_connection().await.context("Gemini connection test failed")?;
    info!("Gemini: model {} is reachable", config.gemini.model);

    Ok(())
}

async fn run_bot(options: RunArgs) -> Result<()> {
    let config = load_config(&options)?;
    let default_language = config.default_language()?;

    let clients = Clients::new(&config);

    let me = clients.telegram.get_me().await.context("Failed to connect to Telegram")?;
    info!("Bot @{} started", me.username.as_deref().unwrap_or(&me.first_name));

    let sessions = Arc::new(InMemorySessionStore::new(default_language));
    let pipeline = Arc::new(MessagePipeline::new(
        sessions,
        Arc::new(clients.translator),
        Arc::new(clients.explainer),
    ));
    let context = BotContext::new(pipeline, clients.telegram.clone());
    let settings = PollingSettings {
        poll_timeout_secs: config.telegram.poll_timeout_secs,
        drop_pending_updates: config.telegram.drop_pending_updates,
    };
    let dispatcher = Dispatcher::new(clients.telegram, context, settings);

    tokio::select! {
        result = dispatcher.run() => result.context("Polling stopped")?,
        _ = tokio::signal::ctrl_c() => {
            info!("Bot stopped manually");
            dispatcher.finish_pending().await;
        }
    }

    Ok(())
}
