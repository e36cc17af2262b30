/*!
 * Tests for application configuration functionality
 */

use lingobot::app_config::{Config, LogLevel};
use lingobot::language_utils::Language;
use log::LevelFilter;

use crate::common::{create_temp_dir, create_test_file};

fn configured() -> Config {
    Config::default().with_secrets(Some("123:abc".to_string()), Some("gemini-key".to_string()))
}

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.default_language, "en");
    assert_eq!(config.log_level, LogLevel::Info);

    assert_eq!(config.telegram.poll_timeout_secs, 30);
    assert_eq!(config.telegram.timeout_secs, 10);
    assert!(config.telegram.drop_pending_updates);
    assert_eq!(config.telegram.http_timeout_secs(), 40);

    assert_eq!(config.gemini.model, "gemini-2.5-flash");
    assert_eq!(config.gemini.temperature, 0.4);
    assert_eq!(config.gemini.max_output_tokens, 400);
    assert_eq!(config.gemini.timeout_secs, 60);

    assert_eq!(config.translator.timeout_secs, 15);
    assert_eq!(config.translator.max_chars, 5000);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    assert!(configured().validate().is_ok());

    // Secrets are mandatory
    assert!(Config::default().validate().is_err());
    assert!(Config::default().with_secrets(Some("123:abc".to_string()), None).validate().is_err());
    assert!(Config::default().with_secrets(None, Some("key".to_string())).validate().is_err());

    let mut config = configured();
    config.default_language = "fr".to_string();
    assert!(config.validate().is_err());

    let mut config = configured();
    config.gemini.temperature = 2.5;
    assert!(config.validate().is_err());

    let mut config = configured();
    config.gemini.max_output_tokens = 0;
    assert!(config.validate().is_err());

    let mut config = configured();
    config.translator.max_chars = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_defaultLanguage_withIsoCodes_shouldResolve() {
    let mut config = configured();
    assert_eq!(config.default_language().unwrap(), Language::En);

    config.default_language = "uzb".to_string();
    assert_eq!(config.default_language().unwrap(), Language::Uz);
    assert!(config.validate().is_ok());
}

#[test]
fn test_defaultLanguage_withUnsupportedCodes_shouldExplain() {
    let mut config = configured();

    config.default_language = "de".to_string();
    let message = config.default_language().unwrap_err().to_string();
    assert!(message.contains("de (German)"), "got: {}", message);

    config.default_language = "zz".to_string();
    let message = config.default_language().unwrap_err().to_string();
    assert!(message.contains("Invalid default language: zz"), "got: {}", message);
}

#[test]
fn test_serialization_shouldNeverWriteSecrets() {
    let json = serde_json::to_string_pretty(&configured()).unwrap();

    assert!(!json.contains("123:abc"));
    assert!(!json.contains("gemini-key"));
    assert!(!json.contains("bot_token"));
    assert!(!json.contains("api_key"));
}

#[test]
fn test_writeThenLoad_shouldKeepSettingsButNotSecrets() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = configured();
    config.gemini.model = "gemini-2.0-flash".to_string();
    config.default_language = "ru".to_string();
    config.write_to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.gemini.model, "gemini-2.0-flash");
    assert_eq!(loaded.default_language, "ru");
    assert!(loaded.telegram.bot_token.is_empty());
    assert!(loaded.gemini.api_key.is_empty());
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        dir.path(),
        "conf.json",
        r#"{ "gemini": { "temperature": 0.9 }, "log_level": "debug" }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.gemini.temperature, 0.9);
    assert_eq!(config.gemini.model, "gemini-2.5-flash");
    assert_eq!(config.translator.max_chars, 5000);
    assert_eq!(config.default_language, "en");
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_fromFile_withInvalidJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "conf.json", "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
    assert!(Config::from_file(dir.path().join("missing.json")).is_err());
}

#[test]
fn test_logLevel_shouldMapToLevelFilter() {
    assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::Error);
    assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    assert_eq!(LevelFilter::from(LogLevel::default()), LevelFilter::Info);
}
