use anyhow::{Result, anyhow};
use isolang::Language as IsoLanguage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language utilities for the languages the bot translates into
///
/// Codes are ISO 639-1. Lookups also accept ISO 639-2/T codes ("rus", "uzb")
/// and resolve them through isolang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian
    Ru,
    /// English, also the pivot language for AI prompts
    #[default]
    En,
    /// Uzbek
    Uz,
}

impl Language {
    /// Every supported target language, in keyboard order
    pub const ALL: [Language; 3] = [Language::Ru, Language::En, Language::Uz];

    /// Language the AI is always prompted in
    pub const PIVOT: Language = Language::En;

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Uz => "uz",
        }
    }

    /// Label of the reply-keyboard button that selects this language
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Ru => "Русский 🇷🇺",
            Self::En => "Английский 🇬🇧",
            Self::Uz => "Узбекский 🇺🇿",
        }
    }

    /// Resolve a language from its exact button label
    pub fn from_button_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.button_label() == label)
    }

    /// Resolve a language from an ISO 639-1 or ISO 639-2/T code
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_lowercase();
        let iso = match normalized.len() {
            2 => IsoLanguage::from_639_1(&normalized),
            3 => IsoLanguage::from_639_3(&normalized),
            _ => None,
        }?;
        let part1 = iso.to_639_1()?;
        Self::ALL.into_iter().find(|lang| lang.code() == part1)
    }

    /// English name of the language, used inside prompts
    pub fn english_name(&self) -> &'static str {
        IsoLanguage::from_639_1(self.code())
            .map(|iso| iso.to_name())
            .unwrap_or("English")
    }

    /// Whether AI output for this language must be generated in the pivot
    /// language first and then machine-translated
    pub fn needs_pivot(&self) -> bool {
        matches!(self, Self::Uz)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).ok_or_else(|| anyhow!("Unsupported language code: {}", s))
    }
}

/// Source side of a translation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    /// Let the provider detect the language
    Auto,
    /// A known language
    Known(Language),
}

impl SourceLanguage {
    /// Code sent to the translation provider
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Known(lang) => lang.code(),
        }
    }
}

impl From<Language> for SourceLanguage {
    fn from(lang: Language) -> Self {
        Self::Known(lang)
    }
}

/// Get the English language name from any ISO 639-1 or ISO 639-2/T code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    let lang = match normalized.len() {
        2 => IsoLanguage::from_639_1(&normalized),
        3 => IsoLanguage::from_639_3(&normalized),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}
