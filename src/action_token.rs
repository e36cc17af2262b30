/*!
 * Synonym action token carried by the inline "synonyms" button.
 *
 * Wire format: `SYNONYM_<lang_code>_<word>`. The word never contains the `_`
 * delimiter or whitespace, so the format splits unambiguously, and it holds
 * at most [`MAX_WORD_CHARS`] characters so the token fits Telegram's
 * callback data limit.
 */

use std::fmt;
use std::str::FromStr;

use crate::errors::ActionTokenError;
use crate::language_utils::Language;

/// Prefix identifying synonym callbacks
pub const SYNONYM_PREFIX: &str = "SYNONYM_";

/// Field delimiter of the wire format
pub const DELIMITER: char = '_';

/// Maximum word length in characters
pub const MAX_WORD_CHARS: usize = 20;

/// Telegram's limit for callback data, in bytes
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// Bytes left for the word after the prefix, a two-letter code and the delimiter
const MAX_WORD_BYTES: usize = MAX_CALLBACK_DATA_BYTES - SYNONYM_PREFIX.len() - 3;

/// Everything a synonym lookup needs, reconstructed from the button alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymToken {
    language: Language,
    word: String,
}

impl SynonymToken {
    /// Create a token, rejecting words the wire format cannot carry
    pub fn new(language: Language, word: impl Into<String>) -> Result<Self, ActionTokenError> {
        let word = word.into();
        validate_word(&word)?;
        Ok(Self { language, word })
    }

    /// Derive a token from a translated phrase
    ///
    /// Uses the first whitespace-delimited token, cut at the first delimiter
    /// and truncated to [`MAX_WORD_CHARS`] characters (fewer if the encoded
    /// token would exceed the callback data limit). Returns `None` when
    /// nothing usable remains.
    pub fn from_translation(language: Language, translation: &str) -> Option<Self> {
        let first = translation.split_whitespace().next()?;
        let mut word = String::new();
        for ch in first.split(DELIMITER).next().unwrap_or_default().chars().take(MAX_WORD_CHARS) {
            if word.len() + ch.len_utf8() > MAX_WORD_BYTES {
                break;
            }
            word.push(ch);
        }

        Self::new(language, word).ok()
    }

    /// Target language of the lookup
    pub fn language(&self) -> Language {
        self.language
    }

    /// Word to find synonyms for
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Encode into callback data
    pub fn encode(&self) -> String {
        format!("{}{}{}{}", SYNONYM_PREFIX, self.language.code(), DELIMITER, self.word)
    }

    /// Decode callback data
    pub fn decode(data: &str) -> Result<Self, ActionTokenError> {
        if data.len() > MAX_CALLBACK_DATA_BYTES {
            return Err(ActionTokenError::TooLong(data.len()));
        }

        let payload = data.strip_prefix(SYNONYM_PREFIX).ok_or(ActionTokenError::MissingPrefix)?;
        let (code, word) = payload.split_once(DELIMITER).ok_or(ActionTokenError::MissingWord)?;

        // Only exact two-letter codes are part of the wire format
        let language = Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| ActionTokenError::UnknownLanguage(code.to_string()))?;

        Self::new(language, word)
    }
}

fn validate_word(word: &str) -> Result<(), ActionTokenError> {
    if word.is_empty() {
        return Err(ActionTokenError::MissingWord);
    }
    if word.contains(DELIMITER) {
        return Err(ActionTokenError::InvalidWord(format!("'{}' contains the '{}' delimiter", word, DELIMITER)));
    }
    if word.chars().any(char::is_whitespace) {
        return Err(ActionTokenError::InvalidWord(format!("'{}' contains whitespace", word)));
    }
    let length = word.chars().count();
    if length > MAX_WORD_CHARS {
        return Err(ActionTokenError::InvalidWord(format!("'{}' is {} characters long", word, length)));
    }
    if word.len() > MAX_WORD_BYTES {
        return Err(ActionTokenError::InvalidWord(format!("'{}' is {} bytes long", word, word.len())));
    }
    Ok(())
}

impl fmt::Display for SynonymToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for SynonymToken {
    type Err = ActionTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
