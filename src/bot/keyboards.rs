/*!
 * Keyboards attached to outgoing messages.
 */

use crate::action_token::SynonymToken;
use crate::language_utils::Language;
use crate::messages;
use crate::providers::telegram::ReplyMarkup;

/// One-row keyboard with a button per supported language
pub fn language_keyboard() -> ReplyMarkup {
    ReplyMarkup::one_time_keyboard(Language::ALL.iter().map(|lang| lang.button_label()))
}

/// Inline button triggering a synonym lookup
pub fn synonyms_button(token: &SynonymToken) -> ReplyMarkup {
    ReplyMarkup::inline_button(messages::SYNONYMS_BUTTON, token.encode())
}
