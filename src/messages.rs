/*!
 * User-facing texts.
 *
 * Every string the bot shows lives here so that handlers and the pipeline
 * only deal with data. Dynamic parts of HTML messages are escaped.
 */

use crate::language_utils::Language;

/// Glyph every user-visible error starts with
pub const WARNING: &str = "⚠️";

/// Greeting shown on /start
pub const GREETING: &str = "👋 Привет! Я умный переводчик и помощник.\nВыбери язык, на который я буду переводить:";

/// Label of the inline synonyms button
pub const SYNONYMS_BUTTON: &str = "🔎 Синонимы";

/// Toast shown while synonyms are looked up
pub const SYNONYMS_SEARCHING: &str = "Ищем синонимы...";

/// Sentinel for an AI answer without text
pub const EMPTY_ANSWER: &str = "⚠️ Gemini не смог дать ответ.";

/// Confirmation after a language button was pressed
pub fn language_selected(language: Language) -> String {
    format!(
        "✅ Отлично! Перевожу на {}.\nТеперь просто напиши фразу для перевода и объяснения.",
        language.button_label()
    )
}

/// Primary translation failure; the only reply for that message
pub fn translation_failed(error: &impl std::fmt::Display) -> String {
    format!("{} Ошибка перевода: {}", WARNING, error)
}

/// Failure to localize the English explanation
pub fn explanation_translation_failed(error: &impl std::fmt::Display) -> String {
    format!("{} Ошибка перевода объяснения: {}", WARNING, error)
}

/// AI provider reported an API error
pub fn ai_api_error(message: &str) -> String {
    format!("{} Ошибка ИИ (API Gemini): {}", WARNING, message)
}

/// AI call failed for any other reason
pub fn ai_unknown_error(message: &str) -> String {
    format!("{} Неизвестная ошибка ИИ: {}", WARNING, message)
}

/// No usable synonyms were produced
pub fn synonyms_not_found(word: &str) -> String {
    format!("{} Gemini не смог найти синонимы или альтернативы для слова \"{}\".", WARNING, word)
}

/// English synonym list shown because localizing it failed
pub fn synonyms_translation_failed(language: Language, english_list: &str) -> String {
    format!(
        "{} Ошибка при переводе списка синонимов на {}. Вот английский оригинал:\n{}",
        WARNING,
        language.code(),
        english_list
    )
}

/// Callback data could not be decoded
pub fn invalid_action(error: &impl std::fmt::Display) -> String {
    format!("{} Не удалось обработать кнопку: {}", WARNING, error)
}

/// Telegram's cap on the length of a message, in UTF-16 code units
pub const MESSAGE_LIMIT: usize = 4096;

/// Marks content cut to fit a message
const ELLIPSIS: char = '…';

const TRANSLATION_HEADER: &str = "🌍 <b>Перевод:</b>\n";
const EXPLANATION_HEADER: &str = "\n\n🤖 <b>Объяснение от Gemini:</b>\n";

/// HTML reply for a translated message
///
/// Both parts are shortened when needed so the reply fits one message. The
/// explanation keeps at least half of the room when both are long.
pub fn translation_reply(translation: &str, explanation: &str) -> String {
    let room = MESSAGE_LIMIT - utf16_len(TRANSLATION_HEADER) - utf16_len(EXPLANATION_HEADER);
    let explanation_len = escaped_len(explanation);
    let translation = escape_html_within(translation, room - explanation_len.min(room / 2));
    let explanation = escape_html_within(explanation, room - utf16_len(&translation));

    format!("{}{}{}{}", TRANSLATION_HEADER, translation, EXPLANATION_HEADER, explanation)
}

/// HTML reply for a synonym lookup
pub fn synonyms_reply(word: &str, synonyms: &str) -> String {
    let header = format!("📚 <b>Синонимы/альтернативы для \"{}\":</b>\n\n", escape_html(word));
    let room = MESSAGE_LIMIT.saturating_sub(utf16_len(&header));
    format!("{}{}", header, escape_html_within(synonyms, room))
}

/// Escape text for Telegram's HTML parse mode
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match html_entity(ch) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(ch),
        }
    }
    escaped
}

/// Escape text, cutting it with an ellipsis so the result is at most
/// `limit` UTF-16 code units long; entities are never split
pub fn escape_html_within(text: &str, limit: usize) -> String {
    if escaped_len(text) <= limit {
        return escape_html(text);
    }
    if limit == 0 {
        return String::new();
    }

    let mut escaped = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let width = escaped_width(ch);
        if used + width > limit - 1 {
            break;
        }
        match html_entity(ch) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(ch),
        }
        used += width;
    }
    escaped.push(ELLIPSIS);
    escaped
}

fn html_entity(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    }
}

fn escaped_width(ch: char) -> usize {
    html_entity(ch).map_or(ch.len_utf16(), |entity| entity.len())
}

/// Length of the escaped text in UTF-16 code units
fn escaped_len(text: &str) -> usize {
    text.chars().map(escaped_width).sum()
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
