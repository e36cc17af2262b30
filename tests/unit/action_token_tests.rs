/*!
 * Tests for the synonym action token
 */

use lingobot::action_token::{SynonymToken, MAX_CALLBACK_DATA_BYTES, MAX_WORD_CHARS};
use lingobot::errors::ActionTokenError;
use lingobot::language_utils::Language;

#[test]
fn test_roundTrip_withEveryLanguage_shouldReproducePair() {
    for language in Language::ALL {
        for word in ["hello", "привет", "o'zbek", "naïve", "co-op"] {
            let token = SynonymToken::new(language, word).unwrap();
            let decoded: SynonymToken = token.encode().parse().unwrap();

            assert_eq!(decoded.language(), language);
            assert_eq!(decoded.word(), word);
        }
    }
}

#[test]
fn test_display_shouldMatchEncode() {
    let token = SynonymToken::new(Language::Uz, "salom").unwrap();
    assert_eq!(token.to_string(), "SYNONYM_uz_salom");
}

#[test]
fn test_new_withUnusableWords_shouldFail() {
    assert_eq!(SynonymToken::new(Language::En, ""), Err(ActionTokenError::MissingWord));
    assert!(matches!(SynonymToken::new(Language::En, "two words"), Err(ActionTokenError::InvalidWord(_))));
    assert!(matches!(
        SynonymToken::new(Language::En, "a".repeat(MAX_WORD_CHARS + 1)),
        Err(ActionTokenError::InvalidWord(_))
    ));
}

#[test]
fn test_decode_withOversizedData_shouldFail() {
    let data = format!("SYNONYM_en_{}", "a".repeat(MAX_CALLBACK_DATA_BYTES));
    assert_eq!(SynonymToken::decode(&data), Err(ActionTokenError::TooLong(data.len())));
}

#[test]
fn test_decode_withUppercaseOrLongCode_shouldFail() {
    assert!(matches!(SynonymToken::decode("SYNONYM_RU_слово"), Err(ActionTokenError::UnknownLanguage(_))));
    assert!(matches!(SynonymToken::decode("SYNONYM_rus_слово"), Err(ActionTokenError::UnknownLanguage(_))));
}

#[test]
fn test_fromTranslation_shouldTakeFirstToken() {
    let token = SynonymToken::from_translation(Language::Uz, "Rahmat sizga").unwrap();
    assert_eq!(token.language(), Language::Uz);
    assert_eq!(token.word(), "Rahmat");
    assert_eq!(token.encode(), "SYNONYM_uz_Rahmat");
}

#[test]
fn test_fromTranslation_withLongCyrillicWord_shouldTruncateByCharacters() {
    let translation = "Достопримечательностями полон город";
    let token = SynonymToken::from_translation(Language::Ru, translation).unwrap();

    assert_eq!(token.word().chars().count(), MAX_WORD_CHARS);
    assert_eq!(token.word(), "Достопримечательност");
    assert!(token.encode().len() <= MAX_CALLBACK_DATA_BYTES);
}
