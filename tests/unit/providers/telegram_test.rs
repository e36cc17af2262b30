/*!
 * Tests for the Telegram Bot API client wire format
 */

use serde_json::json;

use lingobot::errors::ProviderError;
use lingobot::providers::telegram::{ReplyMarkup, SendMessageRequest, Telegram, Update, User};

#[test]
fn test_methodUrl_shouldEmbedToken() {
    let client = Telegram::new("123:abc", "", 40);
    assert_eq!(client.method_url("getMe"), "https://api.telegram.org/bot123:abc/getMe");

    let client = Telegram::new("123:abc", "http://localhost:8081/", 40);
    assert_eq!(client.method_url("sendMessage"), "http://localhost:8081/bot123:abc/sendMessage");
}

#[test]
fn test_debug_shouldNotLeakToken() {
    let client = Telegram::new("123:secret", "", 40);
    assert!(!format!("{:?}", client).contains("secret"));
}

#[test]
fn test_parseEnvelope_withOkResult_shouldReturnIt() {
    let body = r#"{"ok":true,"result":{"id":42,"is_bot":true,"first_name":"Lingo","username":"lingo_bot"}}"#;
    let user: User = Telegram::parse_envelope("getMe", 200, body).unwrap();

    assert_eq!(user.id, 42);
    assert!(user.is_bot);
    assert_eq!(user.username.as_deref(), Some("lingo_bot"));
}

#[test]
fn test_parseEnvelope_withErrors_shouldMapByCode() {
    let body = r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#;
    let result: Result<User, _> = Telegram::parse_envelope("getMe", 401, body);
    assert!(matches!(result, Err(ProviderError::AuthenticationError(_))));

    let body = r#"{"ok":false,"error_code":400,"description":"Bad Request: message is not modified"}"#;
    let result: Result<bool, _> = Telegram::parse_envelope("editMessageReplyMarkup", 400, body);
    assert!(matches!(result, Err(ProviderError::ApiError { status_code: 400, .. })));

    let result: Result<bool, _> = Telegram::parse_envelope("answerCallbackQuery", 502, "<html>Bad Gateway</html>");
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[test]
fn test_updates_shouldDeserializeMessagesAndCallbacks() {
    let body = json!({
        "ok": true,
        "result": [
            {
                "update_id": 100,
                "message": {
                    "message_id": 1,
                    "from": {"id": 7, "is_bot": false, "first_name": "Ann", "language_code": "ru"},
                    "chat": {"id": 7, "type": "private", "first_name": "Ann"},
                    "date": 1700000000,
                    "text": "/start"
                }
            },
            {
                "update_id": 101,
                "callback_query": {
                    "id": "4382",
                    "from": {"id": 7, "is_bot": false, "first_name": "Ann"},
                    "message": {"message_id": 2, "chat": {"id": 7, "type": "private"}, "date": 1700000001},
                    "chat_instance": "-1",
                    "data": "SYNONYM_ru_привет"
                }
            },
            {"update_id": 102, "edited_message": {"message_id": 1}}
        ]
    })
    .to_string();

    let updates: Vec<Update> = Telegram::parse_envelope("getUpdates", 200, &body).unwrap();

    assert_eq!(updates.len(), 3);
    assert_eq!(updates[0].message.as_ref().unwrap().text.as_deref(), Some("/start"));
    let query = updates[1].callback_query.as_ref().unwrap();
    assert_eq!(query.data.as_deref(), Some("SYNONYM_ru_привет"));
    assert_eq!(query.message.as_ref().unwrap().message_id, 2);
    assert!(updates[2].message.is_none() && updates[2].callback_query.is_none());
}

#[test]
fn test_sendMessageRequest_shouldSerializeOnlySetFields() {
    let plain = serde_json::to_value(SendMessageRequest::new(7, "hi")).unwrap();
    assert_eq!(plain, json!({"chat_id": 7, "text": "hi"}));

    let html = serde_json::to_value(
        SendMessageRequest::new(7, "<b>hi</b>")
            .html()
            .reply_markup(ReplyMarkup::inline_button("🔎 Синонимы", "SYNONYM_en_hi")),
    )
    .unwrap();
    assert_eq!(html["parse_mode"], "HTML");
    assert_eq!(html["reply_markup"]["inline_keyboard"][0][0]["callback_data"], "SYNONYM_en_hi");

    let removal = serde_json::to_value(SendMessageRequest::new(7, "ok").reply_markup(ReplyMarkup::remove_keyboard()))
        .unwrap();
    assert_eq!(removal["reply_markup"], json!({"remove_keyboard": true}));
}
