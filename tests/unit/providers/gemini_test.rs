/*!
 * Tests for the Gemini client wire format
 */

use serde_json::json;

use lingobot::providers::gemini::{
    Gemini, GenerateContentRequest, GenerateContentResponse, HarmBlockThreshold,
};
use lingobot::providers::Provider;

#[test]
fn test_apiUrl_withDefaultAndCustomEndpoint_shouldTargetModel() {
    let client = Gemini::new("key", "", "gemini-2.5-flash", 60);
    assert_eq!(
        client.api_url(client.model()),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );

    let client = Gemini::new("key", "http://localhost:8080/", "m", 60);
    assert_eq!(client.api_url("m"), "http://localhost:8080/v1beta/models/m:generateContent");
}

#[test]
fn test_debug_shouldNotLeakApiKey() {
    let client = Gemini::new("super-secret", "", "gemini-2.5-flash", 60);
    assert!(!format!("{:?}", client).contains("super-secret"));
}

#[test]
fn test_requestSerialization_shouldUseCamelCaseAndSafetyNames() {
    let request = GenerateContentRequest::new("gemini-2.5-flash", "Explain 'hi'")
        .temperature(0.4)
        .max_output_tokens(400)
        .safety_threshold(HarmBlockThreshold::BlockNone);

    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["contents"][0]["parts"][0]["text"], "Explain 'hi'");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 400);
    assert!(body.get("model").is_none());

    let settings = body["safetySettings"].as_array().unwrap();
    assert_eq!(settings.len(), 4);
    assert!(settings.iter().all(|s| s["threshold"] == "BLOCK_NONE"));
    assert!(settings.iter().any(|s| s["category"] == "HARM_CATEGORY_DANGEROUS_CONTENT"));
    assert!(settings.iter().any(|s| s["category"] == "HARM_CATEGORY_HATE_SPEECH"));
}

#[test]
fn test_extractText_shouldJoinPartsAndTrim() {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "  A polite "}, {"text": "greeting.\n"}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 5}
    }))
    .unwrap();

    assert_eq!(Gemini::extract_text(&response), "A polite greeting.");
    assert_eq!(response.usage_metadata.unwrap().candidates_token_count, 5);
}

#[test]
fn test_extractText_withBlockedPrompt_shouldBeEmpty() {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "promptFeedback": {"blockReason": "SAFETY"}
    }))
    .unwrap();

    assert_eq!(Gemini::extract_text(&response), "");
    assert_eq!(response.prompt_feedback.unwrap().block_reason.as_deref(), Some("SAFETY"));
}

#[test]
fn test_extractText_withCandidateWithoutContent_shouldBeEmpty() {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{"finishReason": "MAX_TOKENS"}]
    }))
    .unwrap();

    assert_eq!(Gemini::extract_text(&response), "");
}
