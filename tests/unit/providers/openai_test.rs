/*!
 * Tests for OpenAI provider request builders
 */

use serde_json::json;
use ytsubai::providers::openai::{OpenAI, OpenAIRequest, OpenAIResponse};
use ytsubai::providers::ChatRequest;

#[test]
fn test_openaiRequest_builder_shouldSerializeAllFields() {
    let request = OpenAIRequest::new("gpt-4o-mini")
        .add_message("system", "You are a summarizer")
        .add_message("user", "Hello")
        .temperature(0.0)
        .max_tokens(512);

    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["model"], "gpt-4o-mini");
    assert_eq!(value["messages"][0]["role"], "system");
    assert_eq!(value["messages"][1]["content"], "Hello");
    assert_eq!(value["temperature"], 0.0);
    assert_eq!(value["max_tokens"], 512);
}

#[test]
fn test_openaiRequest_fromChatRequest_shouldKeepMessageOrder() {
    let chat = ChatRequest::new("gpt-4o")
        .add_message("system", "prompt")
        .add_message("user", "text");

    let value = serde_json::to_value(OpenAIRequest::from(chat)).unwrap();

    assert_eq!(value["messages"].as_array().unwrap().len(), 2);
    assert_eq!(value["messages"][0]["content"], "prompt");
    assert_eq!(value["temperature"], 0.0);
    assert!(value.get("max_tokens").is_none());
}

#[test]
fn test_openai_extractText_shouldReadFirstChoice() {
    let response: OpenAIResponse = serde_json::from_value(json!({
        "choices": [{ "message": { "role": "assistant", "content": "요약" } }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 3 }
    }))
    .unwrap();

    assert_eq!(OpenAI::extract_text_from_response(&response).as_deref(), Some("요약"));
    assert_eq!(response.usage.unwrap().completion_tokens, 3);
}

#[test]
fn test_openai_extractText_withNoChoices_shouldBeNone() {
    let response: OpenAIResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
    assert!(OpenAI::extract_text_from_response(&response).is_none());
}
