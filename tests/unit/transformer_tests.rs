/*!
 * Tests for the content transformer
 */

use ytsubai::errors::ProviderError;
use ytsubai::providers::mock::MockProvider;
use ytsubai::providers::ChatRequest;
use ytsubai::transform::prompts::{ORGANIZER_PROMPT, SUMMARIZER_PROMPT, TRANSLATOR_PROMPT};
use ytsubai::transform::{ContentTransformer, PromptVariant, TransformKind, TransformOutcome};

/// Test that each kind sends its own system prompt
#[tokio::test]
async fn test_transform_eachKind_shouldUseMatchingSystemPrompt() {
    let provider = MockProvider::working();
    let transformer = ContentTransformer::new(provider.clone(), "gpt-4o-mini");

    for kind in TransformKind::ALL {
        transformer.transform("Hello world", kind).await.unwrap();
    }

    let requests = provider.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].messages[0].content, SUMMARIZER_PROMPT);
    assert_eq!(requests[1].messages[0].content, ORGANIZER_PROMPT);
    assert!(requests[2].messages[0].content.starts_with(TRANSLATOR_PROMPT));
    assert!(requests[2].messages[0].content.contains("DO NOT OMIT ANY DETAILS OR WORDS"));
}

/// Test that every request uses temperature zero
#[tokio::test]
async fn test_transform_shouldAlwaysSendZeroTemperature() {
    let provider = MockProvider::working();
    let transformer = ContentTransformer::new(provider.clone(), "m");

    transformer.transform("text", TransformKind::Organize).await.unwrap();

    assert_eq!(provider.last_request().unwrap().temperature, 0.0);
}

/// Test that the user message wraps the text in the Korean instruction
#[tokio::test]
async fn test_transform_shouldWrapTextInInstruction() {
    let provider = MockProvider::working();
    let transformer = ContentTransformer::new(provider.clone(), "m");

    let generated = transformer.transform("Hello world", TransformKind::Summarize).await.unwrap();

    let user = &provider.last_request().unwrap().messages[1];
    assert_eq!(user.role, "user");
    assert_eq!(user.content, "다음 내용을 한국어로 정리해주세요:\n\nHello world");
    assert_eq!(generated, format!("[GENERATED] {}", user.content));
}

/// Test that the jargon variant changes the instruction and relaxes the translator
#[tokio::test]
async fn test_transform_withKeepJargon_shouldAskForEnglishJargon() {
    let provider = MockProvider::working();
    let transformer = ContentTransformer::new(provider.clone(), "m")
        .with_variant(PromptVariant::KeepJargon);

    transformer.transform("text", TransformKind::Translate).await.unwrap();

    let request = provider.last_request().unwrap();
    assert_eq!(request.messages[0].content, TRANSLATOR_PROMPT);
    assert!(request.messages[1].content.contains("Jargon은 영어 표현을 사용해주세요"));
}

/// Test that empty input is still sent and yields a string
#[tokio::test]
async fn test_transform_withEmptyText_shouldStillCallProvider() {
    let provider = MockProvider::working();
    let transformer = ContentTransformer::new(provider.clone(), "m");

    let outcome = transformer.transform_for_display("", TransformKind::Summarize).await;

    assert!(outcome.is_success());
    assert_eq!(provider.request_count(), 1);
}

/// Test that an empty completion is passed through verbatim
#[tokio::test]
async fn test_transform_withEmptyCompletion_shouldReturnEmptyString() {
    let transformer = ContentTransformer::new(MockProvider::empty(), "m");

    let outcome = transformer.transform_for_display("text", TransformKind::Organize).await;

    assert_eq!(outcome, TransformOutcome::Generated(String::new()));
}

/// Test that an auth failure is tagged and rendered without retrying
#[tokio::test]
async fn test_transform_withUnauthorized_shouldFailOnce() {
    let provider = MockProvider::unauthorized();
    let transformer = ContentTransformer::new(provider.clone(), "m");

    let error = transformer.transform("text", TransformKind::Summarize).await.unwrap_err();

    assert!(matches!(error.source, ProviderError::AuthenticationError(_)));
    assert_eq!(error.kind, "summarize");
    assert_eq!(provider.request_count(), 1);

    let outcome = transformer.transform_for_display("text", TransformKind::Summarize).await;
    assert!(matches!(outcome, TransformOutcome::Failed(ref message) if message.starts_with("요약 중 오류가 발생했습니다")));
}

/// Test that a custom generator sees the full request
#[tokio::test]
async fn test_transform_withCustomResponse_shouldReturnGeneratorOutput() {
    fn echo_model(request: &ChatRequest) -> String {
        format!("model={}", request.model)
    }
    let transformer = ContentTransformer::new(MockProvider::working().with_custom_response(echo_model), "gpt-4o");

    let generated = transformer.transform("text", TransformKind::Translate).await.unwrap();

    assert_eq!(generated, "model=gpt-4o");
}
