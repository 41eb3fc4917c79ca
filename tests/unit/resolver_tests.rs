/*!
 * Tests for the subtitle resolver fallback chain
 */

use ytsubai::errors::{ResolveError, TranscriptError};
use ytsubai::transcript::mock::MockTranscriptSource;
use ytsubai::transcript::model::CaptionEntry;
use ytsubai::transcript::resolver::{ResolverOptions, SubtitleResolver};
use ytsubai::transcript::source::TrackList;
use crate::common;

/// Test that the first tier short-circuits the chain
#[tokio::test]
async fn test_resolve_withPrimaryTier_shouldStopAfterOneFetch() {
    let resolver = SubtitleResolver::new(common::primary_tier_source());

    let transcript = resolver.resolve(common::TEST_URL).await.unwrap();

    assert_eq!(transcript.text(), "Hello world");
    assert_eq!(resolver.source().fetch_calls(), 1);
    assert_eq!(resolver.source().list_calls(), 0);
    assert_eq!(resolver.source().fetch_languages(), vec![vec!["ko".to_string(), "en".to_string()]]);
}

/// Test that a transcript without entries still counts as found
#[tokio::test]
async fn test_resolve_withZeroEntryTranscript_shouldSucceedWithEmptyText() {
    let source = MockTranscriptSource::new().with_fetch(&["ko", "en"], vec![]);
    let resolver = SubtitleResolver::new(source);

    let transcript = resolver.resolve(common::TEST_URL).await.unwrap();

    assert_eq!(transcript.text(), "");
    assert_eq!(transcript.len(), 0);
    assert_eq!(resolver.source().fetch_calls(), 1);
    assert_eq!(resolver.source().list_calls(), 0);
}

/// Test that tiers are tried in order with their own language lists
#[tokio::test]
async fn test_resolve_withNoFetchAnswers_shouldTryBothTiersThenList() {
    let resolver = SubtitleResolver::new(common::spanish_only_source());

    let _ = resolver.resolve(common::TEST_URL).await;

    let languages = resolver.source().fetch_languages();
    assert_eq!(languages.len(), 2);
    assert_eq!(languages[0], vec!["ko", "en"]);
    assert_eq!(languages[1], vec!["ko-KR", "en-US", "en"]);
    assert_eq!(resolver.source().list_calls(), 1);
}

/// Test that a translation is preferred over the original track
#[tokio::test]
async fn test_resolve_withTranslatableTrack_shouldReturnKoreanTranslation() {
    let mut tracks = TrackList::new("abc123");
    tracks.push(MockTranscriptSource::track("es", true));
    let source = MockTranscriptSource::new()
        .with_tracks(tracks)
        .with_track_content("es", common::spanish_entries())
        .with_translation("es", "ko", vec![CaptionEntry::new("안녕 세상", 0.0, 2.0)]);
    let resolver = SubtitleResolver::new(source);

    let transcript = resolver.resolve(common::TEST_URL).await.unwrap();

    assert_eq!(transcript.text(), "안녕 세상");
    assert_eq!(transcript.language_code.as_deref(), Some("ko"));
    assert_eq!(transcript.translated_from.as_deref(), Some("es"));
    assert_eq!(resolver.source().fetch_track_calls(), 1);
}

/// Test that a manual track wins over earlier generated ones
#[tokio::test]
async fn test_resolve_withManualAndGenerated_shouldPickManual() {
    let mut tracks = TrackList::new("abc123");
    tracks.push(MockTranscriptSource::track("de", true));
    tracks.push(MockTranscriptSource::track("fr", false));
    let source = MockTranscriptSource::new()
        .with_tracks(tracks)
        .with_track_content("de", vec![CaptionEntry::new("Hallo", 0.0, 1.0)])
        .with_track_content("fr", vec![CaptionEntry::new("Bonjour", 0.0, 1.0)]);
    let resolver = SubtitleResolver::new(source);

    let transcript = resolver.resolve(common::TEST_URL).await.unwrap();

    assert_eq!(transcript.text(), "Bonjour");
    assert_eq!(resolver.source().translate_requests(), vec![("fr".to_string(), "ko".to_string())]);
}

/// Test that an empty listing ends in TranscriptUnavailable
#[tokio::test]
async fn test_resolve_withEmptyListing_shouldReportUnavailable() {
    let source = MockTranscriptSource::new().with_tracks(TrackList::new("abc123"));
    let resolver = SubtitleResolver::new(source);

    let result = resolver.resolve(common::TEST_URL).await;

    match result {
        Err(ResolveError::TranscriptUnavailable { video_id, source }) => {
            assert_eq!(video_id, "abc123");
            assert!(matches!(source, TranscriptError::TranscriptsDisabled(_)));
        }
        other => panic!("expected TranscriptUnavailable, got {:?}", other),
    }
}

/// Test that a listing failure is carried as the cause
#[tokio::test]
async fn test_resolve_withFailingListing_shouldCarryRequestError() {
    let source = MockTranscriptSource::new().failing_listing("connection reset");
    let resolver = SubtitleResolver::new(source);

    let error = resolver.resolve(common::TEST_URL).await.unwrap_err();

    assert!(error.to_string().contains("connection reset"));
    assert!(error.user_message().starts_with("자막을 가져오는 중 오류가 발생했습니다"));
}

/// Test that a URL without `v=` never reaches the source
#[tokio::test]
async fn test_resolve_withMalformedUrl_shouldFailWithoutCalls() {
    let resolver = SubtitleResolver::new(common::primary_tier_source());

    for url in ["https://youtu.be/abc123", "https://youtube.com/watch?v=", "not a url"] {
        let result = resolver.resolve(url).await;
        assert!(matches!(result, Err(ResolveError::MalformedUrl(_))), "url: {}", url);
    }
    assert_eq!(resolver.source().fetch_calls(), 0);
}

/// Test that extra query parameters do not leak into the id
#[tokio::test]
async fn test_resolve_withExtraParameters_shouldUseCleanId() {
    let resolver = SubtitleResolver::new(common::primary_tier_source());

    let tracks = resolver.list_tracks("https://www.youtube.com/watch?v=abc123&t=42s").await;

    // The mock has no listing; the error still names the clean id
    match tracks {
        Err(ResolveError::TranscriptUnavailable { video_id, .. }) => assert_eq!(video_id, "abc123"),
        other => panic!("expected TranscriptUnavailable, got {:?}", other),
    }
}

/// Test that custom language preferences replace the defaults
#[tokio::test]
async fn test_resolve_withCustomOptions_shouldUseConfiguredLanguages() {
    let options = ResolverOptions {
        primary_languages: vec!["ja".to_string()],
        fallback_languages: vec!["ja-JP".to_string()],
        translation_language: "en".to_string(),
    };
    let source = MockTranscriptSource::new()
        .with_fetch(&["ja-JP"], vec![CaptionEntry::new("こんにちは", 0.0, 1.0)]);
    let resolver = SubtitleResolver::with_options(source, options);

    let transcript = resolver.resolve(common::TEST_URL).await.unwrap();

    assert_eq!(transcript.text(), "こんにちは");
    assert_eq!(resolver.source().fetch_calls(), 2);
}

/// Test that the resolver can be driven from synchronous code
#[test]
fn test_resolve_fromBlockingContext_shouldReturnTranscript() {
    let resolver = SubtitleResolver::new(common::primary_tier_source());

    let transcript = tokio_test::block_on(resolver.resolve(common::TEST_URL)).unwrap();

    assert_eq!(transcript.text(), "Hello world");
}
