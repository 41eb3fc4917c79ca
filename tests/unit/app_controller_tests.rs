/*!
 * Tests for the application controller
 */

use anyhow::Result;
use std::io::Cursor;
use ytsubai::app_config::Config;
use ytsubai::app_controller::Controller;
use ytsubai::providers::mock::MockProvider;
use ytsubai::session::SubtitleState;
use ytsubai::transcript::mock::MockTranscriptSource;
use ytsubai::transform::{ContentTransformer, PromptVariant, TransformKind};
use crate::common;

/// Test that fetch exports both TXT and CSV named after the video id
#[tokio::test]
async fn test_fetch_withExport_shouldWriteTextAndCsv() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_source(
        Config::default(),
        common::primary_tier_source(),
        Some(temp_dir.path().to_path_buf()),
        false,
    );

    let transcript = controller.fetch(common::TEST_URL, true).await?;

    assert_eq!(transcript.len(), 2);
    assert!(temp_dir.path().join("abc123.txt").exists());
    assert!(temp_dir.path().join("abc123.csv").exists());
    Ok(())
}

/// Test that fetch without export leaves the output directory untouched
#[tokio::test]
async fn test_fetch_withoutExport_shouldWriteNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_source(
        Config::default(),
        common::primary_tier_source(),
        Some(temp_dir.path().to_path_buf()),
        false,
    );

    controller.fetch(common::TEST_URL, false).await?;

    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 0);
    Ok(())
}

/// Test that an unresolvable video surfaces as an error
#[tokio::test]
async fn test_fetch_withNoSubtitles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_source(
        Config::default(),
        MockTranscriptSource::new(),
        Some(temp_dir.path().to_path_buf()),
        false,
    );

    let error = controller.fetch(common::TEST_URL, true).await.unwrap_err();

    assert!(error.to_string().starts_with("자막을 가져오는 중 오류가 발생했습니다"));
    Ok(())
}

/// Test that transform runs each kind once and exports only successes
#[tokio::test]
async fn test_transform_withIntermittentProvider_shouldReportEachKind() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_source(
        Config::default(),
        common::primary_tier_source(),
        Some(temp_dir.path().to_path_buf()),
        false,
    );
    let provider = MockProvider::intermittent(2);
    let transformer = ContentTransformer::new(provider.clone(), "m");

    let outcomes = controller
        .transform(&transformer, common::TEST_URL, &[TransformKind::Summarize, TransformKind::Translate], true)
        .await?;

    assert_eq!(provider.request_count(), 2);
    assert_eq!(outcomes[0].0, TransformKind::Summarize);
    assert!(outcomes[0].1.is_success());
    assert!(!outcomes[1].1.is_success());
    assert!(temp_dir.path().join("abc123_summarize.md").exists());
    assert!(!temp_dir.path().join("abc123_translate.md").exists());
    Ok(())
}

/// Test that the transformer honours the config variant and the jargon override
#[test]
fn test_build_transformer_withKeylessProvider_shouldApplyVariant() -> Result<()> {
    let controller = Controller::with_source(common::keyless_config(), MockTranscriptSource::new(), None, false);

    assert_eq!(controller.build_transformer(false)?.variant(), PromptVariant::Standard);
    assert_eq!(controller.build_transformer(true)?.variant(), PromptVariant::KeepJargon);
    assert_eq!(controller.build_transformer(false)?.model(), "local-model");
    Ok(())
}

/// Test that a missing key is reported when building the transformer
#[test]
fn test_build_transformer_withMissingKey_shouldFail() {
    let controller = Controller::with_source(Config::default(), MockTranscriptSource::new(), None, false);

    let error = controller.build_transformer(false).unwrap_err();

    assert!(error.to_string().contains("OPENAI_API_KEY"));
}

/// Test a full interactive session: load, two transformations, export, quit
#[tokio::test]
async fn test_interactive_withScriptedInput_shouldKeepResults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_source(
        Config::default(),
        common::primary_tier_source(),
        Some(temp_dir.path().to_path_buf()),
        false,
    );
    let provider = MockProvider::working();
    let transformer = ContentTransformer::new(provider.clone(), "m");
    let input = Cursor::new(format!("{}\ns\no\ne\nq\n", common::TEST_URL));

    let session = controller.interactive(Some(&transformer), input).await?;

    assert_eq!(session.video().unwrap().video_id(), "abc123");
    assert_eq!(session.transcript().unwrap().text(), "Hello world");
    assert!(session.result(TransformKind::Summarize).unwrap().is_success());
    assert!(session.result(TransformKind::Organize).unwrap().is_success());
    assert!(session.result(TransformKind::Translate).is_none());
    assert_eq!(provider.request_count(), 2);
    assert!(temp_dir.path().join("abc123.txt").exists());
    assert!(temp_dir.path().join("abc123_summarize.md").exists());
    assert!(temp_dir.path().join("abc123_organize.md").exists());
    Ok(())
}

/// Test that bad URLs are rejected and a failed resolve is kept as a message
#[tokio::test]
async fn test_interactive_withBadUrlThenMissingSubtitles_shouldRecordFailure() -> Result<()> {
    let controller = Controller::with_source(Config::default(), MockTranscriptSource::new(), None, false);
    let input = Cursor::new(format!("https://youtu.be/abc123\n{}\ns\n", common::TEST_URL));

    let session = controller.interactive(None::<&ContentTransformer<MockProvider>>, input).await?;

    assert!(matches!(session.subtitles(), SubtitleState::Failed(message) if message.contains("자막")));
    assert!(session.result(TransformKind::Summarize).is_none());
    Ok(())
}

/// Test that switching URLs clears earlier results
#[tokio::test]
async fn test_interactive_withNewUrl_shouldClearResults() -> Result<()> {
    let source = common::primary_tier_source();
    let controller = Controller::with_source(Config::default(), source.clone(), None, false);
    let transformer = ContentTransformer::new(MockProvider::working(), "m");
    let input = Cursor::new(format!(
        "{}\ns\nu\nhttps://youtube.com/watch?v=other\nq\n",
        common::TEST_URL
    ));

    let session = controller.interactive(Some(&transformer), input).await?;

    assert_eq!(session.video().unwrap().video_id(), "other");
    assert!(session.result(TransformKind::Summarize).is_none());
    assert_eq!(source.fetch_calls(), 2);
    Ok(())
}

/// Test that the provider check reports rejected credentials
#[tokio::test]
async fn test_check_provider_withUnauthorized_shouldReturnFalse() {
    let controller = Controller::with_source(Config::default(), MockTranscriptSource::new(), None, false);

    assert!(controller.check_provider(&ContentTransformer::new(MockProvider::working(), "m")).await);
    assert!(!controller.check_provider(&ContentTransformer::new(MockProvider::unauthorized(), "m")).await);
}
