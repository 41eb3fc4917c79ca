/*!
 * Common test utilities for the ytsubai test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use ytsubai::app_config::{Config, LlmProvider};
use ytsubai::transcript::model::CaptionEntry;
use ytsubai::transcript::source::TrackList;
use ytsubai::transcript::mock::MockTranscriptSource;

/// Watch URL used across tests
pub const TEST_URL: &str = "https://youtube.com/watch?v=abc123";

/// Initializes env_logger once; repeated calls are ignored
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// The two-entry English transcript used by the happy-path scenario
pub fn hello_world_entries() -> Vec<CaptionEntry> {
    vec![
        CaptionEntry::new("Hello", 0.0, 1.2),
        CaptionEntry::new("world", 1.2, 0.8),
    ]
}

/// Spanish entries for the track listing tier
pub fn spanish_entries() -> Vec<CaptionEntry> {
    vec![
        CaptionEntry::new("Hola", 0.0, 1.0),
        CaptionEntry::new("mundo", 1.0, 1.0),
    ]
}

/// Source answering the first tier with `hello_world_entries`
pub fn primary_tier_source() -> MockTranscriptSource {
    MockTranscriptSource::new().with_fetch(&["ko", "en"], hello_world_entries())
}

/// Source where only one generated Spanish track exists, without translations
pub fn spanish_only_source() -> MockTranscriptSource {
    let mut tracks = TrackList::new("abc123");
    tracks.push(MockTranscriptSource::track("es", true));
    MockTranscriptSource::new()
        .with_tracks(tracks)
        .with_track_content("es", spanish_entries())
}

/// Config for a provider that needs no API key
pub fn keyless_config() -> Config {
    let mut config = Config::default();
    config.llm.provider = LlmProvider::LMStudio;
    config
}
