/*!
 * Tests for transcript and result export
 */

use anyhow::Result;
use ytsubai::export::{parse_transcript_csv, transcript_to_csv, Exporter};
use ytsubai::file_utils::FileManager;
use ytsubai::transcript::model::{CaptionEntry, Transcript};
use ytsubai::transform::TransformKind;
use crate::common;

/// Test that the CSV written to disk reads back to the same entries
#[test]
fn test_export_csv_withEntries_shouldParseBackInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let exporter = Exporter::new(temp_dir.path(), false);
    let entries = vec![
        CaptionEntry::new("Hello, \"world\"", 0.0, 1.2),
        CaptionEntry::new("안녕하세요", 1.2, 0.8),
        CaptionEntry::new("line\nbreak", 2.0, 1.5),
    ];
    let transcript = Transcript::new(entries.clone());

    let path = exporter.export_csv("abc123", &transcript)?.expect("file should be written");

    assert_eq!(path, temp_dir.path().join("abc123.csv"));
    let content = FileManager::read_to_string(&path)?;
    assert!(content.starts_with("text,start,duration\n"));
    assert_eq!(parse_transcript_csv(&content)?, entries);
    Ok(())
}

/// Test that the text export holds the flattened transcript
#[test]
fn test_export_text_shouldWriteFlattenedText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let exporter = Exporter::new(temp_dir.path(), false);
    let transcript = Transcript::new(common::hello_world_entries());

    let path = exporter.export_text("abc123", &transcript)?.expect("file should be written");

    assert_eq!(FileManager::read_to_string(path)?, "Hello world");
    Ok(())
}

/// Test that existing files are kept unless overwriting is forced
#[test]
fn test_export_markdown_withExistingFile_shouldRespectForceFlag() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let existing = common::create_test_file(temp_dir.path(), "abc123_summarize.md", "old")?;

    let skipped = Exporter::new(temp_dir.path(), false)
        .export_markdown("abc123", TransformKind::Summarize, "new")?;
    assert!(skipped.is_none());
    assert_eq!(FileManager::read_to_string(&existing)?, "old");

    let written = Exporter::new(temp_dir.path(), true)
        .export_markdown("abc123", TransformKind::Summarize, "new")?;
    assert_eq!(written, Some(existing.clone()));
    assert_eq!(FileManager::read_to_string(&existing)?, "new");
    Ok(())
}

/// Test that an empty transcript still produces a header-only CSV
#[test]
fn test_transcript_to_csv_withEmptyTranscript_shouldBeHeaderOnly() -> Result<()> {
    let csv = transcript_to_csv(&Transcript::default())?;
    assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["text,start,duration"]);
    Ok(())
}
