/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::Path;
use ytsubai::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.txt", "content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test that generate_output_path builds `{id}_{suffix}.{ext}`
#[test]
fn test_generate_output_path_withSuffix_shouldJoinWithUnderscore() {
    let path = FileManager::generate_output_path(Path::new("/tmp/out"), "abc123", Some("summarize"), "md");
    assert_eq!(path, Path::new("/tmp/out/abc123_summarize.md"));

    let path = FileManager::generate_output_path(Path::new("/tmp/out"), "abc123", None, ".csv");
    assert_eq!(path, Path::new("/tmp/out/abc123.csv"));
}

/// Test that unsafe characters never reach the file name
#[test]
fn test_generate_output_path_withUnsafeStem_shouldSanitize() {
    let path = FileManager::generate_output_path(Path::new("out"), "a/b c", None, "txt");
    assert_eq!(path, Path::new("out/a_b_c.txt"));
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("file.txt");

    FileManager::write_to_file(&nested, "자막")?;

    assert!(FileManager::dir_exists(temp_dir.path().join("a").join("b")));
    assert_eq!(FileManager::read_to_string(&nested)?, "자막");
    Ok(())
}
