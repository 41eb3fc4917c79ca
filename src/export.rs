/*!
 * Export of transcripts and transformation results.
 *
 * - plain text: the flattened transcript, UTF-8
 * - CSV: header `text,start,duration`, one row per caption entry
 * - Markdown: one file per transformation result
 *
 * Files are named after the video id inside an output directory; existing
 * files are left alone unless the caller forces an overwrite.
 */

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Writer};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::transcript::model::{CaptionEntry, Transcript};
use crate::transform::prompts::TransformKind;

/// Serialize caption entries as CSV with a header row
pub fn transcript_to_csv(transcript: &Transcript) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    if transcript.is_empty() {
        writer.write_record(["text", "start", "duration"])
            .context("Failed to write CSV header")?;
    }
    for entry in &transcript.entries {
        writer.serialize(entry).context("Failed to serialize caption entry")?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Parse CSV produced by `transcript_to_csv` back into caption entries
pub fn parse_transcript_csv(content: &str) -> Result<Vec<CaptionEntry>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();
    for (index, record) in reader.deserialize::<CaptionEntry>().enumerate() {
        let entry = record.with_context(|| format!("Invalid CSV row {}", index + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Writes export files for one video into an output directory
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    force_overwrite: bool,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>, force_overwrite: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            force_overwrite,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the flattened transcript as `{video_id}.txt`
    pub fn export_text(&self, video_id: &str, transcript: &Transcript) -> Result<Option<PathBuf>> {
        let path = FileManager::generate_output_path(&self.output_dir, video_id, None, "txt");
        self.write(path, &transcript.text())
    }

    /// Write the caption table as `{video_id}.csv`
    pub fn export_csv(&self, video_id: &str, transcript: &Transcript) -> Result<Option<PathBuf>> {
        let path = FileManager::generate_output_path(&self.output_dir, video_id, None, "csv");
        let csv = transcript_to_csv(transcript)?;
        self.write(path, &csv)
    }

    /// Write a transformation result as `{video_id}_{suffix}.md`
    pub fn export_markdown(&self, video_id: &str, kind: TransformKind, content: &str) -> Result<Option<PathBuf>> {
        let path = FileManager::generate_output_path(&self.output_dir, video_id, Some(kind.file_suffix()), "md");
        self.write(path, content)
    }

    fn write(&self, path: PathBuf, content: &str) -> Result<Option<PathBuf>> {
        if FileManager::file_exists(&path) && !self.force_overwrite {
            warn!("Skipping {:?}, file already exists (use -f to force overwrite)", path);
            return Ok(None);
        }

        FileManager::write_to_file(&path, content)?;
        info!("Saved {:?}", path);
        Ok(Some(path))
    }
}
