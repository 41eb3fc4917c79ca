/*!
 * Interactive session state.
 *
 * Holds what the interactive loop shows again after every action: the current
 * URL, the last resolve outcome and the latest result of each transformation
 * kind. Nothing here outlives the process.
 */

use std::collections::HashMap;

use crate::transcript::model::Transcript;
use crate::transcript::video_id::VideoReference;
use crate::transform::prompts::TransformKind;
use crate::transform::transformer::TransformOutcome;

/// Outcome of resolving the current URL
#[derive(Debug, Clone, PartialEq)]
pub enum SubtitleState {
    /// No URL resolved yet
    Empty,
    /// Transcript available
    Loaded(Transcript),
    /// Resolve failed with this display message
    Failed(String),
}

/// Per-process interactive session
#[derive(Debug, Clone)]
pub struct Session {
    video: Option<VideoReference>,
    subtitles: SubtitleState,
    results: HashMap<TransformKind, TransformOutcome>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            video: None,
            subtitles: SubtitleState::Empty,
            results: HashMap::new(),
        }
    }

    /// Switch to a new video; previous subtitles and results are dropped
    pub fn set_video(&mut self, video: VideoReference) {
        if self.video.as_ref() == Some(&video) {
            return;
        }
        self.video = Some(video);
        self.subtitles = SubtitleState::Empty;
        self.results.clear();
    }

    pub fn video(&self) -> Option<&VideoReference> {
        self.video.as_ref()
    }

    pub fn set_transcript(&mut self, transcript: Transcript) {
        self.subtitles = SubtitleState::Loaded(transcript);
    }

    pub fn set_resolve_error(&mut self, message: impl Into<String>) {
        self.subtitles = SubtitleState::Failed(message.into());
    }

    pub fn subtitles(&self) -> &SubtitleState {
        &self.subtitles
    }

    /// Transcript of the current video, when one was resolved
    pub fn transcript(&self) -> Option<&Transcript> {
        match &self.subtitles {
            SubtitleState::Loaded(transcript) => Some(transcript),
            _ => None,
        }
    }

    /// Record the latest result for a kind, replacing any earlier one
    pub fn set_result(&mut self, kind: TransformKind, outcome: TransformOutcome) {
        self.results.insert(kind, outcome);
    }

    pub fn result(&self, kind: TransformKind) -> Option<&TransformOutcome> {
        self.results.get(&kind)
    }

    /// Results to show, in display order
    pub fn shown_results(&self) -> Vec<(TransformKind, &TransformOutcome)> {
        TransformKind::ALL
            .iter()
            .filter_map(|kind| self.results.get(kind).map(|outcome| (*kind, outcome)))
            .collect()
    }
}
