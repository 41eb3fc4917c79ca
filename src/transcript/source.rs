/*!
 * Transcript source boundary.
 *
 * The resolver only needs three operations from whatever serves subtitles:
 * list the tracks of a video, fetch one track (optionally machine-translated),
 * and fetch the best track for a language preference list. The last one has a
 * default implementation built from the first two that follows the usual
 * provider rule: for each requested language in order, a manually created
 * track wins over a generated one.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::TranscriptError;
use crate::transcript::model::Transcript;

/// One subtitle track offered for a video
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTrack {
    /// Video the track belongs to
    pub video_id: String,
    /// Human readable language name as reported by the site
    pub language: String,
    /// Language code, possibly locale-qualified (`en`, `en-US`, `ko-KR`)
    pub language_code: String,
    /// Auto-generated (speech recognition) rather than authored
    pub is_generated: bool,
    /// Language codes this track can be machine-translated into
    pub translation_languages: Vec<String>,
    /// Location the caption payload is fetched from
    pub base_url: String,
}

impl TranscriptTrack {
    /// Whether the site offers any translation for this track
    pub fn is_translatable(&self) -> bool {
        !self.translation_languages.is_empty()
    }

    /// Whether a translation into `language_code` is offered
    pub fn can_translate_to(&self, language_code: &str) -> bool {
        self.translation_languages.iter().any(|l| l == language_code)
    }

    /// Short `code (manual|generated)` label for logs
    pub fn label(&self) -> String {
        let kind = if self.is_generated { "generated" } else { "manual" };
        format!("{} ({})", self.language_code, kind)
    }
}

/// All tracks of one video, split by origin, each in provider order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackList {
    pub video_id: String,
    pub manually_created: Vec<TranscriptTrack>,
    pub generated: Vec<TranscriptTrack>,
}

impl TrackList {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            ..Default::default()
        }
    }

    /// Add a track to the collection matching its origin
    pub fn push(&mut self, track: TranscriptTrack) {
        if track.is_generated {
            self.generated.push(track);
        } else {
            self.manually_created.push(track);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.manually_created.is_empty() && self.generated.is_empty()
    }

    /// Iterate manual tracks first, then generated ones
    pub fn iter(&self) -> impl Iterator<Item = &TranscriptTrack> {
        self.manually_created.iter().chain(self.generated.iter())
    }

    /// Pick a track for a language preference list.
    ///
    /// Languages are tried in order; within one language a manually created
    /// track is preferred. Codes match exactly (`en` does not match `en-US`).
    pub fn find_transcript(&self, languages: &[String]) -> Result<&TranscriptTrack, TranscriptError> {
        for language in languages {
            let manual = self.manually_created.iter().find(|t| &t.language_code == language);
            if let Some(track) = manual {
                return Ok(track);
            }
            let generated = self.generated.iter().find(|t| &t.language_code == language);
            if let Some(track) = generated {
                return Ok(track);
            }
        }

        Err(TranscriptError::NoMatchingLanguage {
            languages: languages.join(", "),
        })
    }

    /// First manual track, otherwise first generated track
    pub fn first_available(&self) -> Option<&TranscriptTrack> {
        self.manually_created.first().or_else(|| self.generated.first())
    }
}

/// Common trait for everything that can serve YouTube subtitles
#[async_trait]
pub trait TranscriptSource: Send + Sync + Debug {
    /// List every track offered for a video
    ///
    /// # Returns
    /// * `Result<TrackList, TranscriptError>` - The tracks split by origin, or an error
    async fn list_tracks(&self, video_id: &str) -> Result<TrackList, TranscriptError>;

    /// Fetch one track, translated into `translate_to` when given
    async fn fetch_track(
        &self,
        track: &TranscriptTrack,
        translate_to: Option<&str>,
    ) -> Result<Transcript, TranscriptError>;

    /// Fetch the best track for a language preference list
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript, TranscriptError> {
        let tracks = self.list_tracks(video_id).await?;
        let track = tracks.find_transcript(languages)?;
        self.fetch_track(track, None).await
    }
}
