/*!
 * Mock transcript source for testing.
 *
 * Every operation is scripted up front and every call is counted, so tests
 * can assert both what the resolver returned and which fallback tiers it
 * actually tried:
 * - `with_fetch` - answer a language-list fetch with fixed entries
 * - `with_tracks` / `with_track_content` - back the track listing tier
 * - `with_translation` - make a track translatable into one language
 * - `failing_listing` - make the listing itself fail
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::TranscriptError;
use crate::transcript::model::{CaptionEntry, Transcript};
use crate::transcript::source::{TrackList, TranscriptSource, TranscriptTrack};

/// Call counters shared between clones of one mock
#[derive(Debug, Default)]
struct CallLog {
    fetch_calls: AtomicUsize,
    list_calls: AtomicUsize,
    fetch_track_calls: AtomicUsize,
    fetch_languages: Mutex<Vec<Vec<String>>>,
    translate_requests: Mutex<Vec<(String, String)>>,
}

/// Scriptable transcript source
#[derive(Debug, Clone, Default)]
pub struct MockTranscriptSource {
    /// Language-list fetch answers keyed by the joined language list
    fetch_answers: HashMap<String, Vec<CaptionEntry>>,
    /// Track listing, `None` means the video has no tracks
    tracks: Option<TrackList>,
    /// Listing failure message
    listing_error: Option<String>,
    /// Original content per track language code
    track_contents: HashMap<String, Vec<CaptionEntry>>,
    /// Translated content keyed by (source code, target code)
    translations: HashMap<(String, String), Vec<CaptionEntry>>,
    calls: Arc<CallLog>,
}

fn language_key(languages: &[String]) -> String {
    languages.join(",")
}

impl MockTranscriptSource {
    /// Create a mock where every operation fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a track description for use with `with_tracks`
    pub fn track(language_code: &str, is_generated: bool) -> TranscriptTrack {
        TranscriptTrack {
            video_id: "mock".to_string(),
            language: language_code.to_string(),
            language_code: language_code.to_string(),
            is_generated,
            translation_languages: Vec::new(),
            base_url: format!("mock://{}", language_code),
        }
    }

    /// Answer a fetch for exactly this language list
    pub fn with_fetch(mut self, languages: &[&str], entries: Vec<CaptionEntry>) -> Self {
        let languages: Vec<String> = languages.iter().map(|l| l.to_string()).collect();
        self.fetch_answers.insert(language_key(&languages), entries);
        self
    }

    /// Provide the track listing
    pub fn with_tracks(mut self, tracks: TrackList) -> Self {
        self.tracks = Some(tracks);
        self
    }

    /// Provide the original content of a listed track
    pub fn with_track_content(mut self, language_code: &str, entries: Vec<CaptionEntry>) -> Self {
        self.track_contents.insert(language_code.to_string(), entries);
        self
    }

    /// Make a track translatable into `target`
    pub fn with_translation(mut self, language_code: &str, target: &str, entries: Vec<CaptionEntry>) -> Self {
        self.translations.insert((language_code.to_string(), target.to_string()), entries);
        self
    }

    /// Make the listing fail with a request error
    pub fn failing_listing(mut self, message: &str) -> Self {
        self.listing_error = Some(message.to_string());
        self
    }

    /// Number of language-list fetches
    pub fn fetch_calls(&self) -> usize {
        self.calls.fetch_calls.load(Ordering::SeqCst)
    }

    /// Language lists passed to `fetch`, in call order
    pub fn fetch_languages(&self) -> Vec<Vec<String>> {
        self.calls.fetch_languages.lock().clone()
    }

    /// Number of track listings
    pub fn list_calls(&self) -> usize {
        self.calls.list_calls.load(Ordering::SeqCst)
    }

    /// Number of single-track fetches
    pub fn fetch_track_calls(&self) -> usize {
        self.calls.fetch_track_calls.load(Ordering::SeqCst)
    }

    /// Translation attempts as (source code, target code)
    pub fn translate_requests(&self) -> Vec<(String, String)> {
        self.calls.translate_requests.lock().clone()
    }
}

#[async_trait]
impl TranscriptSource for MockTranscriptSource {
    async fn list_tracks(&self, video_id: &str) -> Result<TrackList, TranscriptError> {
        self.calls.list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.listing_error {
            return Err(TranscriptError::Request(message.clone()));
        }

        match &self.tracks {
            Some(tracks) => Ok(tracks.clone()),
            None => Err(TranscriptError::TranscriptsDisabled(video_id.to_string())),
        }
    }

    async fn fetch_track(
        &self,
        track: &TranscriptTrack,
        translate_to: Option<&str>,
    ) -> Result<Transcript, TranscriptError> {
        self.calls.fetch_track_calls.fetch_add(1, Ordering::SeqCst);

        let mut transcript = match translate_to {
            Some(target) => {
                self.calls.translate_requests
                    .lock()
                    .push((track.language_code.clone(), target.to_string()));
                let key = (track.language_code.clone(), target.to_string());
                let entries = self.translations.get(&key).cloned().ok_or_else(|| {
                    TranscriptError::NotTranslatable {
                        language_code: track.language_code.clone(),
                        target: target.to_string(),
                    }
                })?;
                let mut transcript = Transcript::new(entries).with_language(target);
                transcript.translated_from = Some(track.language_code.clone());
                transcript
            }
            None => {
                let entries = self.track_contents.get(&track.language_code).cloned().ok_or_else(|| {
                    TranscriptError::Request(format!("no content scripted for {}", track.language_code))
                })?;
                Transcript::new(entries).with_language(track.language_code.clone())
            }
        };

        transcript.is_generated = track.is_generated;
        Ok(transcript)
    }

    async fn fetch(&self, _video_id: &str, languages: &[String]) -> Result<Transcript, TranscriptError> {
        self.calls.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.calls.fetch_languages.lock().push(languages.to_vec());

        match self.fetch_answers.get(&language_key(languages)) {
            Some(entries) => {
                let mut transcript = Transcript::new(entries.clone());
                transcript.language_code = languages.first().cloned();
                Ok(transcript)
            }
            None => Err(TranscriptError::NoMatchingLanguage {
                languages: languages.join(", "),
            }),
        }
    }
}
