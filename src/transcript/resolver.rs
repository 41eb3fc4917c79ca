/*!
 * Subtitle resolver.
 *
 * Resolves a video URL to the best transcript a source can deliver by walking
 * an ordered fallback chain; the first tier that succeeds wins:
 * 1. fetch for the primary language list (`ko`, `en`)
 * 2. fetch for the locale-qualified list (`ko-KR`, `en-US`, `en`)
 * 3. list every track, take the first manual track (else the first generated
 *    one) and prefer its translation into the target language over its
 *    original content
 */

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{ResolveError, TranscriptError};
use crate::transcript::model::Transcript;
use crate::transcript::source::{TrackList, TranscriptSource};
use crate::transcript::video_id::VideoReference;

/// Language preferences for each fallback tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// Languages tried by the first tier
    #[serde(default = "default_primary_languages")]
    pub primary_languages: Vec<String>,

    /// Languages tried by the second tier
    #[serde(default = "default_fallback_languages")]
    pub fallback_languages: Vec<String>,

    /// Translation target used by the track listing tier
    #[serde(default = "default_translation_language")]
    pub translation_language: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            primary_languages: default_primary_languages(),
            fallback_languages: default_fallback_languages(),
            translation_language: default_translation_language(),
        }
    }
}

fn default_primary_languages() -> Vec<String> {
    vec!["ko".to_string(), "en".to_string()]
}

fn default_fallback_languages() -> Vec<String> {
    vec!["ko-KR".to_string(), "en-US".to_string(), "en".to_string()]
}

fn default_translation_language() -> String {
    "ko".to_string()
}

/// Resolves video URLs to transcripts through a `TranscriptSource`
#[derive(Debug)]
pub struct SubtitleResolver<S: TranscriptSource> {
    source: S,
    options: ResolverOptions,
}

impl<S: TranscriptSource> SubtitleResolver<S> {
    /// Create a resolver with the default language preferences
    pub fn new(source: S) -> Self {
        Self::with_options(source, ResolverOptions::default())
    }

    pub fn with_options(source: S, options: ResolverOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve a video URL to its best available transcript
    ///
    /// # Returns
    /// * `Result<Transcript, ResolveError>` - `MalformedUrl` without touching the
    ///   source when the URL has no id, `TranscriptUnavailable` with the last
    ///   cause when every tier fails
    pub async fn resolve(&self, url: &str) -> Result<Transcript, ResolveError> {
        let reference = VideoReference::parse(url)?;
        self.resolve_id(reference.video_id()).await
    }

    /// Resolve an already extracted video id
    pub async fn resolve_id(&self, video_id: &str) -> Result<Transcript, ResolveError> {
        let tiers = [&self.options.primary_languages, &self.options.fallback_languages];
        for (tier, languages) in tiers.iter().enumerate() {
            debug!("Tier {}: fetching {} for [{}]", tier + 1, video_id, languages.join(", "));
            match self.source.fetch(video_id, languages).await {
                Ok(transcript) => {
                    info!("Resolved {} on tier {} ({} entries)", video_id, tier + 1, transcript.len());
                    return Ok(transcript);
                }
                Err(e) => debug!("Tier {} failed for {}: {}", tier + 1, video_id, e),
            }
        }

        debug!("Tier 3: listing all tracks of {}", video_id);
        self.from_track_listing(video_id)
            .await
            .map_err(|source| {
                warn!("No usable subtitles for {}: {}", video_id, source);
                ResolveError::TranscriptUnavailable {
                    video_id: video_id.to_string(),
                    source,
                }
            })
    }

    /// List the tracks of the video behind a URL
    pub async fn list_tracks(&self, url: &str) -> Result<TrackList, ResolveError> {
        let reference = VideoReference::parse(url)?;
        self.source
            .list_tracks(reference.video_id())
            .await
            .map_err(|source| ResolveError::TranscriptUnavailable {
                video_id: reference.video_id().to_string(),
                source,
            })
    }

    async fn from_track_listing(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        let tracks = self.source.list_tracks(video_id).await?;

        // Provider order decides between several manual (or generated) tracks.
        let track = tracks
            .first_available()
            .ok_or_else(|| TranscriptError::TranscriptsDisabled(video_id.to_string()))?;
        info!("Falling back to first available track: {}", track.label());

        let target = self.options.translation_language.as_str();
        if track.language_code == target {
            return self.source.fetch_track(track, None).await;
        }

        match self.source.fetch_track(track, Some(target)).await {
            Ok(transcript) => Ok(transcript),
            Err(e) => {
                info!("Translation to {} unavailable ({}), using original {}", target, e, track.language_code);
                self.source.fetch_track(track, None).await
            }
        }
    }
}
