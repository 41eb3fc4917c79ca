/*!
 * HTTP transcript source for YouTube.
 *
 * Track metadata comes from the `ytInitialPlayerResponse` object embedded in
 * the watch page; caption payloads come from each track's timedtext URL in
 * the legacy XML format (`<text start=".." dur="..">..</text>`). Translation
 * is requested through the `tlang` query parameter.
 */

use async_trait::async_trait;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::errors::TranscriptError;
use crate::transcript::model::{CaptionEntry, Transcript};
use crate::transcript::source::{TrackList, TranscriptSource, TranscriptTrack};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const PLAYER_RESPONSE_MARKER: &str = "ytInitialPlayerResponse = ";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

// @const: Timedtext XML caption element; self-closing elements carry no body
static TEXT_ELEMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<text\s+([^>]*?)(?:/>|>(.*?)</text>)"#).unwrap()
});

static START_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"start="([^"]*)""#).unwrap()
});

static DUR_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"dur="([^"]*)""#).unwrap()
});

static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").unwrap()
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionsRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrackJson>,
    #[serde(default)]
    translation_languages: Vec<TranslationLanguageJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrackJson {
    base_url: String,
    #[serde(default)]
    name: Option<TextJson>,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    is_translatable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationLanguageJson {
    language_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextJson {
    #[serde(default)]
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<RunJson>,
}

#[derive(Debug, Deserialize)]
struct RunJson {
    text: String,
}

impl TextJson {
    fn into_string(self) -> String {
        match self.simple_text {
            Some(text) => text,
            None => self.runs.into_iter().map(|r| r.text).collect(),
        }
    }
}

/// YouTube transcript client
#[derive(Debug, Clone)]
pub struct YouTubeTranscripts {
    /// HTTP client for page and caption requests
    client: Client,
}

impl Default for YouTubeTranscripts {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl YouTubeTranscripts {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_static("en-US,en;q=0.9"));

        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .default_headers(headers)
                .build()
                .unwrap_or_default(),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, TranscriptError> {
        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| TranscriptError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptError::Request(format!("HTTP {} for {}", status, url)));
        }

        response.text()
            .await
            .map_err(|e| TranscriptError::Request(e.to_string()))
    }
}

#[async_trait]
impl TranscriptSource for YouTubeTranscripts {
    async fn list_tracks(&self, video_id: &str) -> Result<TrackList, TranscriptError> {
        let url = format!("{}{}", WATCH_URL, video_id);
        debug!("Fetching watch page for {}", video_id);
        let html = self.get_text(&url).await?;
        parse_track_list(video_id, &html)
    }

    async fn fetch_track(
        &self,
        track: &TranscriptTrack,
        translate_to: Option<&str>,
    ) -> Result<Transcript, TranscriptError> {
        if let Some(target) = translate_to {
            if !track.can_translate_to(target) {
                return Err(TranscriptError::NotTranslatable {
                    language_code: track.language_code.clone(),
                    target: target.to_string(),
                });
            }
        }

        let url = caption_url(&track.base_url, translate_to);
        debug!("Fetching captions for {} from {}", track.label(), url);
        let xml = self.get_text(&url).await?;
        let entries = parse_timedtext_xml(&xml)?;

        let mut transcript = Transcript::new(entries);
        transcript.is_generated = track.is_generated;
        match translate_to {
            Some(target) => {
                transcript.language_code = Some(target.to_string());
                transcript.translated_from = Some(track.language_code.clone());
            }
            None => transcript.language_code = Some(track.language_code.clone()),
        }
        Ok(transcript)
    }
}

/// Build the caption URL, dropping any format override and adding `tlang`
fn caption_url(base_url: &str, translate_to: Option<&str>) -> String {
    let mut url = base_url.replace("&fmt=srv3", "");
    if let Some(target) = translate_to {
        url.push_str("&tlang=");
        url.push_str(target);
    }
    url
}

/// Extract the player response JSON object embedded in a watch page
pub fn extract_player_response(html: &str) -> Result<Value, TranscriptError> {
    let start = html.find(PLAYER_RESPONSE_MARKER)
        .ok_or_else(|| TranscriptError::Parse("player response not found in watch page".to_string()))?;
    let rest = &html[start + PLAYER_RESPONSE_MARKER.len()..];

    // The object is followed by arbitrary script text; read exactly one value.
    let mut values = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
    match values.next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(TranscriptError::Parse(format!("invalid player response: {}", e))),
        None => Err(TranscriptError::Parse("empty player response".to_string())),
    }
}

/// Parse the track list of a video from its watch page
pub fn parse_track_list(video_id: &str, html: &str) -> Result<TrackList, TranscriptError> {
    let player = extract_player_response(html)?;

    let renderer = match player.pointer("/captions/playerCaptionsTracklistRenderer") {
        Some(renderer) => renderer.clone(),
        None => {
            warn!("No captions section for video {}", video_id);
            return Err(TranscriptError::TranscriptsDisabled(video_id.to_string()));
        }
    };

    let renderer: CaptionsRenderer = serde_json::from_value(renderer)
        .map_err(|e| TranscriptError::Parse(format!("unexpected caption track layout: {}", e)))?;

    let translation_languages: Vec<String> = renderer.translation_languages
        .into_iter()
        .map(|l| l.language_code)
        .collect();

    let mut list = TrackList::new(video_id);
    for track in renderer.caption_tracks {
        let language = track.name
            .map(TextJson::into_string)
            .unwrap_or_else(|| track.language_code.clone());
        list.push(TranscriptTrack {
            video_id: video_id.to_string(),
            language,
            language_code: track.language_code,
            is_generated: track.kind.as_deref() == Some("asr"),
            translation_languages: if track.is_translatable {
                translation_languages.clone()
            } else {
                Vec::new()
            },
            base_url: track.base_url,
        });
    }

    if list.is_empty() {
        return Err(TranscriptError::TranscriptsDisabled(video_id.to_string()));
    }

    debug!(
        "Video {} offers {} manual and {} generated track(s)",
        video_id,
        list.manually_created.len(),
        list.generated.len()
    );
    Ok(list)
}

/// Parse a timedtext XML payload into caption entries.
///
/// Entities are decoded twice since caption text is itself HTML-escaped
/// inside the XML; any remaining inline markup is stripped.
pub fn parse_timedtext_xml(xml: &str) -> Result<Vec<CaptionEntry>, TranscriptError> {
    if !xml.contains("<transcript") && !xml.contains("<text") {
        if xml.trim().is_empty() {
            return Ok(Vec::new());
        }
        return Err(TranscriptError::Parse("caption payload is not timedtext XML".to_string()));
    }

    let mut entries = Vec::new();
    for cap in TEXT_ELEMENT_REGEX.captures_iter(xml) {
        let Some(body) = cap.get(2) else {
            continue;
        };
        let attributes = &cap[1];
        let start = parse_seconds_attr(&START_ATTR_REGEX, attributes)?
            .ok_or_else(|| TranscriptError::Parse("caption element without start".to_string()))?;
        let duration = parse_seconds_attr(&DUR_ATTR_REGEX, attributes)?.unwrap_or(0.0);

        let once = html_escape::decode_html_entities(body.as_str());
        let twice = html_escape::decode_html_entities(&once);
        let text = MARKUP_REGEX.replace_all(&twice, "").trim().to_string();
        if text.is_empty() {
            continue;
        }

        entries.push(CaptionEntry::new(text, start, duration));
    }

    Ok(entries)
}

fn parse_seconds_attr(regex: &Regex, attributes: &str) -> Result<Option<f64>, TranscriptError> {
    match regex.captures(attributes) {
        Some(cap) => cap[1]
            .parse::<f64>()
            .map(Some)
            .map_err(|e| TranscriptError::Parse(format!("invalid time '{}': {}", &cap[1], e))),
        None => Ok(None),
    }
}
