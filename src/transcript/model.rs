use serde::{Deserialize, Serialize};
use std::fmt;

// @module: Caption entries and transcripts

// @struct: Single timed caption line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    // @field: Caption text
    pub text: String,

    // @field: Start offset in seconds
    pub start: f64,

    // @field: Display duration in seconds
    pub duration: f64,
}

impl CaptionEntry {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End offset in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Format the start offset as `[MM:SS]`, hours folded into minutes
    pub fn format_start(&self) -> String {
        let total = self.start.max(0.0).floor() as u64;
        format!("[{:02}:{:02}]", total / 60, total % 60)
    }
}

impl fmt::Display for CaptionEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.format_start(), self.text)
    }
}

/// Ordered caption entries of one video plus where they came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    /// Entries in chronological order
    pub entries: Vec<CaptionEntry>,

    /// Language code of the delivered content, when known
    pub language_code: Option<String>,

    /// Whether the underlying track was auto-generated
    pub is_generated: bool,

    /// Set when the content is a machine translation of the track
    pub translated_from: Option<String>,
}

impl Transcript {
    /// Create a transcript with no track metadata
    pub fn new(entries: Vec<CaptionEntry>) -> Self {
        Self {
            entries,
            ..Default::default()
        }
    }

    /// Attach the language of the delivered content
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattened text: entry texts joined by single spaces, order preserved
    pub fn text(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Total covered time in seconds
    pub fn duration(&self) -> f64 {
        self.entries.iter().map(CaptionEntry::end).fold(0.0, f64::max)
    }

    /// Short description of the track origin for logs and headers
    pub fn origin(&self) -> String {
        let language = self.language_code.as_deref().unwrap_or("unknown");
        let mut origin = language.to_string();
        if let Some(source) = &self.translated_from {
            origin.push_str(&format!(" (translated from {})", source));
        }
        if self.is_generated {
            origin.push_str(", auto-generated");
        }
        origin
    }
}
