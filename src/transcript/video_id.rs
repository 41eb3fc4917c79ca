use std::fmt;

use crate::errors::ResolveError;

// @module: Video identifier extraction

const ID_MARKER: &str = "v=";

/// Extract the video identifier from a watch URL.
///
/// The identifier is whatever follows the first `v=` up to the next `&`
/// (or the end of the string). Short links such as `youtu.be/<id>` carry no
/// `v=` marker and are rejected.
pub fn extract_video_id(url: &str) -> Result<String, ResolveError> {
    let (_, after_marker) = url
        .split_once(ID_MARKER)
        .ok_or_else(|| ResolveError::MalformedUrl(url.to_string()))?;

    let id = after_marker.split('&').next().unwrap_or_default();
    if id.is_empty() {
        return Err(ResolveError::MalformedUrl(url.to_string()));
    }

    Ok(id.to_string())
}

/// A user-supplied video URL together with its parsed identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    url: String,
    video_id: String,
}

impl VideoReference {
    /// Parse a URL, failing with `MalformedUrl` when no identifier is present
    pub fn parse(url: impl Into<String>) -> Result<Self, ResolveError> {
        let url = url.into();
        let trimmed = url.trim().to_string();
        let video_id = extract_video_id(&trimmed)?;
        Ok(Self { url: trimmed, video_id })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.video_id)
    }
}
