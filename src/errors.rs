/*!
 * Error types for the ytsubai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions. Every fallible
 * component returns one of these tagged errors; turning them into the text a
 * user sees is left to the display layer (`user_message`).
 */

use thiserror::Error;

/// Errors that can occur when working with LLM provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Map a non-success HTTP status and its body to the matching variant
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

/// Errors raised by a transcript source for a single operation
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// No track matches any of the requested languages
    #[error("No transcript found for languages [{languages}]")]
    NoMatchingLanguage {
        /// Requested language codes, comma separated
        languages: String,
    },

    /// The video exposes no subtitle tracks at all
    #[error("Subtitles are disabled or unavailable for video {0}")]
    TranscriptsDisabled(String),

    /// The track cannot be translated to the requested language
    #[error("Track '{language_code}' cannot be translated to '{target}'")]
    NotTranslatable {
        /// Language code of the source track
        language_code: String,
        /// Requested translation language
        target: String,
    },

    /// Network failure while talking to the video site
    #[error("Request failed: {0}")]
    Request(String),

    /// The video page or caption payload could not be understood
    #[error("Failed to parse transcript data: {0}")]
    Parse(String),
}

/// Errors returned by the subtitle resolver
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The URL has no `v=` marker or an empty identifier
    #[error("Malformed video URL (no video id found): {0}")]
    MalformedUrl(String),

    /// Every fallback tier failed
    #[error("No subtitles available for video {video_id}: {source}")]
    TranscriptUnavailable {
        /// Video identifier that was resolved
        video_id: String,
        /// Last underlying failure
        #[source]
        source: TranscriptError,
    },
}

impl ResolveError {
    /// Human-readable rendering shown in place of subtitle content
    pub fn user_message(&self) -> String {
        format!("자막을 가져오는 중 오류가 발생했습니다: {}", self)
    }
}

/// Error returned when the text-generation call fails
#[derive(Error, Debug)]
#[error("Generation failed for '{kind}': {source}")]
pub struct GenerationError {
    /// Transformation kind that was requested
    pub kind: String,
    /// Underlying provider failure
    #[source]
    pub source: ProviderError,
}

impl GenerationError {
    /// Human-readable rendering shown in place of generated content
    pub fn user_message(&self) -> String {
        format!("요약 중 오류가 발생했습니다: {}", self.source)
    }
}

/// Configuration problems detected before any provider call
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A provider that needs a credential has none
    #[error("Missing API key for {provider}: set {env_var} or add it to the config file")]
    MissingApiKey {
        /// Provider display name
        provider: String,
        /// Environment variable consulted
        env_var: String,
    },

    /// An endpoint does not parse as a URL
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// Configured endpoint
        endpoint: String,
        /// Parser message
        reason: String,
    },

    /// Any other invalid setting
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle resolution
    #[error("Subtitle error: {0}")]
    Resolve(#[from] ResolveError),

    /// Error from a transformation
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
