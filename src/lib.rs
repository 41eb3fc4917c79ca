/*!
 * # ytsubai - YouTube subtitles with AI summaries
 *
 * A Rust library for fetching YouTube subtitles and post-processing them with
 * LLMs into Korean summaries, organized notes and translations.
 *
 * ## Features
 *
 * - Video id extraction from watch URLs
 * - Subtitle resolution through a language fallback chain:
 *   - primary languages (`ko`, `en`)
 *   - locale-qualified languages (`ko-KR`, `en-US`, `en`)
 *   - first available track, machine-translated to Korean when offered
 * - Transformations using various AI providers:
 *   - OpenAI API
 *   - Anthropic API
 *   - LM Studio (OpenAI-compatible local server)
 * - TXT, CSV and Markdown export
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `transcript`: Subtitle retrieval:
 *   - `transcript::video_id`: Video id extraction
 *   - `transcript::source`: Transcript source boundary and track lists
 *   - `transcript::youtube`: YouTube HTTP client
 *   - `transcript::resolver`: Fallback chain
 * - `transform`: Prompt templates and the content transformer
 * - `providers`: Client implementations for various LLM providers:
 *   - `providers::openai`: OpenAI API client
 *   - `providers::anthropic`: Anthropic API client
 * - `export`: TXT, CSV and Markdown export
 * - `session`: Interactive session state
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod export;
pub mod session;
pub mod transcript;
pub mod transform;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use transcript::{extract_video_id, CaptionEntry, SubtitleResolver, Transcript, TranscriptSource};
pub use transform::{ContentTransformer, PromptVariant, TransformKind, TransformOutcome};
pub use language_utils::{get_language_name, validate_language_code};
pub use errors::{AppError, ConfigError, GenerationError, ProviderError, ResolveError, TranscriptError};
