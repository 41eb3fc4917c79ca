/*!
 * Subtitle retrieval for YouTube videos.
 *
 * - `video_id`: video identifier extraction from a URL
 * - `model`: caption entries and transcripts
 * - `source`: the transcript source boundary and its track model
 * - `youtube`: HTTP implementation of the boundary
 * - `mock`: scriptable source used by tests
 * - `resolver`: the best-effort track fallback chain
 */

pub mod video_id;
pub mod model;
pub mod source;
pub mod youtube;
pub mod mock;
pub mod resolver;

pub use video_id::{extract_video_id, VideoReference};
pub use model::{CaptionEntry, Transcript};
pub use source::{TrackList, TranscriptSource, TranscriptTrack};
pub use youtube::YouTubeTranscripts;
pub use resolver::{ResolverOptions, SubtitleResolver};
