/*!
 * LLM post-processing of subtitle text.
 *
 * - `prompts`: transformation kinds, prompt variants and system prompts
 * - `transformer`: builds the chat request and dispatches it to a provider
 */

pub mod prompts;
pub mod transformer;

pub use prompts::{PromptVariant, TransformKind};
pub use transformer::{ContentTransformer, TransformOutcome};
