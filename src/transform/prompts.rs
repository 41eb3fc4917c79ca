/*!
 * Prompt templates for subtitle post-processing.
 *
 * Each transformation kind has a fixed role-play system prompt; the user
 * message is a fixed Korean instruction wrapping the subtitle text. Two
 * prompt variants exist: `Standard` and `KeepJargon`, which asks the model to
 * keep key concepts and jargon in English and relaxes the translator's
 * no-omission rule.
 */

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of transformation applied to subtitle text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Summarize,
    Organize,
    Translate,
}

impl TransformKind {
    /// All kinds in display order
    pub const ALL: [TransformKind; 3] = [Self::Summarize, Self::Organize, Self::Translate];

    /// Suffix used in export file names
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Organize => "organize",
            Self::Translate => "translate",
        }
    }

    /// Heading shown above a result
    pub fn title(&self) -> &'static str {
        match self {
            Self::Summarize => "AI 요약본",
            Self::Organize => "AI 정리본",
            Self::Translate => "AI 번역본",
        }
    }

    /// Single-letter shortcut in the interactive session
    pub fn shortcut(&self) -> char {
        match self {
            Self::Summarize => 's',
            Self::Organize => 'o',
            Self::Translate => 't',
        }
    }

    /// System prompt for this kind under a variant
    pub fn system_prompt(&self, variant: PromptVariant) -> String {
        match self {
            Self::Organize => ORGANIZER_PROMPT.to_string(),
            Self::Summarize => SUMMARIZER_PROMPT.to_string(),
            Self::Translate => match variant {
                PromptVariant::Standard => format!("{}\n{}", TRANSLATOR_PROMPT, TRANSLATOR_NO_OMISSION),
                PromptVariant::KeepJargon => TRANSLATOR_PROMPT.to_string(),
            },
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_suffix())
    }
}

impl FromStr for TransformKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "summarize" | "s" => Ok(Self::Summarize),
            "organize" | "o" => Ok(Self::Organize),
            "translate" | "t" => Ok(Self::Translate),
            _ => Err(anyhow!("Invalid transformation kind: {}", s)),
        }
    }
}

/// User-instruction variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptVariant {
    #[default]
    Standard,
    KeepJargon,
}

impl PromptVariant {
    /// Korean instruction that precedes the subtitle text
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Standard => "다음 내용을 한국어로 정리해주세요:",
            Self::KeepJargon => "다음 내용을 한국어로 정리해주세요. 주요 개념 및 Jargon은 영어 표현을 사용해주세요.:",
        }
    }

    /// Full user message for a subtitle text
    pub fn user_message(&self, text: &str) -> String {
        format!("{}\n\n{}", self.instruction(), text)
    }
}

pub const ORGANIZER_PROMPT: &str = "Act as a professional content organizer.
Given YouTube subtitles, first identify the main topic and key points.
Then, organize the content according to the topic and key points without omitting any details.
Ensure the content is well-organized and aligns with the main topic.";

pub const SUMMARIZER_PROMPT: &str = "Act as a professional content summarizer.
Given YouTube subtitles, first identify the main topic and key points.
Then, summarize the content according to the topic and key points without omitting key points.
Ensure the summary is well-organized and aligns with the main topic.";

pub const TRANSLATOR_PROMPT: &str = "Act as a professional content translater.
Your role is to arrange the information to enhance Readability.";

const TRANSLATOR_NO_OMISSION: &str = "DO NOT OMIT ANY DETAILS OR WORDS";
