/*!
 * Provider implementations for LLM chat completion services.
 *
 * This module contains client implementations for the supported providers:
 * - OpenAI: OpenAI API integration (also used for OpenAI-compatible local servers)
 * - Anthropic: Anthropic API integration
 * - Mock: request-recording provider for tests
 *
 * Every client accepts the same provider-neutral `ChatRequest` and converts
 * it into its own wire format.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

use crate::app_config::{LlmConfig, LlmProvider};
use crate::errors::{ConfigError, ProviderError};

/// Role-tagged chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Provider-neutral chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Ordered conversation
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum number of generated tokens
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new request with zero temperature
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: 0.0,
            max_tokens: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum number of tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Generated text plus token accounting when the provider reports it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatCompletion {
    pub text: String,
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
}

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the content transformer.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a chat request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<ChatCompletion, ProviderError>` - The generated text or an error
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self, model: &str) -> Result<(), ProviderError>;
}

pub mod openai;
pub mod anthropic;
pub mod mock;

use anthropic::Anthropic;
use openai::OpenAI;

/// Configured provider, built once from validated configuration
#[derive(Debug)]
pub enum LlmClient {
    /// OpenAI API or an OpenAI-compatible server
    OpenAI(OpenAI),
    /// Anthropic API
    Anthropic(Anthropic),
}

impl LlmClient {
    /// Build the client for the active provider.
    ///
    /// Fails with `MissingApiKey` before any request is made when the
    /// provider needs a credential and none is configured.
    pub fn from_config(config: &LlmConfig) -> Result<Self, ConfigError> {
        config.require_api_key()?;

        let timeout = Duration::from_secs(config.get_timeout_secs());
        let api_key = config.get_api_key();
        let endpoint = config.get_endpoint();

        Ok(match config.provider {
            LlmProvider::OpenAI | LlmProvider::LMStudio => {
                Self::OpenAI(OpenAI::with_timeout(api_key, endpoint, timeout))
            }
            LlmProvider::Anthropic => Self::Anthropic(Anthropic::with_timeout(api_key, endpoint, timeout)),
        })
    }
}

#[async_trait]
impl Provider for LlmClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError> {
        match self {
            Self::OpenAI(client) => client.complete(request).await,
            Self::Anthropic(client) => client.complete(request).await,
        }
    }

    async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        match self {
            Self::OpenAI(client) => client.test_connection(model).await,
            Self::Anthropic(client) => client.test_connection(model).await,
        }
    }
}
