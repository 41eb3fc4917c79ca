use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::ConfigError;
use crate::language_utils;
use crate::transcript::resolver::ResolverOptions;
use crate::transform::prompts::PromptVariant;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// User-instruction variant for transformations
    #[serde(default)]
    pub prompt_variant: PromptVariant,

    /// Subtitle track language preferences
    #[serde(default)]
    pub resolver: ResolverOptions,

    /// Directory export files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Timeout for subtitle page and caption requests
    #[serde(default = "default_transcript_timeout_secs")]
    pub transcript_timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// LLM provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: Anthropic
    Anthropic,
    // @provider: LM Studio (OpenAI-compatible local server)
    LMStudio,
}

impl LlmProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::LMStudio => "LM Studio",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::LMStudio => "lmstudio".to_string(),
        }
    }

    // @returns: Environment variable holding the API key, if the provider needs one
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::LMStudio => None,
        }
    }
}

// Implement Display trait for LlmProvider
impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for LlmProvider
impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "lmstudio" => Ok(Self::LMStudio),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: LlmProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(provider_type),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// LLM service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: LlmProvider,

    /// Available providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Optional cap on generated tokens
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_transcript_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_endpoint(provider: LlmProvider) -> String {
    match provider {
        LlmProvider::OpenAI => "https://api.openai.com/v1".to_string(),
        LlmProvider::Anthropic => "https://api.anthropic.com".to_string(),
        // LM Studio default server (OpenAI compatible) runs on port 1234 under /v1
        LlmProvider::LMStudio => "http://localhost:1234/v1".to_string(),
    }
}

fn default_model(provider: LlmProvider) -> String {
    match provider {
        LlmProvider::OpenAI => "gpt-4o-mini".to_string(),
        LlmProvider::Anthropic => "claude-3-haiku-20240307".to_string(),
        // Placeholder; users should set to the loaded model name in LM Studio
        LlmProvider::LMStudio => "local-model".to_string(),
    }
}

impl Config {
    /// Load configuration from a JSON file, writing defaults when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;
        Ok(config)
    }

    /// Fill empty API keys from the environment through `lookup`.
    /// The active provider always gets an entry so its key has somewhere to land.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.llm.active_provider_config_mut();

        for provider_config in self.llm.available_providers.iter_mut() {
            if !provider_config.api_key.is_empty() {
                continue;
            }
            let env_var = provider_config.provider_type
                .parse::<LlmProvider>()
                .ok()
                .and_then(|p| p.api_key_env_var());
            if let Some(value) = env_var.and_then(&lookup) {
                provider_config.api_key = value;
            }
        }
    }

    /// Validate the configuration for consistency and required values.
    /// Credentials are checked when the LLM client is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let options = &self.resolver;
        if options.primary_languages.is_empty() || options.fallback_languages.is_empty() {
            return Err(ConfigError::Invalid("resolver language lists must not be empty".to_string()));
        }
        for code in options.primary_languages.iter()
            .chain(options.fallback_languages.iter())
            .chain(std::iter::once(&options.translation_language))
        {
            language_utils::validate_language_code(code)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        if self.transcript_timeout_secs == 0 {
            return Err(ConfigError::Invalid("transcript_timeout_secs must be greater than 0".to_string()));
        }
        if let Some(provider_config) = self.llm.get_active_provider_config() {
            if provider_config.timeout_secs == 0 {
                return Err(ConfigError::Invalid(format!(
                    "timeout_secs for provider '{}' must be greater than 0",
                    provider_config.provider_type
                )));
            }
        }

        if self.llm.get_model().trim().is_empty() {
            return Err(ConfigError::Invalid("model name must not be empty".to_string()));
        }

        let endpoint = self.llm.get_endpoint();
        Url::parse(&endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            llm: LlmConfig::default(),
            prompt_variant: PromptVariant::default(),
            resolver: ResolverOptions::default(),
            output_dir: default_output_dir(),
            transcript_timeout_secs: default_transcript_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }
}

impl LlmConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &LlmProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Entry of the active provider, added with defaults when the file omits it
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let index = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(self.provider));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Override the model of the active provider, adding an entry if needed
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.active_provider_config_mut().model = model.into();
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }
        default_model(self.provider)
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }
        default_endpoint(self.provider)
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|t| *t > 0)
            .unwrap_or_else(default_timeout_secs)
    }

    /// Fail when the active provider needs a key and has none
    pub fn require_api_key(&self) -> Result<(), ConfigError> {
        match self.provider.api_key_env_var() {
            Some(env_var) if self.get_api_key().trim().is_empty() => Err(ConfigError::MissingApiKey {
                provider: self.provider.display_name().to_string(),
                env_var: env_var.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            available_providers: vec![
                ProviderConfig::new(LlmProvider::OpenAI),
                ProviderConfig::new(LlmProvider::Anthropic),
                ProviderConfig::new(LlmProvider::LMStudio),
            ],
            max_tokens: None,
        }
    }
}
