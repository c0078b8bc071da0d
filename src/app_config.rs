use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::language_utils::validate_language_code;
use crate::providers::groq::{DEFAULT_ENDPOINT, default_system_prompt};
use crate::validation::ValidationConfig;
use crate::validation::units::UnitCheck;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Translation backend settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Glossary source
    #[serde(default)]
    pub glossary: GlossaryConfig,

    /// Validator vocabulary and unit check
    #[serde(default)]
    pub validation: ValidationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Target languages accepted by the request handler
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key; empty means it is read from the environment
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Models tried in order until one produces output
    #[serde(default = "default_model_chain")]
    pub model_chain: Vec<String>,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion token limit per attempt
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Deadline for a single model attempt in seconds; 0 disables it
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,

    /// System prompt template for translation
    /// Placeholder: {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model_chain: default_model_chain(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl TranslationConfig {
    /// Per-attempt deadline, `None` when disabled
    pub fn attempt_timeout(&self) -> Option<std::time::Duration> {
        match self.attempt_timeout_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }

    /// Get the API key, falling back to the environment
    pub fn resolve_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var(API_KEY_ENV).unwrap_or_default()
    }
}

/// Glossary source configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlossaryConfig {
    /// JSON glossary file; the built-in glossary is used when absent
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Language whose entry lists every recognizable term
    #[serde(default = "default_base_language")]
    pub base_language: String,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            path: None,
            base_language: default_base_language(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
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

impl LogLevel {
    /// Matching `log` level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model_chain() -> Vec<String> {
    vec!["llama3-70b-8192".to_string(), "mixtral-8x7b-32768".to_string()]
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_attempt_timeout_secs() -> u64 {
    30
}

fn default_base_language() -> String {
    crate::glossary::DEFAULT_BASE_LANGUAGE.to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_supported_languages() -> Vec<String> {
    vec!["en".to_string(), "es".to_string(), "fr".to_string()]
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Load the file, or write and return the default configuration when missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.translation.model_chain.is_empty() {
            return Err(anyhow!("The model chain must name at least one model"));
        }
        if self.translation.model_chain.iter().any(|m| m.trim().is_empty()) {
            return Err(anyhow!("The model chain contains a blank model identifier"));
        }

        if self.translation.endpoint.trim().is_empty() {
            return Err(anyhow!("Translation endpoint must not be empty"));
        }
        url::Url::parse(&self.translation.endpoint)
            .with_context(|| format!("Invalid translation endpoint: {}", self.translation.endpoint))?;

        if self.supported_languages.is_empty() {
            return Err(anyhow!("At least one supported language is required"));
        }
        for language in &self.supported_languages {
            validate_language_code(language)?;
        }
        validate_language_code(&self.glossary.base_language)?;

        UnitCheck::new(&self.validation.unit_pattern, self.validation.allowed_units.as_slice())
            .with_context(|| format!("Invalid unit pattern: {}", self.validation.unit_pattern))?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            translation: TranslationConfig::default(),
            glossary: GlossaryConfig::default(),
            validation: ValidationConfig::default(),
            server: ServerConfig::default(),
            supported_languages: default_supported_languages(),
            log_level: LogLevel::default(),
        }
    }
}
