use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Default public endpoint of the Groq OpenAI-compatible API
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Placeholder in the system prompt template replaced by the language label
pub const TARGET_LANGUAGE_PLACEHOLDER: &str = "{target_language}";

/// Groq client for the chat completions API
#[derive(Debug)]
pub struct Groq {
    /// HTTP client for API requests
    client: Client,
    /// API key for bearer authentication
    api_key: String,
    /// Base API URL, without the `/chat/completions` suffix
    endpoint: String,
    /// Sampling temperature
    temperature: f32,
    /// Completion token limit
    max_tokens: u32,
    /// System prompt template containing `{target_language}`
    system_prompt: String,
}

/// Chat completions request
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Temperature for generation
    temperature: f32,

    /// Maximum number of tokens to generate
    max_tokens: u32,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    #[serde(default)]
    pub content: Option<String>,
}

/// Chat completions response
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; translation uses the first one
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// Individual completion choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatRequest {
    /// Create a new request for a model
    pub fn new(model: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature,
            max_tokens,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: Some(content.into()),
        });
        self
    }
}

impl ChatResponse {
    /// Trimmed content of the first choice, empty when there is none
    pub fn text(&self) -> String {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }
}

impl Groq {
    /// Create a new Groq client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            temperature: 0.1,
            max_tokens: 1024,
            system_prompt: default_system_prompt(),
        }
    }

    /// Create a client from the translation configuration
    pub fn from_config(config: &crate::app_config::TranslationConfig, api_key: impl Into<String>) -> Self {
        let mut client = Self::new(api_key, config.endpoint.clone());
        client.temperature = config.temperature;
        client.max_tokens = config.max_tokens;
        client.system_prompt = config.system_prompt.clone();
        client
    }

    /// Override the system prompt template
    pub fn system_prompt(mut self, template: impl Into<String>) -> Self {
        self.system_prompt = template.into();
        self
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.as_str()
        };
        format!("{}/chat/completions", base.trim_end_matches('/'))
    }

    /// Build the request sent for one translation attempt
    pub fn build_request(&self, text: &str, target_language: &str, model: &str) -> ChatRequest {
        let system = self
            .system_prompt
            .replace(TARGET_LANGUAGE_PLACEHOLDER, target_language);

        ChatRequest::new(model, self.temperature, self.max_tokens)
            .add_message("system", system)
            .add_message("user", text)
    }

    /// Send a chat completions request
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Groq API error ({})", status);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderError::AuthenticationError(error_text)
                }
                _ => ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message: error_text,
                },
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl Translator for Groq {
    async fn translate(&self, text: &str, target_language: &str, model: &str) -> Result<String, ProviderError> {
        let request = self.build_request(text, target_language, model);
        let response = self.complete(&request).await?;
        let translated = response.text();
        debug!("Groq model {} returned {} chars", model, translated.len());
        Ok(translated)
    }

    fn name(&self) -> &str {
        "groq"
    }
}

/// System prompt used when none is configured
pub fn default_system_prompt() -> String {
    "Translate medical text to {target_language} exactly. Preserve numbers, units, and medical terms. \
     Keep every token that starts with GLOSSARY_ exactly as written. \
     Only respond with the translation."
        .to_string()
}
