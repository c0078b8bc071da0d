/*!
 * Error types for the medtranslate application.
 *
 * This module contains custom error types for the different layers of the
 * translation pipeline, using the thiserror crate for ergonomic error definitions.
 */

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to a translation backend
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
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The attempt did not finish before its deadline
    #[error("Request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
}

/// Errors produced by the translation pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Every model in the fallback chain returned empty text
    #[error("No model in the fallback chain produced output (tried: {})", .models.join(", "))]
    TranslationExhausted {
        /// The model identifiers that were tried, in order
        models: Vec<String>,
    },

    /// Any other failure while running the pipeline
    #[error("Unexpected pipeline failure: {0}")]
    Unexpected(String),
}

/// Errors surfaced at the request boundary
///
/// The display strings of these variants are sent to callers, so they never
/// carry internal detail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// `text` or `targetLang` absent or empty
    #[error("Missing required fields")]
    MissingFields,

    /// Body could not be parsed as a JSON request
    #[error("Invalid request body")]
    InvalidBody,

    /// Target language outside the configured set
    #[error("Unsupported target language: {0}")]
    UnsupportedLanguage(String),

    /// Wrong transport verb
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// No model in the chain produced output
    #[error("No translation model produced output")]
    TranslationExhausted,

    /// Anything else; details stay in the logs
    #[error("Translation failed")]
    Internal,
}

impl ApiError {
    /// HTTP status code used to report this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingFields | Self::InvalidBody | Self::UnsupportedLanguage(_) => 400,
            Self::MethodNotAllowed => 405,
            Self::TranslationExhausted => 502,
            Self::Internal => 500,
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::TranslationExhausted { .. } => Self::TranslationExhausted,
            PipelineError::Unexpected(_) => Self::Internal,
        }
    }
}
