/*!
 * Transport-agnostic request handler.
 *
 * Implements the translation request contract on top of raw method and body
 * bytes, so the HTTP server and tests share exactly the same behaviour:
 *
 * - `POST {text, targetLang}` -> `200 {translatedText, warnings, modelUsed}`
 * - any other verb -> `405`
 * - absent or empty fields -> `400`, malformed body -> `400`
 * - target language outside the supported set -> `400`
 * - no model produced output -> `502`, anything else -> `500`
 *
 * Error bodies are `{error: <message>}` and never carry internal detail.
 */

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::{ApiError, PipelineError};
use crate::language_utils::language_codes_match;
use crate::translation::TranslationPipeline;

/// Incoming request body
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

/// Status code and JSON body to send back
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    /// Successful reply
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Error reply with the public message of `error`
    pub fn error(error: &ApiError) -> Self {
        Self {
            status: error.status_code(),
            body: serde_json::json!({ "error": error.to_string() }),
        }
    }
}

/// State shared by every request
#[derive(Debug)]
pub struct AppState {
    pub pipeline: Arc<TranslationPipeline>,
    /// Target languages accepted by the handler
    pub supported_languages: Vec<String>,
}

impl AppState {
    pub fn new(pipeline: Arc<TranslationPipeline>, supported_languages: Vec<String>) -> Self {
        Self {
            pipeline,
            supported_languages,
        }
    }

    /// State for a pipeline built from `config`
    pub fn from_config(config: &Config, pipeline: Arc<TranslationPipeline>) -> Self {
        Self::new(pipeline, config.supported_languages.clone())
    }

    /// Whether `target` names one of the supported languages
    ///
    /// Locale tags such as `fr-FR` match their primary language.
    pub fn supports(&self, target: &str) -> bool {
        self.supported_languages
            .iter()
            .any(|supported| language_codes_match(supported, target))
    }
}

/// Validated request fields
struct ValidRequest {
    text: String,
    target_lang: String,
}

fn parse_request(state: &AppState, method: &str, body: &[u8]) -> Result<ValidRequest, ApiError> {
    if !method.eq_ignore_ascii_case("POST") {
        return Err(ApiError::MethodNotAllowed);
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::MissingFields);
    }

    let request: TranslateRequest = serde_json::from_slice(body).map_err(|e| {
        debug!("Rejecting malformed request body: {}", e);
        ApiError::InvalidBody
    })?;

    let text = request.text.filter(|t| !t.trim().is_empty());
    let target_lang = request
        .target_lang
        .map(|lang| lang.trim().to_string())
        .filter(|lang| !lang.is_empty());

    let (Some(text), Some(target_lang)) = (text, target_lang) else {
        return Err(ApiError::MissingFields);
    };

    if !state.supports(&target_lang) {
        return Err(ApiError::UnsupportedLanguage(target_lang));
    }

    Ok(ValidRequest { text, target_lang })
}

/// Handle one translation request
pub async fn handle(state: Arc<AppState>, method: &str, body: &[u8]) -> ApiReply {
    let request = match parse_request(&state, method, body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected translation request: {}", e);
            return ApiReply::error(&e);
        }
    };

    // A panic inside the pipeline comes back as a JoinError.
    let pipeline = state.pipeline.clone();
    let task = tokio::spawn(async move { pipeline.translate(&request.text, &request.target_lang).await });

    match task.await {
        Ok(Ok(result)) => match serde_json::to_value(&result) {
            Ok(body) => ApiReply::ok(body),
            Err(e) => {
                error!("Failed to serialize translation result: {}", e);
                ApiReply::error(&ApiError::Internal)
            }
        },
        Ok(Err(e)) => {
            error!("Translation failed: {}", e);
            ApiReply::error(&ApiError::from(e))
        }
        Err(e) => {
            let e = PipelineError::Unexpected(format!("translation task aborted: {}", e));
            error!("Translation failed: {}", e);
            ApiReply::error(&ApiError::from(e))
        }
    }
}
