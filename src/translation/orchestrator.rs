/*!
 * Fallback translation orchestrator.
 *
 * Drives the translator through an ordered chain of model identifiers, one
 * attempt at a time, and stops at the first model that produces text.
 */

use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Outcome of one call to the translator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationAttempt {
    /// Model identifier used for the attempt
    pub model_id: String,
    /// Translated text; empty when the attempt failed
    pub translated_text: String,
}

impl TranslationAttempt {
    /// Attempt that produced no output
    pub fn failed(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            translated_text: String::new(),
        }
    }

    /// Whether the attempt produced output
    pub fn succeeded(&self) -> bool {
        !self.translated_text.is_empty()
    }
}

/// Sequential fallback over a model chain
#[derive(Debug, Clone)]
pub struct TranslationOrchestrator {
    translator: Arc<dyn Translator>,
    /// Deadline for a single attempt; `None` waits indefinitely
    attempt_timeout: Option<Duration>,
}

impl TranslationOrchestrator {
    /// Create an orchestrator without a per-attempt deadline
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator,
            attempt_timeout: None,
        }
    }

    /// Bound every attempt by a deadline
    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Try each model in order until one returns non-empty text
    ///
    /// Returns the first successful attempt, or the last (empty) attempt when
    /// every model fails. Errors and timeouts count as empty output. An empty
    /// chain yields an empty attempt with an empty model identifier.
    pub async fn translate(&self, text: &str, target_language: &str, model_chain: &[String]) -> TranslationAttempt {
        let mut last = TranslationAttempt::failed("");

        for model in model_chain {
            last = self.attempt(text, target_language, model).await;
            if last.succeeded() {
                return last;
            }
            warn!("Model {} produced no output, trying next in chain", model);
        }

        if model_chain.is_empty() {
            warn!("Translation requested with an empty model chain");
        }

        last
    }

    async fn attempt(&self, text: &str, target_language: &str, model: &str) -> TranslationAttempt {
        let start = Instant::now();
        let call = self.translator.translate(text, target_language, model);

        let result = match self.attempt_timeout {
            Some(deadline) => match tokio::time::timeout(deadline, call).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(deadline)),
            },
            None => call.await,
        };

        match result {
            Ok(translated) => {
                let translated = translated.trim().to_string();
                debug!(
                    "{} model {} answered in {:?} ({} chars)",
                    self.translator.name(),
                    model,
                    start.elapsed(),
                    translated.len()
                );
                if !translated.is_empty() {
                    info!("Translation produced by model {}", model);
                }
                TranslationAttempt {
                    model_id: model.to_string(),
                    translated_text: translated,
                }
            }
            Err(e) => {
                warn!("{} model {} failed: {}", self.translator.name(), model, e);
                TranslationAttempt::failed(model)
            }
        }
    }
}
