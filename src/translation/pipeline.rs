/*!
 * End-to-end translation pipeline for one utterance.
 *
 * Stages run strictly in order:
 * sanitize -> pre-process -> fallback translation -> post-process -> validate.
 * Every piece of shared state is immutable, so one pipeline serves any number
 * of concurrent requests.
 */

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::app_config::Config;
use crate::errors::PipelineError;
use crate::glossary::GlossaryIndex;
use crate::language_utils::language_label;
use crate::providers::Translator;
use crate::sanitizer::sanitize;
use crate::validation::Validator;

use super::orchestrator::TranslationOrchestrator;
use super::placeholders::PlaceholderEngine;

/// Final result of a translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Translation with glossary terms restored
    pub translated_text: String,
    /// Advisory validation warnings, possibly empty
    pub warnings: Vec<String>,
    /// Model that produced the translation
    pub model_used: String,
}

/// Sanitize, substitute, translate, restore and validate
#[derive(Debug, Clone)]
pub struct TranslationPipeline {
    placeholders: PlaceholderEngine,
    orchestrator: TranslationOrchestrator,
    validator: Validator,
    model_chain: Vec<String>,
}

impl TranslationPipeline {
    /// Create a pipeline with the default validator and no attempt deadline
    pub fn new(glossary: Arc<GlossaryIndex>, translator: Arc<dyn Translator>, model_chain: Vec<String>) -> Result<Self> {
        if model_chain.is_empty() {
            return Err(anyhow!("The model chain must name at least one model"));
        }

        let placeholders =
            PlaceholderEngine::new(glossary.clone()).context("Failed to compile glossary term matcher")?;

        Ok(Self {
            placeholders,
            orchestrator: TranslationOrchestrator::new(translator),
            validator: Validator::new(glossary),
            model_chain,
        })
    }

    /// Create a pipeline from the application configuration
    pub fn from_config(config: &Config, glossary: Arc<GlossaryIndex>, translator: Arc<dyn Translator>) -> Result<Self> {
        let validator = Validator::from_config(&config.validation, glossary.clone())?;

        Ok(Self::new(glossary, translator, config.translation.model_chain.clone())?
            .with_validator(validator)
            .with_attempt_timeout(config.translation.attempt_timeout()))
    }

    /// Replace the validator
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Bound every model attempt by a deadline
    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.orchestrator = self.orchestrator.with_attempt_timeout(timeout);
        self
    }

    /// Models tried for every request, in order
    pub fn model_chain(&self) -> &[String] {
        &self.model_chain
    }

    /// The glossary shared by every stage
    pub fn glossary(&self) -> &GlossaryIndex {
        self.placeholders.glossary()
    }

    /// Translate one utterance
    ///
    /// Fails only when no model in the chain produced output.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<TranslationResult, PipelineError> {
        let request_id = Uuid::new_v4();
        let start = Instant::now();

        let sanitized = sanitize(text);
        let pre = self.placeholders.pre_process(&sanitized);
        debug!(
            "[{}] Pre-processed {} chars, {} glossary term(s) substituted",
            request_id,
            sanitized.len(),
            pre.mapping.len()
        );

        let label = language_label(target_language);
        let attempt = self.orchestrator.translate(&pre.text, &label, &self.model_chain).await;

        if !attempt.succeeded() {
            warn!(
                "[{}] No model produced output for target {} after {:?}",
                request_id,
                target_language,
                start.elapsed()
            );
            return Err(PipelineError::TranslationExhausted {
                models: self.model_chain.clone(),
            });
        }

        let restored = self
            .placeholders
            .post_process(&attempt.translated_text, &pre.mapping, target_language);

        let warnings: Vec<String> = self
            .validator
            .validate(&sanitized, &restored, target_language)
            .iter()
            .map(|warning| warning.to_string())
            .collect();

        info!(
            "[{}] Translated {} -> {} chars to {} with {} in {:?} ({} warning(s))",
            request_id,
            sanitized.len(),
            restored.len(),
            target_language,
            attempt.model_id,
            start.elapsed(),
            warnings.len()
        );

        Ok(TranslationResult {
            translated_text: restored,
            warnings,
            model_used: attempt.model_id,
        })
    }
}
