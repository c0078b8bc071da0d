/*!
 * Translation backends.
 *
 * This module contains the translator capability used by the pipeline and
 * its implementations:
 * - Groq: OpenAI-compatible chat completions API
 * - Mock: scripted translator for tests and benchmarks
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// Implementations perform exactly one round trip per call. Retrying and
/// falling back between models is the orchestrator's job.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate text with a specific model
    ///
    /// # Arguments
    /// * `text` - Sanitized, placeholder-substituted source text
    /// * `target_language` - Human-readable target language label
    /// * `model` - Model identifier to use for this attempt
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - Translated text (possibly empty) or an error
    async fn translate(&self, text: &str, target_language: &str, model: &str) -> Result<String, ProviderError>;

    /// Short backend name used in log lines
    fn name(&self) -> &str;
}

pub mod groq;
pub mod mock;
