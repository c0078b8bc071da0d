/*!
 * Translation of medical utterances.
 *
 * This module contains the glossary-aware translation flow. It is split into
 * several submodules:
 *
 * - `placeholders`: Glossary term substitution before and after translation
 * - `orchestrator`: Sequential fallback over a chain of models
 * - `pipeline`: The full sanitize/translate/restore/validate flow
 */

// Re-export main types for easier usage
pub use self::orchestrator::{TranslationAttempt, TranslationOrchestrator};
pub use self::pipeline::{TranslationPipeline, TranslationResult};
pub use self::placeholders::{PlaceholderEngine, PlaceholderMapping, PreProcessed};

// Submodules
pub mod orchestrator;
pub mod pipeline;
pub mod placeholders;
