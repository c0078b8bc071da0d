/*!
 * # medtranslate - Glossary-aware medical utterance translation
 *
 * A Rust library for translating short clinical utterances between languages
 * with a language model, without losing the medical meaning.
 *
 * ## Features
 *
 * - Redaction of patient identifiers before anything leaves the process
 * - Glossary terms protected by placeholders and restored with the
 *   target-language equivalent after translation
 * - Ordered fallback over a configurable chain of models
 * - Advisory validation of dosages, anatomical terms and units
 * - JSON request handler and HTTP server
 * - ISO 639-1 and ISO 639-2 language codes, plus locale tags such as `en-US`
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `sanitizer`: Patient identifier redaction
 * - `glossary`: Immutable per-language term index and its loader
 * - `translation`: The translation flow:
 *   - `translation::placeholders`: Term substitution and restoration
 *   - `translation::orchestrator`: Model fallback chain
 *   - `translation::pipeline`: End-to-end request pipeline
 * - `validation`: Dosage, anatomy and unit checks
 * - `providers`: Translator implementations:
 *   - `providers::groq`: Groq chat completions client
 *   - `providers::mock`: Scripted translator for tests
 * - `api`: Transport-agnostic request handler
 * - `server`: axum HTTP server
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod api;
pub mod app_config;
pub mod errors;
pub mod glossary;
pub mod language_utils;
pub mod providers;
pub mod sanitizer;
pub mod server;
pub mod translation;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ApiError, PipelineError, ProviderError};
pub use glossary::{GlossaryIndex, builtin_glossary, load_glossary};
pub use language_utils::{canonical_language, language_codes_match, language_label, primary_subtag};
pub use sanitizer::sanitize;
pub use translation::{TranslationPipeline, TranslationResult};
pub use validation::{ValidationWarning, Validator};
