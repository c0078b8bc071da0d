/*!
 * Common test utilities for the medtranslate test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use medtranslate::api::AppState;
use medtranslate::glossary::{GlossaryIndex, builtin_glossary};
use medtranslate::providers::mock::MockTranslator;
use medtranslate::translation::TranslationPipeline;

/// Default chain used by the test pipelines
pub const TEST_CHAIN: &[&str] = &["llama3-70b-8192", "mixtral-8x7b-32768"];

/// Initialize test logging once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes a small three-language glossary file
pub fn create_test_glossary(dir: &Path) -> Result<PathBuf> {
    let content = r#"{
    "en": {
        "heart": "heart",
        "liver": "liver",
        "kidney": "kidney",
        "blood pressure": "blood pressure"
    },
    "es": {
        "heart": "corazón",
        "liver": "hígado",
        "kidney": "riñón",
        "blood pressure": "presión arterial"
    },
    "fr": {
        "heart": "cœur",
        "liver": "foie"
    }
}"#;
    create_test_file(dir, "glossary.json", content)
}

/// Model chain as owned strings
pub fn test_chain() -> Vec<String> {
    TEST_CHAIN.iter().map(|m| m.to_string()).collect()
}

/// Pipeline over the built-in glossary and the given mock
pub fn create_pipeline(mock: MockTranslator) -> TranslationPipeline {
    create_pipeline_with(Arc::new(builtin_glossary()), mock)
}

/// Pipeline over a specific glossary and the given mock
pub fn create_pipeline_with(glossary: Arc<GlossaryIndex>, mock: MockTranslator) -> TranslationPipeline {
    init_logging();
    TranslationPipeline::new(glossary, Arc::new(mock), test_chain()).expect("Failed to build test pipeline")
}

/// Request handler state supporting en, es and fr
pub fn create_state(mock: MockTranslator) -> Arc<AppState> {
    let supported = vec!["en".to_string(), "es".to_string(), "fr".to_string()];
    Arc::new(AppState::new(Arc::new(create_pipeline(mock)), supported))
}
