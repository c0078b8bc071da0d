/*!
 * Tests for application configuration
 */

use anyhow::Result;
use medtranslate::app_config::{Config, LogLevel};

use crate::common;

#[test]
fn test_load_withPartialFile_shouldMergeDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{
            "translation": { "model_chain": ["only-model"], "attempt_timeout_secs": 0 },
            "supported_languages": ["es", "fr-FR"],
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load(&path)?;

    assert_eq!(config.translation.model_chain, vec!["only-model"]);
    assert_eq!(config.translation.attempt_timeout(), None);
    assert_eq!(config.translation.max_tokens, 1024);
    assert_eq!(config.server.bind_address, "127.0.0.1:3000");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.glossary.path.is_none());
    config.validate()?;
    Ok(())
}

#[test]
fn test_load_withInvalidJson_shouldFailWithContext() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", "{ nope")?;

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config, Config::default());
    Ok(())
}

#[test]
fn test_validate_withUnknownSupportedLanguage_shouldFail() {
    let mut config = Config::default();
    config.supported_languages = vec!["klingon".to_string()];
    assert!(config.validate().is_err());
}
