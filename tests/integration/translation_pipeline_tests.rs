/*!
 * Integration tests for the full translation pipeline.
 *
 * Runs sanitize -> substitute -> fallback -> restore -> validate against
 * scripted translators.
 */

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use medtranslate::app_config::Config;
use medtranslate::errors::PipelineError;
use medtranslate::glossary::{builtin_glossary, load_glossary};
use medtranslate::providers::mock::{MockBehavior, MockTranslator};
use medtranslate::translation::TranslationPipeline;

use crate::common;

#[tokio::test]
async fn test_translate_withPatientUtterance_shouldProduceCleanSpanishResult() -> Result<()> {
    let mock = MockTranslator::replying("GLOSSARY_HEART dolor, tomar 500 mg ibuprofeno");
    let pipeline = common::create_pipeline(mock.clone());

    let result = pipeline
        .translate("The patient: John has heart pain, take 500 mg ibuprofen", "es")
        .await?;

    assert!(result.translated_text.contains("corazón"));
    assert!(!result.translated_text.contains("GLOSSARY_"));
    assert!(result.warnings.is_empty());
    assert_eq!(result.model_used, common::TEST_CHAIN[0]);

    // The backend only ever saw the redacted, placeholder-protected text
    let sent = &mock.calls()[0].text;
    assert_eq!(sent, "The patient: [redacted] has GLOSSARY_HEART pain, take 500 mg ibuprofen");
    Ok(())
}

#[tokio::test]
async fn test_translate_withEmptyPrimary_shouldUseSecondaryModel() -> Result<()> {
    let mock = MockTranslator::empty().with_model(common::TEST_CHAIN[1], MockBehavior::Reply("hola".to_string()));
    let pipeline = common::create_pipeline(mock.clone());

    let result = pipeline.translate("hello", "es").await?;

    assert_eq!(result.model_used, common::TEST_CHAIN[1]);
    assert_eq!(result.translated_text, "hola");
    assert_eq!(mock.called_models(), common::test_chain());
    Ok(())
}

#[tokio::test]
async fn test_translate_withFailingPrimary_shouldFallBack() -> Result<()> {
    let mock = MockTranslator::failing().with_model(common::TEST_CHAIN[1], MockBehavior::Echo);
    let pipeline = common::create_pipeline(mock);

    let result = pipeline.translate("liver", "fr").await?;

    assert_eq!(result.translated_text, "foie");
    assert_eq!(result.model_used, common::TEST_CHAIN[1]);
    Ok(())
}

#[tokio::test]
async fn test_translate_withEveryModelEmpty_shouldReportExhaustion() {
    let mock = MockTranslator::empty();
    let pipeline = common::create_pipeline(mock.clone());

    let err = pipeline.translate("heart", "es").await.unwrap_err();

    assert!(matches!(err, PipelineError::TranslationExhausted { ref models } if models == &common::test_chain()));
    assert_eq!(mock.calls().len(), 2);
}

#[tokio::test]
async fn test_translate_withSlowPrimaryAndDeadline_shouldFallBack() -> Result<()> {
    let mock = MockTranslator::echo().with_model(common::TEST_CHAIN[0], MockBehavior::Slow { delay_ms: 1_000 });
    let pipeline = common::create_pipeline(mock).with_attempt_timeout(Some(Duration::from_millis(50)));

    let result = pipeline.translate("kidney", "es").await?;

    assert_eq!(result.model_used, common::TEST_CHAIN[1]);
    assert_eq!(result.translated_text, "riñón");
    Ok(())
}

#[tokio::test]
async fn test_translate_withDroppedTermAndDosage_shouldWarnInOrder() -> Result<()> {
    let mock = MockTranslator::replying("Dolor en el pecho, tomar 50 mg");
    let pipeline = common::create_pipeline(mock);

    let result = pipeline.translate("Heart pain, take 500 mg", "es").await?;

    assert_eq!(
        result.warnings,
        vec![
            "Potential dosage discrepancy detected",
            "Anatomical term 'heart' might be mistranslated",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_fromConfig_withGlossaryFile_shouldUseFileTerms() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_glossary(dir.path())?;

    let mut config = Config::default();
    config.glossary.path = Some(path.clone());
    config.translation.model_chain = vec!["only".to_string()];

    let glossary = Arc::new(load_glossary(&path, &config.glossary.base_language)?);
    let pipeline = TranslationPipeline::from_config(&config, glossary, Arc::new(MockTranslator::echo()))?;

    let result = pipeline.translate("High blood pressure", "es").await?;

    assert_eq!(result.translated_text, "High presión arterial");
    assert_eq!(result.model_used, "only");
    Ok(())
}

#[tokio::test]
async fn test_translate_concurrentRequests_shouldNotInterfere() -> Result<()> {
    let pipeline = Arc::new(common::create_pipeline_with(
        Arc::new(builtin_glossary()),
        MockTranslator::echo(),
    ));

    let mut handles = Vec::new();
    for (text, lang, expected) in [("heart", "es", "corazón"), ("heart", "fr", "cœur"), ("liver", "es", "hígado")] {
        let pipeline = pipeline.clone();
        handles.push(tokio::spawn(async move {
            let result = pipeline.translate(text, lang).await.unwrap();
            assert_eq!(result.translated_text, expected);
        }));
    }

    for handle in handles {
        handle.await?;
    }
    Ok(())
}
