/*!
 * Tests for the glossary index and its loader
 */

use anyhow::Result;
use medtranslate::glossary::{GlossaryIndex, builtin_glossary, load_glossary};

use crate::common;

#[test]
fn test_loadGlossary_fromFile_shouldKeepBaseOrderAndResolveTerms() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_glossary(dir.path())?;

    let glossary = load_glossary(&path, "en")?;

    assert_eq!(glossary.known_terms(), &["heart", "liver", "kidney", "blood pressure"]);
    assert_eq!(glossary.languages(), vec!["en", "es", "fr"]);
    assert_eq!(glossary.resolve("es", "blood pressure"), "presión arterial");
    assert_eq!(glossary.resolve("fr", "kidney"), "kidney");
    Ok(())
}

#[test]
fn test_loadGlossary_withMissingFile_shouldFailWithPath() {
    let err = load_glossary(std::path::Path::new("/nonexistent/glossary.json"), "en").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/glossary.json"));
}

#[test]
fn test_loadGlossary_withMalformedJson_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "broken.json", "{ \"en\": ")?;
    assert!(load_glossary(&path, "en").is_err());
    Ok(())
}

#[test]
fn test_builtinGlossary_shouldCoverDefaultAnatomicalTerms() {
    let glossary = builtin_glossary();
    for term in ["heart", "liver", "kidney"] {
        assert!(glossary.known_terms().iter().any(|t| t == term));
        assert!(glossary.translation_for("es", term).is_some());
        assert!(glossary.translation_for("fr", term).is_some());
    }
}

#[test]
fn test_builder_withUnknownLanguage_shouldFallBackToTerm() {
    let glossary = GlossaryIndex::builder("en").add_term("en", "Liver", "liver").build();

    assert!(glossary.terms_for("de").is_empty());
    assert_eq!(glossary.resolve("de", "liver"), "liver");
    assert_eq!(glossary.translation_for("en-GB", "LIVER"), Some("liver"));
}
