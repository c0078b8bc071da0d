/*!
 * Tests for the dosage, anatomy and unit checks
 */

use std::sync::Arc;

use medtranslate::glossary::builtin_glossary;
use medtranslate::validation::{ValidationConfig, ValidationWarning, Validator};

fn validator() -> Validator {
    Validator::new(Arc::new(builtin_glossary()))
}

#[test]
fn test_validate_withSameDosage_shouldNotWarn() {
    let warnings = validator().validate("Take 500 mg twice daily", "500 mg", "es");
    assert!(warnings.is_empty());
}

#[test]
fn test_validate_withChangedDosage_shouldWarnOnce() {
    let warnings = validator().validate("Take 500 mg twice daily", "50 mg", "es");
    assert_eq!(warnings, vec![ValidationWarning::DosageDiscrepancy]);
    assert_eq!(warnings[0].to_string(), "Potential dosage discrepancy detected");
}

#[test]
fn test_validate_withAnatomyMissingInBothForms_shouldWarn() {
    let warnings = validator().validate("heart murmur", "soplo", "es");
    assert_eq!(
        warnings,
        vec![ValidationWarning::AnatomicalTerm {
            term: "heart".to_string()
        }]
    );
    assert_eq!(warnings[0].to_string(), "Anatomical term 'heart' might be mistranslated");
}

#[test]
fn test_validate_withResolvedEquivalentPresent_shouldNotWarn() {
    let warnings = validator().validate("Liver and kidney function", "Función del hígado y del riñón", "es");
    assert!(warnings.is_empty());
}

#[test]
fn test_validate_withDefaultUnitCheck_shouldNeverFlagUnits() {
    let warnings = validator().validate("5 mL", "5 mL", "es");
    assert!(warnings.is_empty());
}

#[test]
fn test_validate_withConfiguredUnitCheck_shouldFlagUnlistedUnits() {
    let config = ValidationConfig {
        unit_pattern: r"(?i)[0-9]+\s*(mg|ml|g|mcg|iu)\b".to_string(),
        ..ValidationConfig::default()
    };
    let validator = Validator::from_config(&config, Arc::new(builtin_glossary())).unwrap();

    let warnings = validator.validate("10 IU and 5 mcg", "10 IU y 5 mcg", "es");

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].to_string(), "Invalid units detected: IU, mcg");
    assert_eq!(warnings[0].category(), "units");
}

#[test]
fn test_validate_withCustomVocabulary_shouldOnlyCheckThoseTerms() {
    let config = ValidationConfig {
        anatomical_terms: vec!["lung".to_string()],
        ..ValidationConfig::default()
    };
    let validator = Validator::from_config(&config, Arc::new(builtin_glossary())).unwrap();

    let warnings = validator.validate("heart and lung", "corazón y pulmón", "es");
    assert!(warnings.is_empty());

    let warnings = validator.validate("heart and lung", "nada", "es");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].to_string(), "Anatomical term 'lung' might be mistranslated");
}
