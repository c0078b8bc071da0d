/*!
 * Validation service that runs every check on a translation.
 *
 * The service is advisory: it never fails and never blocks a result. Warnings
 * come out in a fixed order: dosage, then anatomy (vocabulary order), then
 * units.
 */

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::glossary::GlossaryIndex;

use super::anatomy::{self, DEFAULT_ANATOMICAL_TERMS};
use super::dosage;
use super::units::{DEFAULT_ALLOWED_UNITS, DEFAULT_UNIT_PATTERN, UnitCheck};

/// Configuration for the validation service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    /// Body parts whose translation is checked
    #[serde(default = "default_anatomical_terms")]
    pub anatomical_terms: Vec<String>,

    /// Regex detecting units in the translation; group 1 is the unit
    #[serde(default = "default_unit_pattern")]
    pub unit_pattern: String,

    /// Units accepted by the unit check (case-insensitive)
    #[serde(default = "default_allowed_units")]
    pub allowed_units: Vec<String>,
}

fn default_anatomical_terms() -> Vec<String> {
    DEFAULT_ANATOMICAL_TERMS.iter().map(|t| t.to_string()).collect()
}

fn default_unit_pattern() -> String {
    DEFAULT_UNIT_PATTERN.to_string()
}

fn default_allowed_units() -> Vec<String> {
    DEFAULT_ALLOWED_UNITS.iter().map(|u| u.to_string()).collect()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            anatomical_terms: default_anatomical_terms(),
            unit_pattern: default_unit_pattern(),
            allowed_units: default_allowed_units(),
        }
    }
}

/// One advisory finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Dosage sequences of source and translation differ
    DosageDiscrepancy,
    /// An anatomical term may have been lost in translation
    AnatomicalTerm { term: String },
    /// Units outside the allow-list appear in the translation
    InvalidUnits { units: Vec<String> },
}

impl ValidationWarning {
    /// Short category name
    pub fn category(&self) -> &'static str {
        match self {
            Self::DosageDiscrepancy => "dosage",
            Self::AnatomicalTerm { .. } => "anatomy",
            Self::InvalidUnits { .. } => "units",
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DosageDiscrepancy => write!(f, "Potential dosage discrepancy detected"),
            Self::AnatomicalTerm { term } => write!(f, "Anatomical term '{}' might be mistranslated", term),
            Self::InvalidUnits { units } => write!(f, "Invalid units detected: {}", units.join(", ")),
        }
    }
}

/// Runs the dosage, anatomy and unit checks
#[derive(Debug, Clone)]
pub struct Validator {
    glossary: Arc<GlossaryIndex>,
    anatomical_terms: Vec<String>,
    unit_check: UnitCheck,
}

impl Validator {
    /// Create a validator with the default vocabulary and unit check
    pub fn new(glossary: Arc<GlossaryIndex>) -> Self {
        Self {
            glossary,
            anatomical_terms: default_anatomical_terms(),
            unit_check: UnitCheck::default(),
        }
    }

    /// Create a validator from configuration
    pub fn from_config(config: &ValidationConfig, glossary: Arc<GlossaryIndex>) -> Result<Self> {
        let unit_check = UnitCheck::new(&config.unit_pattern, config.allowed_units.as_slice())
            .with_context(|| format!("Invalid unit pattern: {}", config.unit_pattern))?;

        Ok(Self {
            glossary,
            anatomical_terms: config.anatomical_terms.clone(),
            unit_check,
        })
    }

    /// Compare the sanitized source with the final translation
    pub fn validate(&self, source: &str, translation: &str, target_language: &str) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if dosage::dosages_differ(source, translation) {
            warnings.push(ValidationWarning::DosageDiscrepancy);
        }

        for term in anatomy::missing_terms(&self.anatomical_terms, &self.glossary, source, translation, target_language) {
            warnings.push(ValidationWarning::AnatomicalTerm { term: term.to_string() });
        }

        let invalid = self.unit_check.invalid_units(translation);
        if !invalid.is_empty() {
            warnings.push(ValidationWarning::InvalidUnits {
                units: invalid.into_iter().map(str::to_string).collect(),
            });
        }

        debug!("Validation produced {} warning(s)", warnings.len());
        warnings
    }
}
