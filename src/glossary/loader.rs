use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::{DEFAULT_BASE_LANGUAGE, GlossaryBuilder, GlossaryIndex};

/// Glossary shipped with the binary: (english, spanish, french)
const BUILTIN_TERMS: &[(&str, &str, &str)] = &[
    ("heart", "corazón", "cœur"),
    ("liver", "hígado", "foie"),
    ("kidney", "riñón", "rein"),
    ("lung", "pulmón", "poumon"),
    ("stomach", "estómago", "estomac"),
    ("brain", "cerebro", "cerveau"),
    ("blood pressure", "presión arterial", "tension artérielle"),
    ("chest pain", "dolor torácico", "douleur thoracique"),
    ("shortness of breath", "dificultad para respirar", "essoufflement"),
    ("hypertension", "hipertensión", "hypertension"),
    ("diabetes", "diabetes", "diabète"),
    ("allergy", "alergia", "allergie"),
];

/// Build the built-in English/Spanish/French glossary
pub fn builtin_glossary() -> GlossaryIndex {
    GlossaryIndex::builder(DEFAULT_BASE_LANGUAGE)
        .language("en", BUILTIN_TERMS.iter().map(|(en, _, _)| (*en, *en)))
        .language("es", BUILTIN_TERMS.iter().map(|(en, es, _)| (*en, *es)))
        .language("fr", BUILTIN_TERMS.iter().map(|(en, _, fr)| (*en, *fr)))
        .build()
}

/// Load a glossary from a JSON file
///
/// The file is an object keyed by language code; each value maps canonical
/// base-language terms to that language's equivalent:
///
/// ```json
/// {
///   "en": { "heart": "heart", "liver": "liver" },
///   "es": { "heart": "corazón" }
/// }
/// ```
///
/// Key order inside the base language defines known-term order.
pub fn load_glossary(path: &Path, base_language: &str) -> Result<GlossaryIndex> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read glossary file: {}", path.display()))?;

    let glossary = parse_glossary(&content, base_language)
        .with_context(|| format!("Invalid glossary file: {}", path.display()))?;

    info!(
        "Loaded glossary with {} terms across {} languages from {}",
        glossary.len(),
        glossary.languages().len(),
        path.display()
    );

    Ok(glossary)
}

/// Parse glossary JSON content
pub fn parse_glossary(content: &str, base_language: &str) -> Result<GlossaryIndex> {
    let root: Map<String, Value> =
        serde_json::from_str(content).context("Glossary must be a JSON object keyed by language")?;

    let base_key = crate::language_utils::canonical_language(base_language);
    if !root
        .keys()
        .any(|language| crate::language_utils::canonical_language(language) == base_key)
    {
        return Err(anyhow!("Glossary has no entry for base language '{}'", base_key));
    }

    let mut builder = GlossaryBuilder::new(&base_key);
    for (language, terms) in &root {
        let terms = terms
            .as_object()
            .ok_or_else(|| anyhow!("Terms for language '{}' must be a JSON object", language))?;

        let mut entries = Vec::with_capacity(terms.len());
        for (term, translation) in terms {
            let translation = translation.as_str().ok_or_else(|| {
                anyhow!("Translation of '{}' in language '{}' must be a string", term, language)
            })?;
            entries.push((term.as_str(), translation));
        }

        debug!("Glossary language '{}': {} entries", language, entries.len());
        builder = builder.language(language, entries);
    }

    Ok(builder.build())
}
