use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for request language codes
///
/// Targets arrive either as bare ISO 639 codes ("es", "spa") or as locale
/// tags coming from browser speech APIs ("en-US", "fr_FR"). Glossary lookups
/// are keyed by the canonical code (ISO 639-1 where one exists); prompts use the English language name.

/// ISO 639-2/B codes that differ from their ISO 639-2/T form
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("per", "fas"),
    ("arm", "hye"),
];

/// Return the lowercase primary subtag of a language tag
///
/// `"es-ES"` and `"es_ES"` both become `"es"`; a bare code is only trimmed
/// and lowercased.
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Resolve a language tag to an isolang `Language`
pub fn resolve_language(tag: &str) -> Result<Language> {
    let code = primary_subtag(tag);

    let language = match code.len() {
        2 => Language::from_639_1(&code),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(b, _)| *b == code)
                .map(|(_, t)| *t)
                .unwrap_or(code.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    };

    language.ok_or_else(|| anyhow!("Invalid language code: {}", tag))
}

/// Reduce a language tag to the key used for glossary lookups
///
/// Known languages become their ISO 639-1 code when they have one, else their
/// ISO 639-3 code, so `"spa"`, `"es-ES"` and `"es"` all yield `"es"`. Unknown
/// tags fall back to their primary subtag.
pub fn canonical_language(tag: &str) -> String {
    match resolve_language(tag) {
        Ok(language) => language
            .to_639_1()
            .map(str::to_string)
            .unwrap_or_else(|| language.to_639_3().to_string()),
        Err(_) => primary_subtag(tag),
    }
}

/// Validate that a tag names a known ISO 639 language
pub fn validate_language_code(tag: &str) -> Result<()> {
    resolve_language(tag).map(|_| ())
}

/// Check if two language tags refer to the same language
pub fn language_codes_match(tag1: &str, tag2: &str) -> bool {
    match (resolve_language(tag1), resolve_language(tag2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name used in translation prompts
///
/// Unknown tags are passed through unchanged so the backend still receives
/// whatever the caller asked for.
pub fn language_label(tag: &str) -> String {
    match resolve_language(tag) {
        Ok(language) => language.to_name().to_string(),
        Err(_) => tag.trim().to_string(),
    }
}
