/*!
 * Anatomical term check.
 *
 * A body part named in the source must still be named in the translation,
 * either by its glossary equivalent for the target language or, when the
 * glossary has none, by the source term itself.
 */

use crate::glossary::GlossaryIndex;

/// Vocabulary checked when none is configured
pub const DEFAULT_ANATOMICAL_TERMS: &[&str] = &["heart", "liver", "kidney"];

/// Terms from `vocabulary` that appear in the source but whose expected
/// equivalent is missing from the translation, in vocabulary order
///
/// Matching is case-insensitive substring containment on both sides.
pub fn missing_terms<'a>(
    vocabulary: &'a [String],
    glossary: &GlossaryIndex,
    source: &str,
    translation: &str,
    target_language: &str,
) -> Vec<&'a str> {
    let source = source.to_lowercase();
    let translation = translation.to_lowercase();

    vocabulary
        .iter()
        .filter(|term| {
            let term = term.to_lowercase();
            if term.is_empty() || !source.contains(&term) {
                return false;
            }
            let expected = glossary.resolve(target_language, &term).to_lowercase();
            !translation.contains(&expected)
        })
        .map(String::as_str)
        .collect()
}
