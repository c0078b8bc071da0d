/*!
 * Dosage consistency check.
 *
 * Extracts every `<number><unit>` dosage from the source and the translation
 * and compares the two sequences. A translation that drops, reorders or
 * alters a dosage is flagged.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Number followed by a recognized dosage unit
static DOSAGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[0-9]+\s*(?:mg|mL|g|μg|mcg|IU)\b").expect("Invalid dosage regex")
});

/// All dosages in `text`, in order of appearance, duplicates included
pub fn extract_dosages(text: &str) -> Vec<&str> {
    DOSAGE_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Whether the dosage sequences of the two texts differ
///
/// The comparison is exact and order-sensitive: `500 mg` and `500mg` differ.
pub fn dosages_differ(source: &str, translation: &str) -> bool {
    extract_dosages(source).join(",") != extract_dosages(translation).join(",")
}
