/*!
 * Input sanitization.
 *
 * Strips patient identifiers from free text before it is sent to any
 * translation backend or written anywhere else.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Text that replaces a redacted identifier
pub const REDACTED: &str = "patient: [redacted]";

/// `patient:` followed by a single identifier token
static PATIENT_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)patient:\s*\w+").expect("Invalid patient identifier regex")
});

/// Redact every `patient: <token>` occurrence, case-insensitively
///
/// Already redacted text is left unchanged: `[redacted]` starts with a
/// non-word character so it never matches the identifier token.
pub fn sanitize(text: &str) -> String {
    PATIENT_ID_REGEX.replace_all(text, REDACTED).into_owned()
}
