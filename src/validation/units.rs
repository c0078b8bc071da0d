/*!
 * Unit validity check.
 *
 * Units are detected in the translation with a configurable pattern and
 * compared against an allow-list. The two are configured independently.
 */

use regex::Regex;

/// Detection pattern used when none is configured
pub const DEFAULT_UNIT_PATTERN: &str = r"(?i)\b(mg|ml|g)\b";

/// Units accepted when none are configured
pub const DEFAULT_ALLOWED_UNITS: &[&str] = &["mg", "mL", "g"];

/// Compiled unit detector with its allow-list
#[derive(Debug, Clone)]
pub struct UnitCheck {
    detection: Regex,
    /// Lowercased allowed units
    allowed: Vec<String>,
}

impl UnitCheck {
    /// Compile a detector
    ///
    /// When the pattern has a capture group, the first group is the unit;
    /// otherwise the whole match is.
    pub fn new<S: AsRef<str>>(pattern: &str, allowed: &[S]) -> Result<Self, regex::Error> {
        Ok(Self {
            detection: Regex::new(pattern)?,
            allowed: allowed.iter().map(|unit| unit.as_ref().to_lowercase()).collect(),
        })
    }

    /// Detected units that are not in the allow-list, in order of appearance
    pub fn invalid_units<'t>(&self, translation: &'t str) -> Vec<&'t str> {
        self.detection
            .captures_iter(translation)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
            .map(|m| m.as_str())
            .filter(|unit| !self.allowed.contains(&unit.to_lowercase()))
            .collect()
    }
}

impl Default for UnitCheck {
    fn default() -> Self {
        Self {
            detection: Regex::new(DEFAULT_UNIT_PATTERN).expect("Invalid default unit regex"),
            allowed: DEFAULT_ALLOWED_UNITS.iter().map(|unit| unit.to_lowercase()).collect(),
        }
    }
}
