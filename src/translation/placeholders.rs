/*!
 * Glossary-aware placeholder substitution.
 *
 * Before translation every known glossary term is swapped for a synthetic
 * placeholder token the model is asked to leave alone. After translation the
 * placeholders are swapped back for the target-language equivalent of the
 * original term.
 */

use log::{debug, warn};
use regex::{Captures, NoExpand, Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::Arc;

use crate::glossary::GlossaryIndex;

/// Fixed prefix of every placeholder token
pub const PLACEHOLDER_PREFIX: &str = "GLOSSARY_";

/// Compiled size limit for the combined term pattern
const TERM_PATTERN_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Build the placeholder token for a term
///
/// `"blood pressure"` becomes `"GLOSSARY_BLOOD_PRESSURE"`.
pub fn placeholder_for(term: &str) -> String {
    let body = term
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase();
    format!("{}{}", PLACEHOLDER_PREFIX, body)
}

/// One substituted term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderEntry {
    /// Token inserted into the text
    pub placeholder: String,
    /// Canonical base-language term it stands for
    pub term: String,
}

/// Per-request record of the substitutions made during pre-processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMapping {
    entries: Vec<PlaceholderEntry>,
}

impl PlaceholderMapping {
    /// Entries in substitution order
    pub fn entries(&self) -> &[PlaceholderEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlaceholderEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of pre-processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreProcessed {
    /// Text with glossary terms replaced by placeholders
    pub text: String,
    /// Substitutions to undo after translation
    pub mapping: PlaceholderMapping,
}

/// Placeholder substitution engine bound to one glossary
#[derive(Debug, Clone)]
pub struct PlaceholderEngine {
    glossary: Arc<GlossaryIndex>,
    /// Known terms, longest first
    terms: Vec<String>,
    /// Placeholder for each entry of `terms`
    placeholders: Vec<String>,
    /// One capture group per term, same order as `terms`
    term_pattern: Option<Regex>,
}

impl PlaceholderEngine {
    /// Compile the term matcher for a glossary
    pub fn new(glossary: Arc<GlossaryIndex>) -> Result<Self, regex::Error> {
        let mut terms: Vec<String> = glossary.known_terms().to_vec();
        // Stable sort keeps configuration order between equal lengths.
        terms.sort_by_key(|term| std::cmp::Reverse(term.chars().count()));

        let placeholders = terms.iter().map(|term| placeholder_for(term)).collect();

        let term_pattern = if terms.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = terms
                .iter()
                .map(|term| {
                    let words: Vec<String> = term.split_whitespace().map(regex::escape).collect();
                    format!("({})", words.join(r"\s+"))
                })
                .collect();

            let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
                .case_insensitive(true)
                .size_limit(TERM_PATTERN_SIZE_LIMIT)
                .build()?;
            Some(pattern)
        };

        debug!("Placeholder engine ready with {} glossary terms", terms.len());

        Ok(Self {
            glossary,
            terms,
            placeholders,
            term_pattern,
        })
    }

    /// The glossary this engine resolves terms against
    pub fn glossary(&self) -> &GlossaryIndex {
        &self.glossary
    }

    /// Replace every known term with its placeholder
    ///
    /// All terms are matched in a single pass, so text that has already been
    /// turned into a placeholder is never matched again by a shorter term.
    pub fn pre_process(&self, text: &str) -> PreProcessed {
        let Some(pattern) = &self.term_pattern else {
            return PreProcessed {
                text: text.to_string(),
                mapping: PlaceholderMapping::default(),
            };
        };

        let mut matched = vec![false; self.terms.len()];
        let processed = pattern
            .replace_all(text, |caps: &Captures| {
                match (1..caps.len()).find(|&group| caps.get(group).is_some()) {
                    Some(group) => {
                        matched[group - 1] = true;
                        self.placeholders[group - 1].clone()
                    }
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        let entries = matched
            .iter()
            .enumerate()
            .filter(|(_, hit)| **hit)
            .map(|(index, _)| PlaceholderEntry {
                placeholder: self.placeholders[index].clone(),
                term: self.terms[index].clone(),
            })
            .collect();

        PreProcessed {
            text: processed,
            mapping: PlaceholderMapping { entries },
        }
    }

    /// Replace placeholders with the target-language glossary terms
    ///
    /// Every case-insensitive occurrence is replaced, including placeholders
    /// the model repeated. Terms without a target-language entry are restored
    /// unchanged.
    pub fn post_process(&self, text: &str, mapping: &PlaceholderMapping, target_language: &str) -> String {
        if mapping.is_empty() {
            return text.to_string();
        }

        let resolved: Vec<(String, String)> = mapping
            .iter()
            .map(|entry| {
                let replacement = self.glossary.resolve(target_language, &entry.term);
                (entry.placeholder.clone(), replacement)
            })
            .collect();

        // A longer placeholder must win over one that is a prefix of it.
        let mut alternatives: Vec<&str> = resolved.iter().map(|(placeholder, _)| placeholder.as_str()).collect();
        alternatives.sort_by_key(|placeholder| std::cmp::Reverse(placeholder.len()));
        let pattern = alternatives
            .iter()
            .map(|placeholder| regex::escape(placeholder))
            .collect::<Vec<_>>()
            .join("|");

        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(regex) => {
                let by_placeholder: HashMap<String, &str> = resolved
                    .iter()
                    .map(|(placeholder, replacement)| (placeholder.to_uppercase(), replacement.as_str()))
                    .collect();

                regex
                    .replace_all(text, |caps: &Captures| {
                        let found = &caps[0];
                        by_placeholder
                            .get(&found.to_uppercase())
                            .map(|replacement| replacement.to_string())
                            .unwrap_or_else(|| found.to_string())
                    })
                    .into_owned()
            }
            Err(e) => {
                warn!("Falling back to per-placeholder restoration: {}", e);
                resolved.iter().fold(text.to_string(), |acc, (placeholder, replacement)| {
                    match RegexBuilder::new(&regex::escape(placeholder)).case_insensitive(true).build() {
                        Ok(single) => single.replace_all(&acc, NoExpand(replacement)).into_owned(),
                        Err(_) => acc.replace(placeholder.as_str(), replacement),
                    }
                })
            }
        }
    }
}
