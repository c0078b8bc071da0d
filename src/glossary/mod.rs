/*!
 * Medical glossary index.
 *
 * The glossary maps canonical base-language terms to their equivalents in
 * each supported language. It is built once at startup, never mutated, and
 * shared read-only by every request:
 *
 * - `GlossaryIndex`: the immutable lookup structure
 * - `GlossaryBuilder`: incremental construction from configuration
 * - `loader`: JSON file loading and the built-in default glossary
 */

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::language_utils::canonical_language;

pub mod loader;

pub use loader::{builtin_glossary, load_glossary};

/// Language whose entry enumerates every recognizable term
pub const DEFAULT_BASE_LANGUAGE: &str = "en";

static EMPTY_TERMS: Lazy<HashMap<String, String>> = Lazy::new(HashMap::new);

/// Normalize a term into its canonical key form
///
/// Lowercases and collapses internal whitespace runs to a single space.
pub fn canonical_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Immutable per-language term lookup
#[derive(Debug, Clone)]
pub struct GlossaryIndex {
    /// Language code of the base glossary
    base_language: String,

    /// Base-language terms in configuration order
    known_terms: Vec<String>,

    /// Language code -> canonical term -> equivalent term
    languages: HashMap<String, HashMap<String, String>>,
}

impl GlossaryIndex {
    /// Start building a glossary around the given base language
    pub fn builder(base_language: &str) -> GlossaryBuilder {
        GlossaryBuilder::new(base_language)
    }

    /// An index without any terms
    pub fn empty() -> Self {
        GlossaryBuilder::new(DEFAULT_BASE_LANGUAGE).build()
    }

    /// Base language code
    pub fn base_language(&self) -> &str {
        &self.base_language
    }

    /// Base-language terms in configuration order
    pub fn known_terms(&self) -> &[String] {
        &self.known_terms
    }

    /// Term mapping for a language
    ///
    /// Locale tags and ISO 639-2/3 codes are reduced to the canonical
    /// language code. An unknown language yields an empty mapping.
    pub fn terms_for(&self, language: &str) -> &HashMap<String, String> {
        self.languages
            .get(&canonical_language(language))
            .unwrap_or(&*EMPTY_TERMS)
    }

    /// Equivalent of `term` in `language`, if the glossary has one
    pub fn translation_for(&self, language: &str, term: &str) -> Option<&str> {
        self.terms_for(language)
            .get(&canonical_term(term))
            .map(String::as_str)
    }

    /// Equivalent of `term` in `language`, falling back to the term itself
    pub fn resolve(&self, language: &str, term: &str) -> String {
        self.translation_for(language, term)
            .map(str::to_string)
            .unwrap_or_else(|| term.to_string())
    }

    /// Language codes present in the index, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Number of known base-language terms
    pub fn len(&self) -> usize {
        self.known_terms.len()
    }

    /// Whether the index knows no terms at all
    pub fn is_empty(&self) -> bool {
        self.known_terms.is_empty()
    }
}

/// Builder for `GlossaryIndex`
#[derive(Debug, Clone)]
pub struct GlossaryBuilder {
    base_language: String,
    known_terms: Vec<String>,
    languages: HashMap<String, HashMap<String, String>>,
}

impl GlossaryBuilder {
    /// Create an empty builder
    pub fn new(base_language: &str) -> Self {
        Self {
            base_language: canonical_language(base_language),
            known_terms: Vec::new(),
            languages: HashMap::new(),
        }
    }

    /// Add one term for a language
    ///
    /// Base-language terms also become known terms, in the order they are
    /// first added. Blank terms are ignored. A blank translation leaves the
    /// term without an equivalent in that language. A repeated term keeps its
    /// first position and takes the latest translation.
    pub fn add_term(mut self, language: &str, term: &str, translation: &str) -> Self {
        self.insert(language, term, translation);
        self
    }

    /// Add a batch of terms for a language
    pub fn language<I, K, V>(mut self, language: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (term, translation) in entries {
            self.insert(language, term.as_ref(), translation.as_ref());
        }
        self
    }

    fn insert(&mut self, language: &str, term: &str, translation: &str) {
        let key = canonical_term(term);
        if key.is_empty() {
            return;
        }

        let language = canonical_language(language);
        if language == self.base_language && !self.known_terms.contains(&key) {
            self.known_terms.push(key.clone());
        }

        let terms = self.languages.entry(language).or_default();
        let translation = translation.trim();
        if translation.is_empty() {
            terms.remove(&key);
        } else {
            terms.insert(key, translation.to_string());
        }
    }

    /// Freeze the glossary
    pub fn build(mut self) -> GlossaryIndex {
        self.languages.entry(self.base_language.clone()).or_default();

        GlossaryIndex {
            base_language: self.base_language,
            known_terms: self.known_terms,
            languages: self.languages,
        }
    }
}
