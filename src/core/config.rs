//! Search configuration.
//!
//! Hosts configure the engine once and pass the config into every search:
//! - minimum query length for the DSL path
//! - case sensitivity of free-text matching
//! - the type tables backing `is:permanent` / `is:spell`
//! - the seed used by the `random` sort key
//!
//! The engine never reads global state; everything tunable lives here.

use serde::{Deserialize, Serialize};

/// Default minimum number of characters a DSL query needs.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Configuration shared by every search call.
///
/// ## Example
///
/// ```
/// use card_query::core::SearchConfig;
///
/// let config = SearchConfig::new()
///     .with_min_query_len(3)
///     .with_permanent_type("familiar")
///     .with_random_seed(7);
///
/// assert_eq!(config.min_query_len, 3);
/// assert!(config.is_permanent_type("Familiar"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Queries shorter than this (after trimming) return no results.
    pub min_query_len: usize,

    /// Whether DSL free-text terms compare case-sensitively.
    pub case_sensitive: bool,

    /// Lower-cased type strings that count as permanents for `is:permanent`.
    pub permanent_types: Vec<String>,

    /// Lower-cased type strings that count as spells for `is:spell`.
    pub spell_types: Vec<String>,

    /// Seed for the `random` sort key.
    pub random_seed: u64,

    /// Legality result for cards that carry no legality data.
    pub assume_legal_when_unknown: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            case_sensitive: false,
            permanent_types: vec!["elemental".to_string()],
            spell_types: vec!["φlag".to_string(), "flag".to_string()],
            random_seed: 0,
            assume_legal_when_unknown: true,
        }
    }
}

impl SearchConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum DSL query length.
    #[must_use]
    pub fn with_min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = len;
        self
    }

    /// Make free-text matching case-sensitive.
    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Add a type string to the permanent table.
    #[must_use]
    pub fn with_permanent_type(mut self, card_type: impl Into<String>) -> Self {
        self.permanent_types.push(card_type.into().to_lowercase());
        self
    }

    /// Add a type string to the spell table.
    #[must_use]
    pub fn with_spell_type(mut self, card_type: impl Into<String>) -> Self {
        self.spell_types.push(card_type.into().to_lowercase());
        self
    }

    /// Set the seed for random ordering.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Treat cards without legality data as illegal in every format.
    #[must_use]
    pub fn strict_legality(mut self) -> Self {
        self.assume_legal_when_unknown = false;
        self
    }

    /// Does this type string name a permanent?
    #[must_use]
    pub fn is_permanent_type(&self, card_type: &str) -> bool {
        let lower = card_type.to_lowercase();
        self.permanent_types.iter().any(|t| *t == lower)
    }

    /// Does this type string name a spell?
    #[must_use]
    pub fn is_spell_type(&self, card_type: &str) -> bool {
        let lower = card_type.to_lowercase();
        self.spell_types.iter().any(|t| *t == lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.min_query_len, 2);
        assert!(!config.case_sensitive);
        assert!(config.assume_legal_when_unknown);
        assert!(config.is_permanent_type("ELEMENTAL"));
        assert!(config.is_spell_type("ΦLAG"));
        assert!(config.is_spell_type("Flag"));
        assert!(!config.is_spell_type("Elemental"));
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::new()
            .with_min_query_len(1)
            .case_sensitive()
            .with_spell_type("Ritual")
            .with_random_seed(99)
            .strict_legality();

        assert_eq!(config.min_query_len, 1);
        assert!(config.case_sensitive);
        assert!(config.is_spell_type("ritual"));
        assert_eq!(config.random_seed, 99);
        assert!(!config.assume_legal_when_unknown);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"minQueryLen": 4}"#).unwrap();
        assert_eq!(config.min_query_len, 4);
        assert_eq!(config.permanent_types, vec!["elemental".to_string()]);
    }
}
