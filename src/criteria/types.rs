//! Criteria-object input and its comparison modes.
//!
//! `SearchCriteria` mirrors the flat object built by advanced-search forms.
//! Every key is optional. Comparison modes are kept as strings and parsed
//! leniently: a missing or unrecognized mode falls back to the most
//! permissive interpretation for that field.

use serde::{Deserialize, Serialize};

/// String comparison for names and artists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringMatch {
    #[default]
    Contains,
    Exact,
    Starts,
    Ends,
}

impl StringMatch {
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "contains" => Some(StringMatch::Contains),
            "exact" => Some(StringMatch::Exact),
            "starts" => Some(StringMatch::Starts),
            "ends" => Some(StringMatch::Ends),
            _ => None,
        }
    }
}

/// Comparison for rules and flavor text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextComparison {
    /// Every word appears somewhere, in any order.
    #[default]
    AllWords,
    /// The whole phrase appears as written.
    WordOrder,
    Exact,
}

impl TextComparison {
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "contains" => Some(TextComparison::AllWords),
            "word-order-matters" => Some(TextComparison::WordOrder),
            "exact" => Some(TextComparison::Exact),
            _ => None,
        }
    }
}

/// Include-or-exclude against a selected list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InclusionMode {
    #[default]
    Including,
    Excluding,
}

impl InclusionMode {
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "including" => Some(InclusionMode::Including),
            "excluding" => Some(InclusionMode::Excluding),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_excluding(self) -> bool {
        self == InclusionMode::Excluding
    }
}

/// Element set comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementComparison {
    /// Card has any selected element.
    #[default]
    Including,
    /// Card elements equal the selection.
    Exactly,
    /// Card elements are a subset of the selection.
    AtMost,
    /// Card has every selected element.
    AtLeast,
}

impl ElementComparison {
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "including" => Some(ElementComparison::Including),
            "exactly" => Some(ElementComparison::Exactly),
            "at-most" => Some(ElementComparison::AtMost),
            "at-least" => Some(ElementComparison::AtLeast),
            _ => None,
        }
    }
}

/// Keyword set comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordComparison {
    #[default]
    Including,
    Excluding,
    Exactly,
}

impl KeywordComparison {
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "including" => Some(KeywordComparison::Including),
            "excluding" => Some(KeywordComparison::Excluding),
            "exactly" => Some(KeywordComparison::Exactly),
            _ => None,
        }
    }
}

/// Mana cost comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManaCostComparison {
    /// Cost string contains the value.
    #[default]
    Contains,
    Exact,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl ManaCostComparison {
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "contains" => Some(ManaCostComparison::Contains),
            "exact" => Some(ManaCostComparison::Exact),
            "less" => Some(ManaCostComparison::Less),
            "greater" => Some(ManaCostComparison::Greater),
            "less-equal" => Some(ManaCostComparison::LessEqual),
            "greater-equal" => Some(ManaCostComparison::GreaterEqual),
            _ => None,
        }
    }
}

/// Collector number comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectorComparison {
    Exact,
    Range,
}

impl CollectorComparison {
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "exact" => Some(CollectorComparison::Exact),
            "range" => Some(CollectorComparison::Range),
            _ => None,
        }
    }
}

/// Price range comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceComparison {
    #[default]
    Between,
    Less,
    Greater,
}

impl PriceComparison {
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "between" => Some(PriceComparison::Between),
            "less" => Some(PriceComparison::Less),
            "greater" => Some(PriceComparison::Greater),
            _ => None,
        }
    }
}

/// Required legality status for the `formats` criterion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatStatus {
    #[default]
    Legal,
    NotLegal,
}

impl FormatStatus {
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "legal" => Some(FormatStatus::Legal),
            "not-legal" | "banned" => Some(FormatStatus::NotLegal),
            _ => None,
        }
    }
}

/// How per-key results combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombineMode {
    /// Every constraining key must match.
    #[default]
    And,
    /// Any constraining key matching is enough.
    Or,
}

impl CombineMode {
    #[must_use]
    pub fn parse(mode: &str) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "and" => Some(CombineMode::And),
            "or" => Some(CombineMode::Or),
            _ => None,
        }
    }
}

/// `{operator, value}` stat comparator as sent by forms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatInput {
    pub operator: String,
    pub value: String,
}

impl StatInput {
    #[must_use]
    pub fn new(operator: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// `{min, max}` bounds as sent by forms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeInput {
    pub min: String,
    pub max: String,
    pub currency: Option<String>,
}

impl RangeInput {
    #[must_use]
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            currency: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.trim().is_empty() && self.max.trim().is_empty()
    }
}

/// The criteria object consumed by `search_cards`.
///
/// ## Example
///
/// ```
/// use card_query::criteria::SearchCriteria;
///
/// let criteria: SearchCriteria = serde_json::from_str(r#"{
///     "rarity": ["Rare"],
///     "rarityComparison": "excluding",
///     "sortBy": "name"
/// }"#).unwrap();
///
/// assert_eq!(criteria.rarity, vec!["Rare".to_string()]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchCriteria {
    pub card_name: Option<String>,
    pub name_comparison: Option<String>,
    pub text: Option<String>,
    pub text_comparison: Option<String>,

    pub type_line: Option<String>,
    pub allow_partial_types: Option<bool>,
    pub selected_types: Vec<String>,
    pub type_comparison: Option<String>,

    pub elements: Vec<String>,
    pub element_comparison: Option<String>,
    pub element_identity: Vec<String>,

    pub keywords: Vec<String>,
    pub keyword_comparison: Option<String>,

    pub mana_cost: Option<String>,
    pub mana_cost_comparison: Option<String>,
    pub converted_mana_cost: Option<StatInput>,

    pub attack: Option<StatInput>,
    pub defense: Option<StatInput>,
    pub strength: Option<StatInput>,

    pub sets: Vec<String>,
    pub set_comparison: Option<String>,
    pub rarity: Vec<String>,
    pub rarity_comparison: Option<String>,

    pub collector_number: Option<String>,
    pub collector_comparison: Option<String>,
    pub collector_range: Option<RangeInput>,

    pub price_range: Option<RangeInput>,
    pub price_comparison: Option<String>,

    pub artist: Option<String>,
    pub artist_comparison: Option<String>,
    pub flavor_text: Option<String>,
    pub flavor_comparison: Option<String>,

    pub formats: Vec<String>,
    pub format_status: Option<String>,

    pub language: Option<String>,
    pub include_translations: bool,

    pub criteria: Vec<String>,
    pub criteria_comparison: Option<String>,

    pub include_tokens: Option<bool>,
    pub include_extras: Option<bool>,

    pub case_sensitive: bool,
    pub search_mode: Option<String>,

    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub group_by: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}
