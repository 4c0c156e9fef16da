//! Criteria normalizer: `SearchCriteria` to a list of typed `Criterion`s.
//!
//! Trivial values (empty strings, empty lists, objects whose fields are all
//! empty) produce no criterion at all, so they never constrain a search and
//! never count toward `or` mode.

use serde::{Deserialize, Serialize};

use crate::cards::Stat;
use crate::query::CompareOp;

use super::types::{
    CollectorComparison, CombineMode, ElementComparison, FormatStatus, InclusionMode,
    KeywordComparison, ManaCostComparison, PriceComparison, RangeInput, SearchCriteria, StatInput,
    StringMatch, TextComparison,
};

/// Right-hand side of a stat comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatTarget {
    Int(i64),
    /// `*` or `X`, compared against the card's stat text.
    Symbol(String),
    /// Unparseable value. Never matches.
    Invalid,
}

/// `{operator, value}` stat comparison.
///
/// A missing or unrecognized operator leaves `op` empty, which matches
/// every card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatFilter {
    pub op: Option<CompareOp>,
    pub target: StatTarget,
}

impl StatFilter {
    /// `None` when the value is blank.
    #[must_use]
    pub fn from_input(input: &StatInput) -> Option<Self> {
        let value = input.value.trim();
        if value.is_empty() {
            return None;
        }

        let target = if value == "*" || value.eq_ignore_ascii_case("x") {
            StatTarget::Symbol(value.to_string())
        } else {
            value
                .parse::<i64>()
                .map_or(StatTarget::Invalid, StatTarget::Int)
        };

        Some(Self {
            op: CompareOp::parse(&input.operator),
            target,
        })
    }

    /// Compare against a derived integer value.
    #[must_use]
    pub fn matches_value(&self, actual: i64) -> bool {
        let Some(op) = self.op else {
            return true;
        };
        match &self.target {
            StatTarget::Int(expected) => op.compare(actual, *expected),
            StatTarget::Symbol(_) | StatTarget::Invalid => false,
        }
    }

    /// Compare against a card stat. Cards without the stat never match.
    #[must_use]
    pub fn matches_stat(&self, stat: Option<&Stat>) -> bool {
        let Some(op) = self.op else {
            return true;
        };
        let Some(stat) = stat else {
            return false;
        };
        match &self.target {
            StatTarget::Symbol(symbol) => {
                let same = stat.as_text().eq_ignore_ascii_case(symbol);
                match op {
                    CompareOp::Eq => same,
                    CompareOp::Ne => !same,
                    _ => false,
                }
            }
            _ => stat.as_int().is_some_and(|actual| self.matches_value(actual)),
        }
    }
}

/// Collector-number constraint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectorFilter {
    Exact(String),
    /// Inclusive bounds on the numeric part of the collector number.
    Range { min: Option<i64>, max: Option<i64> },
}

/// One non-trivial key of a criteria object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Criterion {
    Name {
        value: String,
        mode: StringMatch,
        case_sensitive: bool,
    },
    Text {
        value: String,
        mode: TextComparison,
        case_sensitive: bool,
    },
    TypeLine {
        value: String,
        partial: bool,
        mode: InclusionMode,
        case_sensitive: bool,
    },
    SelectedTypes {
        types: Vec<String>,
        mode: InclusionMode,
    },
    Elements {
        elements: Vec<String>,
        mode: ElementComparison,
    },
    /// Every card element and colored cost symbol must be in this set.
    ElementIdentity(Vec<String>),
    Keywords {
        keywords: Vec<String>,
        mode: KeywordComparison,
    },
    ManaCost {
        value: String,
        mode: ManaCostComparison,
    },
    ConvertedCost(StatFilter),
    Attack(StatFilter),
    Defense(StatFilter),
    /// Compared against `attack + defense`.
    Strength(StatFilter),
    Sets {
        sets: Vec<String>,
        mode: InclusionMode,
    },
    Rarity {
        rarities: Vec<String>,
        mode: InclusionMode,
    },
    Collector(CollectorFilter),
    Price {
        min: Option<f64>,
        max: Option<f64>,
        mode: PriceComparison,
    },
    Artist {
        value: String,
        mode: StringMatch,
        case_sensitive: bool,
    },
    FlavorText {
        value: String,
        mode: TextComparison,
        case_sensitive: bool,
    },
    Formats {
        formats: Vec<String>,
        status: FormatStatus,
    },
    Language {
        code: String,
        include_translations: bool,
    },
    /// Lore terms over name, rules text, type and flavor text.
    Custom {
        terms: Vec<String>,
        mode: InclusionMode,
    },
    ExcludeTokens,
    ExcludeExtras,
}

impl Criterion {
    /// The criteria-object key this criterion came from.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Criterion::Name { .. } => "cardName",
            Criterion::Text { .. } => "text",
            Criterion::TypeLine { .. } => "typeLine",
            Criterion::SelectedTypes { .. } => "selectedTypes",
            Criterion::Elements { .. } => "elements",
            Criterion::ElementIdentity(_) => "elementIdentity",
            Criterion::Keywords { .. } => "keywords",
            Criterion::ManaCost { .. } => "manaCost",
            Criterion::ConvertedCost(_) => "convertedManaCost",
            Criterion::Attack(_) => "attack",
            Criterion::Defense(_) => "defense",
            Criterion::Strength(_) => "strength",
            Criterion::Sets { .. } => "sets",
            Criterion::Rarity { .. } => "rarity",
            Criterion::Collector(_) => "collectorNumber",
            Criterion::Price { .. } => "priceRange",
            Criterion::Artist { .. } => "artist",
            Criterion::FlavorText { .. } => "flavorText",
            Criterion::Formats { .. } => "formats",
            Criterion::Language { .. } => "language",
            Criterion::Custom { .. } => "criteria",
            Criterion::ExcludeTokens => "includeTokens",
            Criterion::ExcludeExtras => "includeExtras",
        }
    }

    /// Token and extra exclusions narrow the searched pool instead of
    /// taking part in `and`/`or` combination.
    #[must_use]
    pub fn is_scope(&self) -> bool {
        matches!(self, Criterion::ExcludeTokens | Criterion::ExcludeExtras)
    }
}

/// Normalized criteria plus the global combination mode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaSet {
    pub criteria: Vec<Criterion>,
    pub mode: CombineMode,
}

impl CriteriaSet {
    /// Normalize a criteria object.
    ///
    /// ```
    /// use card_query::criteria::{CriteriaSet, SearchCriteria};
    ///
    /// let criteria = SearchCriteria {
    ///     card_name: Some(String::new()),
    ///     rarity: vec!["Rare".into()],
    ///     ..SearchCriteria::default()
    /// };
    /// let set = CriteriaSet::from_criteria(&criteria);
    /// assert_eq!(set.len(), 1);
    /// ```
    #[must_use]
    pub fn from_criteria(c: &SearchCriteria) -> Self {
        let mut out = Vec::new();
        let cs = c.case_sensitive;

        if let Some(value) = non_blank(&c.card_name) {
            out.push(Criterion::Name {
                value,
                mode: parse_mode(&c.name_comparison, StringMatch::parse),
                case_sensitive: cs,
            });
        }
        if let Some(value) = non_blank(&c.text) {
            out.push(Criterion::Text {
                value,
                mode: parse_mode(&c.text_comparison, TextComparison::parse),
                case_sensitive: cs,
            });
        }
        if let Some(value) = non_blank(&c.type_line) {
            out.push(Criterion::TypeLine {
                value,
                partial: c.allow_partial_types.unwrap_or(true),
                mode: parse_mode(&c.type_comparison, InclusionMode::parse),
                case_sensitive: cs,
            });
        }
        if let Some(types) = non_blank_list(&c.selected_types) {
            out.push(Criterion::SelectedTypes {
                types,
                mode: parse_mode(&c.type_comparison, InclusionMode::parse),
            });
        }
        if let Some(elements) = non_blank_list(&c.elements) {
            out.push(Criterion::Elements {
                elements,
                mode: parse_mode(&c.element_comparison, ElementComparison::parse),
            });
        }
        if let Some(identity) = non_blank_list(&c.element_identity) {
            out.push(Criterion::ElementIdentity(identity));
        }
        if let Some(keywords) = non_blank_list(&c.keywords) {
            out.push(Criterion::Keywords {
                keywords,
                mode: parse_mode(&c.keyword_comparison, KeywordComparison::parse),
            });
        }
        if let Some(value) = non_blank(&c.mana_cost) {
            out.push(Criterion::ManaCost {
                value,
                mode: parse_mode(&c.mana_cost_comparison, ManaCostComparison::parse),
            });
        }

        let stat = |input: &Option<StatInput>| input.as_ref().and_then(StatFilter::from_input);
        if let Some(filter) = stat(&c.converted_mana_cost) {
            out.push(Criterion::ConvertedCost(filter));
        }
        if let Some(filter) = stat(&c.attack) {
            out.push(Criterion::Attack(filter));
        }
        if let Some(filter) = stat(&c.defense) {
            out.push(Criterion::Defense(filter));
        }
        if let Some(filter) = stat(&c.strength) {
            out.push(Criterion::Strength(filter));
        }

        if let Some(sets) = non_blank_list(&c.sets) {
            out.push(Criterion::Sets {
                sets,
                mode: parse_mode(&c.set_comparison, InclusionMode::parse),
            });
        }
        if let Some(rarities) = non_blank_list(&c.rarity) {
            out.push(Criterion::Rarity {
                rarities,
                mode: parse_mode(&c.rarity_comparison, InclusionMode::parse),
            });
        }
        if let Some(filter) = collector_filter(c) {
            out.push(Criterion::Collector(filter));
        }
        if let Some(range) = c.price_range.as_ref().filter(|r| !r.is_empty()) {
            let (min, max) = (parse_price(&range.min), parse_price(&range.max));
            if min.is_some() || max.is_some() {
                out.push(Criterion::Price {
                    min,
                    max,
                    mode: parse_mode(&c.price_comparison, PriceComparison::parse),
                });
            }
        }
        if let Some(value) = non_blank(&c.artist) {
            out.push(Criterion::Artist {
                value,
                mode: parse_mode(&c.artist_comparison, StringMatch::parse),
                case_sensitive: cs,
            });
        }
        if let Some(value) = non_blank(&c.flavor_text) {
            out.push(Criterion::FlavorText {
                value,
                mode: parse_mode(&c.flavor_comparison, TextComparison::parse),
                case_sensitive: cs,
            });
        }
        if let Some(formats) = non_blank_list(&c.formats) {
            out.push(Criterion::Formats {
                formats,
                status: parse_mode(&c.format_status, FormatStatus::parse),
            });
        }
        if let Some(code) = non_blank(&c.language) {
            out.push(Criterion::Language {
                code,
                include_translations: c.include_translations,
            });
        }
        if let Some(terms) = non_blank_list(&c.criteria) {
            out.push(Criterion::Custom {
                terms,
                mode: parse_mode(&c.criteria_comparison, InclusionMode::parse),
            });
        }
        if c.include_tokens == Some(false) {
            out.push(Criterion::ExcludeTokens);
        }
        if c.include_extras == Some(false) {
            out.push(Criterion::ExcludeExtras);
        }

        Self {
            criteria: out,
            mode: parse_mode(&c.search_mode, CombineMode::parse),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn non_blank_list(values: &[String]) -> Option<Vec<String>> {
    let kept: Vec<String> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    (!kept.is_empty()).then_some(kept)
}

fn parse_mode<T: Default>(mode: &Option<String>, parse: fn(&str) -> Option<T>) -> T {
    mode.as_deref().and_then(parse).unwrap_or_default()
}

fn parse_price(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

fn parse_bound(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

fn collector_filter(c: &SearchCriteria) -> Option<CollectorFilter> {
    let exact = non_blank(&c.collector_number).map(CollectorFilter::Exact);
    let range = c
        .collector_range
        .as_ref()
        .filter(|r| !r.is_empty())
        .map(|r: &RangeInput| CollectorFilter::Range {
            min: parse_bound(&r.min),
            max: parse_bound(&r.max),
        })
        .filter(|r| !matches!(r, CollectorFilter::Range { min: None, max: None }));

    match c
        .collector_comparison
        .as_deref()
        .and_then(CollectorComparison::parse)
    {
        Some(CollectorComparison::Exact) => exact,
        Some(CollectorComparison::Range) => range,
        None => exact.or(range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(criteria: &SearchCriteria) -> CriteriaSet {
        CriteriaSet::from_criteria(criteria)
    }

    #[test]
    fn test_default_criteria_is_empty() {
        let set = set(&SearchCriteria::default());
        assert!(set.is_empty());
        assert_eq!(set.mode, CombineMode::And);
    }

    #[test]
    fn test_form_defaults_are_trivial() {
        let json = r#"{
            "cardName": "  ",
            "elements": ["", " "],
            "convertedManaCost": {"operator": "=", "value": ""},
            "collectorRange": {"min": "", "max": ""},
            "priceRange": {"min": "", "max": ""},
            "includeTokens": true,
            "searchMode": "or"
        }"#;
        let criteria: SearchCriteria = serde_json::from_str(json).unwrap();
        let set = set(&criteria);
        assert!(set.is_empty());
        assert_eq!(set.mode, CombineMode::Or);
    }

    #[test]
    fn test_missing_comparator_is_permissive() {
        let criteria = SearchCriteria {
            card_name: Some("ember".into()),
            name_comparison: Some("fuzzy".into()),
            ..SearchCriteria::default()
        };
        assert_eq!(
            set(&criteria).criteria,
            vec![Criterion::Name {
                value: "ember".into(),
                mode: StringMatch::Contains,
                case_sensitive: false,
            }]
        );
    }

    #[test]
    fn test_stat_filter_parsing() {
        let filter = StatFilter::from_input(&StatInput::new("≥", "3")).unwrap();
        assert_eq!(filter.op, Some(CompareOp::Ge));
        assert_eq!(filter.target, StatTarget::Int(3));

        let star = StatFilter::from_input(&StatInput::new("=", "*")).unwrap();
        assert_eq!(star.target, StatTarget::Symbol("*".into()));

        let junk = StatFilter::from_input(&StatInput::new("<", "abc")).unwrap();
        assert_eq!(junk.target, StatTarget::Invalid);
        assert!(!junk.matches_value(1));

        assert!(StatFilter::from_input(&StatInput::new("=", "")).is_none());
    }

    #[test]
    fn test_unknown_stat_operator_matches_everything() {
        let filter = StatFilter::from_input(&StatInput::new("~", "5")).unwrap();
        assert!(filter.op.is_none());
        assert!(filter.matches_value(1));
        assert!(filter.matches_stat(None));
    }

    #[test]
    fn test_stat_symbol_matching() {
        let star = StatFilter::from_input(&StatInput::new("=", "*")).unwrap();
        assert!(star.matches_stat(Some(&Stat::Text("*".into()))));
        assert!(!star.matches_stat(Some(&Stat::Number(3))));
        assert!(!star.matches_stat(None));
    }

    #[test]
    fn test_collector_filter_inference() {
        let exact = SearchCriteria {
            collector_number: Some("12a".into()),
            ..SearchCriteria::default()
        };
        assert_eq!(
            set(&exact).criteria,
            vec![Criterion::Collector(CollectorFilter::Exact("12a".into()))]
        );

        let range = SearchCriteria {
            collector_range: Some(RangeInput::new("10", "")),
            ..SearchCriteria::default()
        };
        assert_eq!(
            set(&range).criteria,
            vec![Criterion::Collector(CollectorFilter::Range {
                min: Some(10),
                max: None
            })]
        );

        let mismatched = SearchCriteria {
            collector_number: Some("12".into()),
            collector_comparison: Some("range".into()),
            ..SearchCriteria::default()
        };
        assert!(set(&mismatched).is_empty());
    }

    #[test]
    fn test_explicit_token_exclusion() {
        let criteria = SearchCriteria {
            include_tokens: Some(false),
            include_extras: Some(false),
            ..SearchCriteria::default()
        };
        let keys: Vec<_> = set(&criteria).criteria.iter().map(Criterion::key).collect();
        assert_eq!(keys, vec!["includeTokens", "includeExtras"]);
    }

    #[test]
    fn test_rarity_excluding() {
        let criteria = SearchCriteria {
            rarity: vec!["rare".into()],
            rarity_comparison: Some("excluding".into()),
            ..SearchCriteria::default()
        };
        assert_eq!(
            set(&criteria).criteria,
            vec![Criterion::Rarity {
                rarities: vec!["rare".into()],
                mode: InclusionMode::Excluding,
            }]
        );
    }
}
