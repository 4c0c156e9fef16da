//! Parsed filters and the per-call `FilterSet`.
//!
//! The parser emits one `FilterKind` per token. A `FilterSet` sorts those
//! into one list per category; an empty list places no constraint.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::numeric::NumericFilter;

/// Inline storage for a category's values. Most queries use one or two.
pub type Terms<T> = SmallVec<[T; 2]>;

/// Free-text term.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextTerm {
    /// Bare word or quoted phrase.
    Plain(String),
    /// `key:value` with an unrecognized key, searched as the literal text.
    Field { key: String, value: String },
}

impl TextTerm {
    /// The text this term searches for.
    #[must_use]
    pub fn search_text(&self) -> String {
        match self {
            TextTerm::Plain(text) => text.clone(),
            TextTerm::Field { key, value } => format!("{key}:{value}"),
        }
    }
}

/// Type-line filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeFilter {
    /// Substring of the type line.
    Contains(String),
    /// `is:<class>` pseudo-filter.
    Is(String),
}

/// Element or keyword filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolFilter {
    /// Membership by name or glyph.
    Named(String),
    /// Comparison on the number of populated entries.
    Count(NumericFilter),
}

/// Cost filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostFilter {
    /// Comparison on converted cost.
    Converted(NumericFilter),
    /// `mana:` substring of the raw mana string.
    ManaPattern(String),
}

/// Set filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetFilter {
    Named(String),
    /// `game:<format>` legality filter.
    Game(String),
}

/// Logical marker token. Recorded, not evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicOp {
    And,
    Or,
}

/// One classified query token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    Text(TextTerm),
    Type(TypeFilter),
    Element(SymbolFilter),
    Keyword(SymbolFilter),
    Cost(CostFilter),
    Rarity(String),
    Set(SetFilter),
    Oracle(String),
    Exclude(String),
    Logic(LogicOp),
}

/// All constraints of one DSL search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub text: Terms<TextTerm>,
    pub types: Terms<TypeFilter>,
    pub elements: Terms<SymbolFilter>,
    pub keywords: Terms<SymbolFilter>,
    pub costs: Terms<CostFilter>,
    pub rarities: Terms<String>,
    pub sets: Terms<SetFilter>,
    pub oracle: Terms<String>,
    pub exclude: Terms<String>,
    pub operators: Terms<LogicOp>,
}

impl FilterSet {
    /// Create an empty filter set (accepts every card).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter to its category (builder pattern).
    #[must_use]
    pub fn with(mut self, filter: FilterKind) -> Self {
        self.push(filter);
        self
    }

    fn push(&mut self, filter: FilterKind) {
        match filter {
            FilterKind::Text(term) => self.text.push(term),
            FilterKind::Type(t) => self.types.push(t),
            FilterKind::Element(e) => self.elements.push(e),
            FilterKind::Keyword(k) => self.keywords.push(k),
            FilterKind::Cost(c) => self.costs.push(c),
            FilterKind::Rarity(r) => self.rarities.push(r),
            FilterKind::Set(s) => self.sets.push(s),
            FilterKind::Oracle(o) => self.oracle.push(o),
            FilterKind::Exclude(x) => self.exclude.push(x),
            FilterKind::Logic(op) => self.operators.push(op),
        }
    }

    /// Number of positive categories with at least one value.
    #[must_use]
    pub fn populated_categories(&self) -> usize {
        [
            !self.text.is_empty(),
            !self.types.is_empty(),
            !self.elements.is_empty(),
            !self.keywords.is_empty(),
            !self.costs.is_empty(),
            !self.rarities.is_empty(),
            !self.sets.is_empty(),
            !self.oracle.is_empty(),
        ]
        .into_iter()
        .filter(|populated| *populated)
        .count()
    }

    /// True when no category (exclusions included) constrains anything.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.populated_categories() == 0 && self.exclude.is_empty()
    }
}

impl FromIterator<FilterKind> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterKind>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for filter in iter {
            set.push(filter);
        }
        set
    }
}
