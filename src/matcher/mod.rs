//! Card predicates.
//!
//! Both search paths reduce to a `CardFilter`: the DSL path builds a
//! `DslMatcher` over a parsed `FilterSet`, the criteria path a
//! `CriteriaMatcher` over a normalized `CriteriaSet`.

pub mod criteria;
pub mod dsl;
pub mod text;

pub use criteria::{string_match, text_match, CriteriaMatcher};
pub use dsl::{matches_cost, matches_element, matches_keyword, matches_oracle, DslMatcher};
pub use text::{contains_text, matches_card_text, simple_text_search};

use crate::cards::CardRecord;

/// A predicate over card records.
pub trait CardFilter {
    /// Does the card pass?
    fn matches(&self, card: &CardRecord) -> bool;

    /// Keep the passing cards, in input order.
    fn filter<'c>(&self, cards: &'c [CardRecord]) -> Vec<&'c CardRecord> {
        cards.iter().filter(|card| self.matches(card)).collect()
    }
}
