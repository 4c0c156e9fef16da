//! Shared text predicates and the fallback substring search.

use crate::cards::CardRecord;

/// Substring test with optional case folding.
#[must_use]
pub fn contains_text(haystack: &str, needle: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        haystack.contains(needle)
    } else {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Does `text` appear in the card's name, rules text or type line?
#[must_use]
pub fn matches_card_text(card: &CardRecord, text: &str, case_sensitive: bool) -> bool {
    contains_text(&card.name, text, case_sensitive)
        || contains_text(card.rules_text(), text, case_sensitive)
        || contains_text(&card.card_type, text, case_sensitive)
}

/// Case-insensitive substring search of the raw query over name, rules
/// text and type. Used when a query cannot be parsed.
///
/// ```
/// use card_query::cards::CardRecord;
/// use card_query::matcher::simple_text_search;
///
/// let cards = vec![
///     CardRecord::new("1", "Ember Sprite", "Familiar"),
///     CardRecord::new("2", "Tidal Guard", "Familiar"),
/// ];
/// let found = simple_text_search("ember", &cards);
/// assert_eq!(found.len(), 1);
/// ```
#[must_use]
pub fn simple_text_search<'a>(query: &str, cards: &'a [CardRecord]) -> Vec<&'a CardRecord> {
    cards
        .iter()
        .filter(|card| matches_card_text(card, query, false))
        .collect()
}
