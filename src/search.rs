//! Search entry points.
//!
//! - `parse_search_query`: DSL query, never fails; parse errors fall back
//!   to `simple_text_search` over the raw query
//! - `search_query`: DSL query with the parse error surfaced
//! - `search_query_with_options`: DSL query plus sort/page/group
//! - `search_cards`: criteria object, including its own result keys

use log::{debug, warn};

use crate::cards::CardRecord;
use crate::core::{QueryResult, SearchConfig};
use crate::criteria::{CriteriaSet, SearchCriteria};
use crate::matcher::{simple_text_search, CardFilter, CriteriaMatcher, DslMatcher};
use crate::query::parse_query;
use crate::results::{process_results, ResultEntry, ResultOptions};

/// Run a DSL query, falling back to substring search when it cannot be
/// parsed. Queries shorter than `min_query_len` (after trimming) return
/// nothing.
///
/// ```
/// use card_query::cards::CardRecord;
/// use card_query::core::SearchConfig;
/// use card_query::parse_search_query;
///
/// let cards = vec![
///     CardRecord::new("1", "Ember Sprite", "Familiar").with_elements(["Fire"]),
///     CardRecord::new("2", "Tidal Guard", "Familiar").with_elements(["Water"]),
/// ];
/// let config = SearchConfig::default();
///
/// assert_eq!(parse_search_query("e:fire", &cards, &config).len(), 1);
/// assert!(parse_search_query("e", &cards, &config).is_empty());
/// ```
#[must_use]
pub fn parse_search_query<'a>(
    query: &str,
    cards: &'a [CardRecord],
    config: &SearchConfig,
) -> Vec<&'a CardRecord> {
    if query.trim().chars().count() < config.min_query_len {
        debug!("query {:?} below minimum length {}", query, config.min_query_len);
        return Vec::new();
    }

    match search_query(query, cards, config) {
        Ok(found) => found,
        Err(err) => {
            warn!("query {:?} not parsed ({}), using substring search", query, err);
            simple_text_search(query, cards)
        }
    }
}

/// Parse and evaluate a DSL query.
pub fn search_query<'a>(
    query: &str,
    cards: &'a [CardRecord],
    config: &SearchConfig,
) -> QueryResult<Vec<&'a CardRecord>> {
    let filters = parse_query(query)?;
    let found = DslMatcher::new(&filters, config).filter(cards);
    debug!("query {:?} matched {} of {} cards", query, found.len(), cards.len());
    Ok(found)
}

/// DSL search followed by result processing.
#[must_use]
pub fn search_query_with_options<'a>(
    query: &str,
    cards: &'a [CardRecord],
    options: &ResultOptions,
    config: &SearchConfig,
) -> Vec<ResultEntry<'a>> {
    let found = parse_search_query(query, cards, config);
    process_results(found, options, config)
}

/// Criteria-object search. Sorting, pagination and grouping come from the
/// criteria's own `sortBy`, `sortOrder`, `limit`, `offset` and `groupBy`.
#[must_use]
pub fn search_cards<'a>(
    cards: &'a [CardRecord],
    criteria: &SearchCriteria,
    config: &SearchConfig,
) -> Vec<ResultEntry<'a>> {
    let set = CriteriaSet::from_criteria(criteria);
    let found = CriteriaMatcher::new(&set, config).filter(cards);
    debug!(
        "criteria search: {} constraints ({:?}) matched {} of {} cards",
        set.len(),
        set.mode,
        found.len(),
        cards.len()
    );
    process_results(found, &ResultOptions::from_criteria(criteria), config)
}
