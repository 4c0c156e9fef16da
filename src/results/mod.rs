//! Result processing: sort, paginate, group.
//!
//! ## Key Types
//!
//! - `SortKey` / `SortOrder`: stable sort with rarity ranks and a seeded `random`
//! - `GroupBy`: bucket labels with defaults for missing fields
//! - `ResultEntry`: a card or a `GroupHeader`
//! - `ResultOptions`: which of the above to apply

pub mod group;
pub mod sort;

pub use group::{group_cards, ungrouped, GroupBy, GroupHeader, ResultEntry};
pub use sort::{compare_cards, rarity_rank, sort_cards, SortKey, SortOrder};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cards::CardRecord;
use crate::core::{SearchConfig, SortRng};
use crate::criteria::SearchCriteria;

/// Post-match processing options.
///
/// Applied in order: sort, then `offset`/`limit`, then grouping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResultOptions {
    pub sort_by: Option<SortKey>,
    pub sort_order: SortOrder,
    pub group_by: Option<GroupBy>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl ResultOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the result keys of a criteria object. Unknown sort or group
    /// names disable that step.
    #[must_use]
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        Self {
            sort_by: criteria.sort_by.as_deref().and_then(SortKey::parse),
            sort_order: criteria
                .sort_order
                .as_deref()
                .map_or(SortOrder::Asc, SortOrder::parse),
            group_by: criteria.group_by.as_deref().and_then(GroupBy::parse),
            limit: criteria.limit,
            offset: criteria.offset.unwrap_or(0),
        }
    }

    #[must_use]
    pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_by = Some(key);
        self.sort_order = order;
        self
    }

    #[must_use]
    pub fn with_group(mut self, by: GroupBy) -> Self {
        self.group_by = Some(by);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// Skip `offset` items and keep at most `limit`.
#[must_use]
pub fn paginate<T>(items: Vec<T>, offset: usize, limit: Option<usize>) -> Vec<T> {
    items
        .into_iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Sort, paginate and group matched cards.
#[must_use]
pub fn process_results<'a>(
    mut cards: Vec<&'a CardRecord>,
    options: &ResultOptions,
    config: &SearchConfig,
) -> Vec<ResultEntry<'a>> {
    let mut rng = SortRng::new(config.random_seed).for_context("sort");
    sort_cards(&mut cards, options.sort_by, options.sort_order, &mut rng);

    let cards = paginate(cards, options.offset, options.limit);
    debug!(
        "processing {} results (sort {:?}, group {:?})",
        cards.len(),
        options.sort_by,
        options.group_by
    );

    match options.group_by {
        Some(by) => group_cards(cards, by),
        None => ungrouped(cards),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[ResultEntry<'_>]) -> Vec<String> {
        entries
            .iter()
            .map(|e| match e {
                ResultEntry::Card(card) => card.name.clone(),
                ResultEntry::Header(h) => format!("[{}:{}]", h.group_name, h.count),
            })
            .collect()
    }

    #[test]
    fn test_paginate() {
        assert_eq!(paginate(vec![1, 2, 3, 4], 1, Some(2)), vec![2, 3]);
        assert_eq!(paginate(vec![1, 2], 5, None), Vec::<i32>::new());
        assert_eq!(paginate(vec![1, 2], 0, None), vec![1, 2]);
    }

    #[test]
    fn test_options_from_criteria() {
        let criteria = SearchCriteria {
            sort_by: Some("rarity".into()),
            sort_order: Some("desc".into()),
            group_by: Some("none".into()),
            limit: Some(10),
            ..SearchCriteria::default()
        };
        let options = ResultOptions::from_criteria(&criteria);
        assert_eq!(options.sort_by, Some(SortKey::Rarity));
        assert_eq!(options.sort_order, SortOrder::Desc);
        assert_eq!(options.group_by, None);
        assert_eq!(options.limit, Some(10));
        assert_eq!(options.offset, 0);
    }

    #[test]
    fn test_sort_then_page_then_group() {
        let cards = [
            CardRecord::new("1", "Delta", "X").with_set("B"),
            CardRecord::new("2", "Alpha", "X").with_set("A"),
            CardRecord::new("3", "Charlie", "X").with_set("B"),
            CardRecord::new("4", "Bravo", "X").with_set("A"),
        ];
        let options = ResultOptions::new()
            .with_sort(SortKey::Name, SortOrder::Asc)
            .with_offset(1)
            .with_limit(2)
            .with_group(GroupBy::Set);

        let entries = process_results(cards.iter().collect(), &options, &SearchConfig::default());
        assert_eq!(names(&entries), ["[A:1]", "Bravo", "[B:1]", "Charlie"]);
    }

    #[test]
    fn test_options_json() {
        let options: ResultOptions =
            serde_json::from_str(r#"{"sortBy": "price", "sortOrder": "desc", "limit": 5}"#).unwrap();
        assert_eq!(options.sort_by, Some(SortKey::Price));
        assert_eq!(options.sort_order, SortOrder::Desc);
        assert_eq!(options.limit, Some(5));
    }
}
