//! In-memory card catalog.
//!
//! `CardCatalog` keeps records in insertion order (the order searches
//! return them in) with an id index for lookup.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{CatalogError, QueryResult, SearchConfig};
use crate::criteria::SearchCriteria;
use crate::results::{ResultEntry, ResultOptions};
use crate::search;

use super::record::CardRecord;

/// Card field enumerated by `CardCatalog::unique_values`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardField {
    Type,
    Rarity,
    Set,
    Artist,
    Language,
    Element,
    Keyword,
}

impl CardField {
    fn values(self, card: &CardRecord) -> Vec<String> {
        let single =
            |v: Option<&str>| -> Vec<String> { v.map(str::to_string).into_iter().collect() };
        match self {
            CardField::Type => single(Some(card.card_type.as_str()).filter(|t| !t.is_empty())),
            CardField::Rarity => single(card.rarity.as_deref()),
            CardField::Set => single(card.set.as_deref()),
            CardField::Artist => single(card.artist.as_deref()),
            CardField::Language => single(card.language.as_deref()),
            CardField::Element => card.element_names().into_iter().map(str::to_string).collect(),
            CardField::Keyword => card.keyword_list(),
        }
    }
}

/// Collection summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total_cards: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_rarity: BTreeMap<String, usize>,
    pub by_element: BTreeMap<String, usize>,
    pub by_set: BTreeMap<String, usize>,
    /// Buckets `0`..`6` and `7+` by converted cost.
    pub cost_distribution: BTreeMap<String, usize>,
    pub average_cost: f64,
    /// Sum of average prices.
    pub total_value: f64,
}

/// Ordered card collection.
///
/// ## Example
///
/// ```
/// use card_query::cards::{CardCatalog, CardRecord};
///
/// let mut catalog = CardCatalog::new();
/// catalog.insert(CardRecord::new("c1", "Ember Sprite", "Familiar")).unwrap();
///
/// assert_eq!(catalog.get("c1").unwrap().name, "Ember Sprite");
/// assert!(catalog.insert(CardRecord::new("c1", "Copy", "Familiar")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardRecord>,
    index: FxHashMap<String, usize>,
}

impl CardCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records, rejecting duplicate ids.
    pub fn from_cards(cards: impl IntoIterator<Item = CardRecord>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert(card)?;
        }
        Ok(catalog)
    }

    /// Decode a JSON array of card records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<CardRecord> = serde_json::from_str(json)?;
        Self::from_cards(cards)
    }

    /// Append a record.
    pub fn insert(&mut self, card: CardRecord) -> Result<(), CatalogError> {
        if self.index.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId(card.id));
        }
        self.index.insert(card.id.clone(), self.cards.len());
        self.cards.push(card);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CardRecord> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CardRecord] {
        &self.cards
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardRecord>
    where
        F: Fn(&CardRecord) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }

    /// DSL search with substring fallback.
    #[must_use]
    pub fn search(&self, query: &str, config: &SearchConfig) -> Vec<&CardRecord> {
        search::parse_search_query(query, &self.cards, config)
    }

    /// DSL search that reports parse errors.
    pub fn try_search(&self, query: &str, config: &SearchConfig) -> QueryResult<Vec<&CardRecord>> {
        search::search_query(query, &self.cards, config)
    }

    /// DSL search with sorting, pagination and grouping.
    #[must_use]
    pub fn search_with_options(
        &self,
        query: &str,
        options: &ResultOptions,
        config: &SearchConfig,
    ) -> Vec<ResultEntry<'_>> {
        search::search_query_with_options(query, &self.cards, options, config)
    }

    /// Criteria-object search.
    #[must_use]
    pub fn search_criteria(
        &self,
        criteria: &SearchCriteria,
        config: &SearchConfig,
    ) -> Vec<ResultEntry<'_>> {
        search::search_cards(&self.cards, criteria, config)
    }

    /// Sorted distinct values of a field across the catalog.
    #[must_use]
    pub fn unique_values(&self, field: CardField) -> Vec<String> {
        self.cards
            .iter()
            .flat_map(|card| field.values(card))
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Summarize the catalog.
    #[must_use]
    pub fn stats(&self) -> CollectionStats {
        let mut stats = CollectionStats {
            total_cards: self.cards.len(),
            ..CollectionStats::default()
        };
        for bucket in ["0", "1", "2", "3", "4", "5", "6", "7+"] {
            stats.cost_distribution.insert(bucket.to_string(), 0);
        }

        let mut total_cost = 0i64;
        for card in &self.cards {
            let card_type = if card.card_type.is_empty() {
                "Unknown"
            } else {
                card.card_type.as_str()
            };
            *stats.by_type.entry(card_type.to_string()).or_default() += 1;
            *stats
                .by_rarity
                .entry(card.rarity.clone().unwrap_or_else(|| "Unknown".into()))
                .or_default() += 1;
            *stats
                .by_set
                .entry(card.set.clone().unwrap_or_else(|| "Unknown".into()))
                .or_default() += 1;
            for element in card.element_names() {
                *stats.by_element.entry(element.to_string()).or_default() += 1;
            }

            let cost = card.converted_cost();
            let bucket = if cost >= 7 {
                "7+".to_string()
            } else {
                cost.max(0).to_string()
            };
            *stats.cost_distribution.entry(bucket).or_default() += 1;
            total_cost += cost;

            stats.total_value += card.average_price().unwrap_or(0.0);
        }

        if !self.cards.is_empty() {
            stats.average_cost = total_cost as f64 / self.cards.len() as f64;
        }
        stats
    }
}

impl FromIterator<CardRecord> for CardCatalog {
    /// Collects records, keeping the first record for each id.
    fn from_iter<I: IntoIterator<Item = CardRecord>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for card in iter {
            let _ = catalog.insert(card);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CardCatalog {
        CardCatalog::from_cards([
            CardRecord::new("1", "Ember Sprite", "Familiar")
                .with_elements(["Fire"])
                .with_cost_tokens(["Fire", "Fire"])
                .with_rarity("Common")
                .with_set("Origins")
                .with_price(1.5),
            CardRecord::new("2", "Tidal Guard", "Familiar")
                .with_elements(["Water", "Earth"])
                .with_cost_tokens(["Water"; 8])
                .with_rarity("Rare")
                .with_price(2.5),
            CardRecord::new("3", "Banner", "ΦLAG").with_keywords(["Gust"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_insert_and_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("2"));
        assert_eq!(catalog.get("3").unwrap().name, "Banner");
        assert!(catalog.get("99").is_none());
        let order: Vec<_> = catalog.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["1", "2", "3"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = catalog();
        let err = catalog
            .insert(CardRecord::new("1", "Again", "Familiar"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "1"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_from_iter_keeps_first() {
        let catalog: CardCatalog = vec![
            CardRecord::new("1", "First", "X"),
            CardRecord::new("1", "Second", "X"),
        ]
        .into_iter()
        .collect();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("1").unwrap().name, "First");
    }

    #[test]
    fn test_from_json() {
        let catalog =
            CardCatalog::from_json(r#"[{"id": "a", "name": "A", "type": "Familiar"}]"#).unwrap();
        assert_eq!(catalog.get("a").unwrap().card_type, "Familiar");
        assert!(CardCatalog::from_json("{").is_err());
    }

    #[test]
    fn test_unique_values() {
        let catalog = catalog();
        assert_eq!(catalog.unique_values(CardField::Type), ["Familiar", "ΦLAG"]);
        assert_eq!(catalog.unique_values(CardField::Element), ["Earth", "Fire", "Water"]);
        assert_eq!(catalog.unique_values(CardField::Rarity), ["Common", "Rare"]);
        assert_eq!(catalog.unique_values(CardField::Keyword), ["Gust"]);
    }

    #[test]
    fn test_stats() {
        let stats = catalog().stats();
        assert_eq!(stats.total_cards, 3);
        assert_eq!(stats.by_type["Familiar"], 2);
        assert_eq!(stats.by_rarity["Unknown"], 1);
        assert_eq!(stats.by_set["Unknown"], 2);
        assert_eq!(stats.by_element["Water"], 1);
        assert_eq!(stats.cost_distribution["0"], 1);
        assert_eq!(stats.cost_distribution["2"], 1);
        assert_eq!(stats.cost_distribution["7+"], 1);
        assert!((stats.average_cost - 10.0 / 3.0).abs() < 1e-9);
        assert!((stats.total_value - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = CardCatalog::new().stats();
        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.average_cost, 0.0);
        assert_eq!(stats.cost_distribution.len(), 8);
    }

    #[test]
    fn test_catalog_search() {
        let catalog = catalog();
        let config = SearchConfig::default();
        assert_eq!(catalog.search("t:familiar", &config).len(), 2);
        assert!(catalog.try_search("t:", &config).is_err());
    }
}
