//! Result grouping with synthetic header records.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardRecord;

/// Grouping key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Set,
    Type,
    Element,
    Rarity,
    Artist,
}

impl GroupBy {
    /// Parse a grouping name. `none` and unknown names disable grouping.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "set" => Some(GroupBy::Set),
            "type" => Some(GroupBy::Type),
            "element" => Some(GroupBy::Element),
            "rarity" => Some(GroupBy::Rarity),
            "artist" => Some(GroupBy::Artist),
            _ => None,
        }
    }

    /// Bucket label for a card lacking this field.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            GroupBy::Set => "Unknown Set",
            GroupBy::Type => "Unknown Type",
            GroupBy::Element => "Neutral",
            GroupBy::Rarity => "Unknown Rarity",
            GroupBy::Artist => "Unknown Artist",
        }
    }

    /// Bucket label for a card.
    #[must_use]
    pub fn label(self, card: &CardRecord) -> String {
        let value = match self {
            GroupBy::Set => card.set.as_deref(),
            GroupBy::Type => Some(card.card_type.as_str()),
            GroupBy::Element => card.element_names().first().copied(),
            GroupBy::Rarity => card.rarity.as_deref(),
            GroupBy::Artist => card.artist.as_deref(),
        };
        value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(self.default_label())
            .to_string()
    }
}

/// Synthetic record opening a bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupHeader {
    pub is_group_header: bool,
    pub group_name: String,
    pub count: usize,
}

impl GroupHeader {
    #[must_use]
    pub fn new(group_name: impl Into<String>, count: usize) -> Self {
        Self {
            is_group_header: true,
            group_name: group_name.into(),
            count,
        }
    }
}

/// One item of a result sequence: a card, or a header when grouped.
///
/// Serializes untagged, so a sequence renders as the plain JSON array of
/// cards and `{isGroupHeader, groupName, count}` objects.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultEntry<'a> {
    Header(GroupHeader),
    Card(&'a CardRecord),
}

impl<'a> ResultEntry<'a> {
    #[must_use]
    pub fn as_card(&self) -> Option<&'a CardRecord> {
        match self {
            ResultEntry::Card(card) => Some(card),
            ResultEntry::Header(_) => None,
        }
    }

    #[must_use]
    pub fn as_header(&self) -> Option<&GroupHeader> {
        match self {
            ResultEntry::Header(header) => Some(header),
            ResultEntry::Card(_) => None,
        }
    }

    #[must_use]
    pub fn is_header(&self) -> bool {
        matches!(self, ResultEntry::Header(_))
    }
}

/// Wrap cards as entries without grouping.
#[must_use]
pub fn ungrouped(cards: Vec<&CardRecord>) -> Vec<ResultEntry<'_>> {
    cards.into_iter().map(ResultEntry::Card).collect()
}

/// Bucket cards by label, keeping buckets in first-encountered order and
/// cards in input order within each bucket.
#[must_use]
pub fn group_cards(cards: Vec<&CardRecord>, by: GroupBy) -> Vec<ResultEntry<'_>> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut buckets: Vec<(String, Vec<&CardRecord>)> = Vec::new();

    for card in cards {
        let label = by.label(card);
        match index.get(&label) {
            Some(&i) => buckets[i].1.push(card),
            None => {
                index.insert(label.clone(), buckets.len());
                buckets.push((label, vec![card]));
            }
        }
    }

    let mut out = Vec::with_capacity(buckets.iter().map(|(_, b)| b.len() + 1).sum());
    for (label, bucket) in buckets {
        out.push(ResultEntry::Header(GroupHeader::new(label, bucket.len())));
        out.extend(bucket.into_iter().map(ResultEntry::Card));
    }
    out
}
