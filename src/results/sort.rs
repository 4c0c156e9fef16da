//! Result sorting.
//!
//! Sorts are stable. `desc` reverses the comparison, so ties keep their
//! input order in both directions. `random` is a seeded shuffle.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::CardRecord;
use crate::core::SortRng;

/// Sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Cost,
    Type,
    Rarity,
    Set,
    Collector,
    Artist,
    Power,
    Toughness,
    Price,
    Random,
}

impl SortKey {
    /// Parse a key name. Unknown names yield `None` (no sorting).
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "cost" => Some(SortKey::Cost),
            "type" => Some(SortKey::Type),
            "rarity" => Some(SortKey::Rarity),
            "set" => Some(SortKey::Set),
            "collector" => Some(SortKey::Collector),
            "artist" => Some(SortKey::Artist),
            "power" => Some(SortKey::Power),
            "toughness" => Some(SortKey::Toughness),
            "price" => Some(SortKey::Price),
            "random" => Some(SortKey::Random),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` (any case) is descending, anything else ascending.
    #[must_use]
    pub fn parse(order: &str) -> Self {
        if order.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

const RARITY_RANKS: [&str; 6] = ["common", "uncommon", "rare", "mythic", "special", "legendary"];

/// Rank in `Common < Uncommon < Rare < Mythic < Special < Legendary`.
/// Unranked rarities sort first with 0.
#[must_use]
pub fn rarity_rank(rarity: &str) -> usize {
    let rarity = rarity.trim().to_lowercase();
    RARITY_RANKS
        .iter()
        .position(|r| *r == rarity)
        .map_or(0, |i| i + 1)
}

/// Case-insensitive text order. A missing value sorts as the empty string.
fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    let fold = |s: Option<&str>| s.unwrap_or("").to_lowercase();
    fold(a).cmp(&fold(b))
}

/// Compare two cards by a key. `Random` compares equal.
#[must_use]
pub fn compare_cards(a: &CardRecord, b: &CardRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_text(Some(&a.name), Some(&b.name)),
        SortKey::Cost => a.converted_cost().cmp(&b.converted_cost()),
        SortKey::Type => compare_text(Some(&a.card_type), Some(&b.card_type)),
        SortKey::Rarity => {
            let rank = |c: &CardRecord| c.rarity.as_deref().map_or(0, rarity_rank);
            rank(a).cmp(&rank(b))
        }
        SortKey::Set => compare_text(a.set.as_deref(), b.set.as_deref()),
        SortKey::Collector => a.collector_index().cmp(&b.collector_index()),
        SortKey::Artist => compare_text(a.artist.as_deref(), b.artist.as_deref()),
        SortKey::Power => a
            .attack_value()
            .unwrap_or(0)
            .cmp(&b.attack_value().unwrap_or(0)),
        SortKey::Toughness => a
            .defense_value()
            .unwrap_or(0)
            .cmp(&b.defense_value().unwrap_or(0)),
        SortKey::Price => a
            .average_price()
            .unwrap_or(0.0)
            .total_cmp(&b.average_price().unwrap_or(0.0)),
        SortKey::Random => Ordering::Equal,
    }
}

/// Sort in place. `None` leaves the order untouched.
pub fn sort_cards(cards: &mut [&CardRecord], key: Option<SortKey>, order: SortOrder, rng: &mut SortRng) {
    let Some(key) = key else {
        return;
    };

    if key == SortKey::Random {
        rng.shuffle(cards);
        return;
    }

    cards.sort_by(|a, b| {
        let ordering = compare_cards(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
