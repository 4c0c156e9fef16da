//! Shared card fixture for integration tests.

#![allow(dead_code)]

use card_query::CardRecord;

/// A small catalog covering every record shape the engine accepts.
pub const CARDS_JSON: &str = r#"[
    {
        "id": "ORI-001",
        "name": "Ember Sprite",
        "type": "Familiar",
        "text": "When Ember Sprite enters, deal 1 damage. Inferno.",
        "elements": {"Fire": 1, "Water": 0},
        "cost": ["Fire", "Generic"],
        "attack": 2,
        "defense": 1,
        "rarity": "Common",
        "set": "Origins",
        "collectorNumber": "1",
        "artist": "Ana Reyes",
        "flavorText": "Small flames, big ideas.",
        "price": {"low": 0.1, "average": 0.25, "high": 0.5}
    },
    {
        "id": "ORI-002",
        "name": "Tidal Guard",
        "type": "Elemental",
        "description": "Steadfast. Draw a card. The tide's patience.",
        "elements": {"Water": 2},
        "keywords": ["Steadfast", "Submerged"],
        "cost": ["Water", "Water", "Generic"],
        "attack": 1,
        "defense": 4,
        "rarity": "Rare",
        "set": "Origins",
        "collectorNumber": "2",
        "artist": "Lee Park",
        "legality": {"standard": true}
    },
    {
        "id": "ORI-003",
        "name": "Gale Banner",
        "type": "ΦLAG",
        "text": "Gust. Cards you control gain ≋.",
        "elements": ["△", "Gust"],
        "cost": "{1}{△}",
        "rarity": "Uncommon",
        "set": "Origins",
        "collectorNumber": "3a"
    },
    {
        "id": "STM-010",
        "name": "Void Colossus",
        "type": "Elemental",
        "text": "Void. Brilliance.",
        "elements": {"Nether": 1, "Aether": 1, "Earth": 1},
        "keywords": ["Void", "Brilliance"],
        "cost": 7,
        "attack": "*",
        "defense": 7,
        "rarity": "Legendary",
        "set": "Storm",
        "collectorNumber": "10",
        "artist": "Ana Reyes",
        "language": "fr",
        "legality": {"standard": false},
        "price": {"low": 10.0, "average": 12.0, "high": 15.0}
    },
    {
        "id": "STM-011-token",
        "name": "Spark",
        "type": "TOKEN Familiar",
        "text": "A fleeting ember.",
        "elements": {"Fire": 1},
        "rarity": "Common",
        "set": "Storm",
        "collectorNumber": "11"
    }
]"#;

pub fn cards() -> Vec<CardRecord> {
    serde_json::from_str(CARDS_JSON).expect("fixture parses")
}

pub fn ids(cards: &[&CardRecord]) -> Vec<String> {
    cards.iter().map(|c| c.id.clone()).collect()
}
