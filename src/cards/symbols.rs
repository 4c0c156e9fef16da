//! Element and keyword symbol tables.
//!
//! Elements and keywords each have a spelled-out name and a single-glyph
//! form. The two tables are separate symbol spaces: a keyword glyph never
//! canonicalizes to an element and vice versa.
//!
//! `air` and `fire` share the glyph `△`. Looking up `△` yields `Fire`, the
//! first entry in table order.

use serde::{Deserialize, Serialize};

/// Canonical element identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementId {
    Fire,
    Water,
    Earth,
    Air,
    Aether,
    Nether,
    Generic,
}

/// Canonical keyword identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeywordId {
    Brilliance,
    Void,
    Gust,
    Submerged,
    Inferno,
    Steadfast,
}

static ELEMENTS: [(ElementId, &str, &str); 7] = [
    (ElementId::Fire, "fire", "△"),
    (ElementId::Water, "water", "▽"),
    (ElementId::Earth, "earth", "⊡"),
    (ElementId::Air, "air", "△"),
    (ElementId::Aether, "aether", "○"),
    (ElementId::Nether, "nether", "□"),
    (ElementId::Generic, "generic", "⊗"),
];

static KEYWORDS: [(KeywordId, &str, &str); 6] = [
    (KeywordId::Brilliance, "brilliance", "✦"),
    (KeywordId::Void, "void", "◯"),
    (KeywordId::Gust, "gust", "≋"),
    (KeywordId::Submerged, "submerged", "≈"),
    (KeywordId::Inferno, "inferno", "※"),
    (KeywordId::Steadfast, "steadfast", "⬢"),
];

impl ElementId {
    /// All elements in table order.
    pub fn all() -> impl Iterator<Item = ElementId> {
        ELEMENTS.iter().map(|(id, _, _)| *id)
    }

    /// Lower-case element name.
    #[must_use]
    pub fn name(self) -> &'static str {
        ELEMENTS
            .iter()
            .find(|(id, _, _)| *id == self)
            .map_or("", |(_, name, _)| name)
    }

    /// Element glyph.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        ELEMENTS
            .iter()
            .find(|(id, _, _)| *id == self)
            .map_or("", |(_, _, glyph)| glyph)
    }
}

impl KeywordId {
    /// All keywords in table order.
    pub fn all() -> impl Iterator<Item = KeywordId> {
        KEYWORDS.iter().map(|(id, _, _)| *id)
    }

    /// Lower-case keyword name.
    #[must_use]
    pub fn name(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(id, _, _)| *id == self)
            .map_or("", |(_, name, _)| name)
    }

    /// Keyword glyph.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(id, _, _)| *id == self)
            .map_or("", |(_, _, glyph)| glyph)
    }

    /// Display name as stored on cards ("Brilliance").
    #[must_use]
    pub fn display_name(self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Resolve an element name or glyph (case-insensitive) to its identity.
#[must_use]
pub fn canonical_element(s: &str) -> Option<ElementId> {
    let trimmed = s.trim();
    let lower = trimmed.to_lowercase();
    ELEMENTS
        .iter()
        .find(|(_, name, glyph)| *name == lower || *glyph == trimmed)
        .map(|(id, _, _)| *id)
}

/// Resolve a keyword name or glyph (case-insensitive) to its identity.
#[must_use]
pub fn canonical_keyword(s: &str) -> Option<KeywordId> {
    let trimmed = s.trim();
    let lower = trimmed.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, name, glyph)| *name == lower || *glyph == trimmed)
        .map(|(id, _, _)| *id)
}

/// Glyph for an element name, if the name is known.
#[must_use]
pub fn element_glyph(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    ELEMENTS
        .iter()
        .find(|(_, n, _)| *n == lower)
        .map(|(_, _, glyph)| *glyph)
}

/// Glyph for a keyword name, if the name is known.
#[must_use]
pub fn keyword_glyph(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, n, _)| *n == lower)
        .map(|(_, _, glyph)| *glyph)
}

/// Is this string a keyword name (not glyph)?
#[must_use]
pub fn is_keyword_name(s: &str) -> bool {
    keyword_glyph(s).is_some()
}

/// Is this character one of the element or keyword glyphs?
#[must_use]
pub fn is_cost_glyph(c: char) -> bool {
    let mut buf = [0u8; 4];
    let s: &str = c.encode_utf8(&mut buf);
    ELEMENTS.iter().any(|(_, _, g)| *g == s) || KEYWORDS.iter().any(|(_, _, g)| *g == s)
}
