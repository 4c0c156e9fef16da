//! DSL matcher: evaluates a `FilterSet` against one card.
//!
//! Exclusions run first and reject outright. Every populated category then
//! contributes one boolean (any value in the category matches), and the card
//! passes only if all of them hold. Logical markers are not consulted.

use log::trace;

use crate::cards::symbols::{canonical_element, canonical_keyword, element_glyph, keyword_glyph};
use crate::cards::CardRecord;
use crate::core::SearchConfig;
use crate::query::{CostFilter, FilterSet, SetFilter, SymbolFilter, TextTerm, TypeFilter};

use super::text::matches_card_text;
use super::CardFilter;

/// Evaluates a parsed DSL filter set.
#[derive(Clone, Copy, Debug)]
pub struct DslMatcher<'a> {
    filters: &'a FilterSet,
    config: &'a SearchConfig,
}

impl<'a> DslMatcher<'a> {
    #[must_use]
    pub fn new(filters: &'a FilterSet, config: &'a SearchConfig) -> Self {
        Self { filters, config }
    }

    fn matches_text(&self, card: &CardRecord, term: &TextTerm) -> bool {
        matches_card_text(card, &term.search_text(), self.config.case_sensitive)
    }

    fn matches_type(&self, card: &CardRecord, filter: &TypeFilter) -> bool {
        match filter {
            TypeFilter::Is(class) => match class.as_str() {
                "permanent" => self.config.is_permanent_type(&card.card_type),
                "spell" => self.config.is_spell_type(&card.card_type),
                _ => false,
            },
            TypeFilter::Contains(search) => {
                let card_type = card.card_type.to_lowercase();
                let search = search.to_lowercase();
                let aliased = match search.as_str() {
                    "flag" => card_type.contains("φlag"),
                    "φlag" => card_type.contains("flag"),
                    _ => false,
                };
                aliased || card_type.contains(&search)
            }
        }
    }

    fn matches_rarity(&self, card: &CardRecord, rarity: &str) -> bool {
        let card_rarity = card.rarity.as_deref().unwrap_or("").to_lowercase();
        card_rarity.contains(&rarity.to_lowercase())
    }

    fn matches_set(&self, card: &CardRecord, filter: &SetFilter) -> bool {
        match filter {
            SetFilter::Named(set) => {
                let card_set = card.set.as_deref().unwrap_or("").to_lowercase();
                card_set.contains(&set.to_lowercase())
            }
            SetFilter::Game(format) => card
                .legal_in(format)
                .unwrap_or(self.config.assume_legal_when_unknown),
        }
    }
}

/// Element membership by name or glyph, or a count comparison.
#[must_use]
pub fn matches_element(card: &CardRecord, filter: &SymbolFilter) -> bool {
    let elements = card.element_names();
    match filter {
        SymbolFilter::Count(count) => count.matches(elements.len() as i64),
        SymbolFilter::Named(search) => {
            let search_lower = search.to_lowercase();
            let glyph = element_glyph(search);
            let canonical = canonical_element(search);
            elements.iter().any(|e| {
                e.to_lowercase() == search_lower
                    || Some(*e) == glyph
                    || (canonical.is_some() && canonical_element(e) == canonical)
            })
        }
    }
}

/// Keyword membership by name or glyph, or a count comparison.
#[must_use]
pub fn matches_keyword(card: &CardRecord, filter: &SymbolFilter) -> bool {
    let keywords = card.keyword_list();
    match filter {
        SymbolFilter::Count(count) => count.matches(keywords.len() as i64),
        SymbolFilter::Named(search) => {
            let search_lower = search.to_lowercase();
            let glyph = keyword_glyph(search);
            let canonical = canonical_keyword(search);
            keywords.iter().any(|k| {
                k.to_lowercase() == search_lower
                    || Some(k.as_str()) == glyph
                    || (canonical.is_some() && canonical_keyword(k) == canonical)
            })
        }
    }
}

/// Converted-cost comparison or raw mana-pattern substring.
#[must_use]
pub fn matches_cost(card: &CardRecord, filter: &CostFilter) -> bool {
    match filter {
        CostFilter::Converted(numeric) => numeric.matches(card.converted_cost()),
        CostFilter::ManaPattern(pattern) => card.mana_string().contains(pattern.as_str()),
    }
}

/// Rules-text search.
///
/// `~/~` tests whether the card's name appears in its own rules text.
/// Otherwise `~` stands for the card's name.
#[must_use]
pub fn matches_oracle(card: &CardRecord, search: &str) -> bool {
    let text = card.rules_text().to_lowercase();
    let name = card.name.to_lowercase();
    let search = search.to_lowercase();

    if search.contains("~/~") {
        return text.contains(&name);
    }
    text.contains(&search.replace('~', &name))
}

impl CardFilter for DslMatcher<'_> {
    fn matches(&self, card: &CardRecord) -> bool {
        let f = self.filters;

        if f
            .exclude
            .iter()
            .any(|x| matches_card_text(card, x, self.config.case_sensitive))
        {
            trace!("{}: excluded", card.id);
            return false;
        }

        let mut results: Vec<bool> = Vec::with_capacity(8);
        if !f.text.is_empty() {
            results.push(f.text.iter().any(|t| self.matches_text(card, t)));
        }
        if !f.types.is_empty() {
            results.push(f.types.iter().any(|t| self.matches_type(card, t)));
        }
        if !f.elements.is_empty() {
            results.push(f.elements.iter().any(|e| matches_element(card, e)));
        }
        if !f.keywords.is_empty() {
            results.push(f.keywords.iter().any(|k| matches_keyword(card, k)));
        }
        if !f.costs.is_empty() {
            results.push(f.costs.iter().any(|c| matches_cost(card, c)));
        }
        if !f.rarities.is_empty() {
            results.push(f.rarities.iter().any(|r| self.matches_rarity(card, r)));
        }
        if !f.sets.is_empty() {
            results.push(f.sets.iter().any(|s| self.matches_set(card, s)));
        }
        if !f.oracle.is_empty() {
            results.push(f.oracle.iter().any(|o| matches_oracle(card, o)));
        }

        trace!("{}: category results {:?}", card.id, results);
        results.into_iter().all(|r| r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{parse_query, CompareOp, NumericFilter};

    fn config() -> SearchConfig {
        SearchConfig::default()
    }

    fn check(query: &str, card: &CardRecord) -> bool {
        let filters = parse_query(query).unwrap();
        let config = config();
        DslMatcher::new(&filters, &config).matches(card)
    }

    #[test]
    fn test_empty_filter_set_accepts_all() {
        let filters = FilterSet::new();
        let config = config();
        let card = CardRecord::new("1", "Anything", "Familiar");
        assert!(DslMatcher::new(&filters, &config).matches(&card));
    }

    #[test]
    fn test_element_by_name_and_glyph() {
        let named = CardRecord::new("1", "A", "Familiar").with_elements(["Fire"]);
        let glyph = CardRecord::new("2", "B", "Familiar").with_elements(["△"]);
        let water = CardRecord::new("3", "C", "Familiar").with_elements(["Water"]);

        assert!(check("e:fire", &named));
        assert!(check("e:fire", &glyph));
        assert!(!check("e:fire", &water));
        assert!(check("e:▽", &water));
    }

    #[test]
    fn test_element_count() {
        let card = CardRecord::new("1", "A", "Familiar")
            .with_element_counts([("Fire", 1), ("Water", 2), ("Air", 0)]);
        assert!(matches_element(
            &card,
            &SymbolFilter::Count(NumericFilter::new(CompareOp::Eq, 2))
        ));
        assert!(!check("e>=3", &card));
    }

    #[test]
    fn test_keyword_matching() {
        let card = CardRecord::new("1", "A", "Familiar").with_keywords(["Brilliance", "⬢"]);
        assert!(check("k:brilliance", &card));
        assert!(check("k:steadfast", &card));
        assert!(!check("k:void", &card));
        assert!(check("k>=2", &card));
        assert!(!check("k>=3", &card));
    }

    #[test]
    fn test_type_alias_and_is() {
        let flag = CardRecord::new("1", "Banner", "ΦLAG");
        let elemental = CardRecord::new("2", "Golem", "Elemental");

        assert!(check("t:flag", &flag));
        assert!(check("is:spell", &flag));
        assert!(!check("is:permanent", &flag));
        assert!(check("is:permanent", &elemental));
        assert!(!check("is:artifact", &elemental));
    }

    #[test]
    fn test_cost_converted_and_mana() {
        let card = CardRecord::new("1", "A", "Familiar")
            .with_cost_tokens(["Fire", "Fire", "Generic"])
            .with_mana_cost("{1}{△}{△}");
        assert!(check("c:3", &card));
        assert!(check("cmc<=3", &card));
        assert!(!check("c>3", &card));
        assert!(check("mana:{△}", &card));
        assert!(!check("mana:{▽}", &card));
    }

    #[test]
    fn test_oracle_self_reference() {
        let self_ref = CardRecord::new("1", "Ember Sprite", "Familiar")
            .with_text("When Ember Sprite enters, deal 1 damage.");
        let plain = CardRecord::new("2", "Tidal Guard", "Familiar").with_text("Draw a card.");

        assert!(check("o:~/~", &self_ref));
        assert!(!check("o:~/~", &plain));
        assert!(check(r#"o:"when ~ enters""#, &self_ref));
        assert!(check(r#"o:"draw a card""#, &plain));
    }

    #[test]
    fn test_exclusion_short_circuits() {
        let card = CardRecord::new("1", "Spark Token", "Familiar").with_elements(["Fire"]);
        assert!(check("e:fire", &card));
        assert!(!check("e:fire -token", &card));
    }

    #[test]
    fn test_and_across_categories_or_within() {
        let card = CardRecord::new("1", "A", "Familiar")
            .with_elements(["Fire"])
            .with_rarity("Rare");
        assert!(check("e:fire e:water", &card));
        assert!(check("e:fire r:rare", &card));
        assert!(!check("e:fire r:common", &card));
    }

    #[test]
    fn test_game_filter_uses_legality() {
        let unknown = CardRecord::new("1", "A", "Familiar");
        let banned = CardRecord::new("2", "B", "Familiar").with_legality("standard", false);

        assert!(check("game:standard", &unknown));
        assert!(!check("game:standard", &banned));

        let filters = parse_query("game:standard").unwrap();
        let strict = SearchConfig::new().strict_legality();
        assert!(!DslMatcher::new(&filters, &strict).matches(&unknown));
    }

    #[test]
    fn test_unknown_field_searches_literal_text() {
        let card = CardRecord::new("1", "A", "Familiar").with_text("Bonus foo:bar applies.");
        assert!(check("foo:bar", &card));
        assert!(!check("foo:baz", &card));
    }
}
