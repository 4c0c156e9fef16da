//! Criteria matcher: evaluates a `CriteriaSet` against one card.
//!
//! Each criterion yields one boolean. `and` mode requires all of them,
//! `or` mode any of them. Token and extra exclusions always apply on top
//! of either mode. An empty set accepts every card.

use log::trace;

use crate::cards::record::mana_value;
use crate::cards::symbols::{canonical_element, canonical_keyword, ElementId};
use crate::cards::CardRecord;
use crate::core::SearchConfig;
use crate::criteria::{
    CollectorFilter, CombineMode, CriteriaSet, Criterion, ElementComparison, FormatStatus,
    InclusionMode, KeywordComparison, ManaCostComparison, PriceComparison, StringMatch,
    TextComparison,
};

use super::CardFilter;

/// Evaluates a normalized criteria set.
#[derive(Clone, Copy, Debug)]
pub struct CriteriaMatcher<'a> {
    set: &'a CriteriaSet,
    config: &'a SearchConfig,
}

impl<'a> CriteriaMatcher<'a> {
    #[must_use]
    pub fn new(set: &'a CriteriaSet, config: &'a SearchConfig) -> Self {
        Self { set, config }
    }

    /// Does the card satisfy one criterion?
    #[must_use]
    pub fn matches_criterion(&self, card: &CardRecord, criterion: &Criterion) -> bool {
        match criterion {
            Criterion::Name {
                value,
                mode,
                case_sensitive,
            } => string_match(&card.name, value, *mode, *case_sensitive),
            Criterion::Text {
                value,
                mode,
                case_sensitive,
            } => {
                let value = value.replace('~', &card.name);
                text_match(card.rules_text(), &value, *mode, *case_sensitive)
            }
            Criterion::TypeLine {
                value,
                partial,
                mode,
                case_sensitive,
            } => {
                let card_type = fold(&card.card_type, *case_sensitive);
                let value = fold(value, *case_sensitive);
                let hit = if *partial {
                    card_type.contains(&value)
                } else {
                    card_type == value
                };
                apply_inclusion(hit, *mode)
            }
            Criterion::SelectedTypes { types, mode } => {
                let card_type = card.card_type.to_uppercase();
                let hit = types.iter().any(|t| card_type.contains(&t.to_uppercase()));
                apply_inclusion(hit, *mode)
            }
            Criterion::Elements { elements, mode } => matches_elements(card, elements, *mode),
            Criterion::ElementIdentity(identity) => matches_identity(card, identity),
            Criterion::Keywords { keywords, mode } => matches_keywords(card, keywords, *mode),
            Criterion::ManaCost { value, mode } => matches_mana_cost(card, value, *mode),
            Criterion::ConvertedCost(filter) => filter.matches_value(card.converted_cost()),
            Criterion::Attack(filter) => filter.matches_stat(card.attack.as_ref()),
            Criterion::Defense(filter) => filter.matches_stat(card.defense.as_ref()),
            Criterion::Strength(filter) => filter.matches_value(
                card.attack_value().unwrap_or(0) + card.defense_value().unwrap_or(0),
            ),
            Criterion::Sets { sets, mode } => {
                apply_inclusion(in_list(card.set.as_deref(), sets), *mode)
            }
            Criterion::Rarity { rarities, mode } => {
                apply_inclusion(in_list(card.rarity.as_deref(), rarities), *mode)
            }
            Criterion::Collector(filter) => matches_collector(card, filter),
            Criterion::Price { min, max, mode } => matches_price(card, *min, *max, *mode),
            Criterion::Artist {
                value,
                mode,
                case_sensitive,
            } => card
                .artist
                .as_deref()
                .is_some_and(|artist| string_match(artist, value, *mode, *case_sensitive)),
            Criterion::FlavorText {
                value,
                mode,
                case_sensitive,
            } => card
                .flavor_text
                .as_deref()
                .is_some_and(|flavor| text_match(flavor, value, *mode, *case_sensitive)),
            Criterion::Formats { formats, status } => {
                let legal = |format: &String| {
                    card.legal_in(format)
                        .unwrap_or(self.config.assume_legal_when_unknown)
                };
                match status {
                    FormatStatus::Legal => formats.iter().any(legal),
                    FormatStatus::NotLegal => formats.iter().any(|f| !legal(f)),
                }
            }
            Criterion::Language {
                code,
                include_translations,
            } => *include_translations || card.language_code().eq_ignore_ascii_case(code),
            Criterion::Custom { terms, mode } => {
                let hit = terms.iter().any(|term| matches_lore(card, term));
                apply_inclusion(hit, *mode)
            }
            Criterion::ExcludeTokens => !card.is_token(),
            Criterion::ExcludeExtras => !card.is_extra(),
        }
    }
}

impl CardFilter for CriteriaMatcher<'_> {
    fn matches(&self, card: &CardRecord) -> bool {
        let check = |criterion: &Criterion| {
            let hit = self.matches_criterion(card, criterion);
            trace!("{}: {} -> {}", card.id, criterion.key(), hit);
            hit
        };

        let criteria = &self.set.criteria;
        if !criteria.iter().filter(|c| c.is_scope()).all(check) {
            return false;
        }

        let mut keys = criteria.iter().filter(|c| !c.is_scope()).peekable();
        match self.set.mode {
            CombineMode::And => keys.all(check),
            CombineMode::Or => keys.peek().is_none() || keys.any(check),
        }
    }
}

fn fold(s: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        s.to_string()
    } else {
        s.to_lowercase()
    }
}

fn apply_inclusion(hit: bool, mode: InclusionMode) -> bool {
    if mode.is_excluding() {
        !hit
    } else {
        hit
    }
}

fn in_list(value: Option<&str>, list: &[String]) -> bool {
    value.is_some_and(|v| list.iter().any(|item| item.eq_ignore_ascii_case(v.trim())))
}

/// Name/artist comparison.
#[must_use]
pub fn string_match(haystack: &str, needle: &str, mode: StringMatch, case_sensitive: bool) -> bool {
    let haystack = fold(haystack, case_sensitive);
    let needle = fold(needle, case_sensitive);
    match mode {
        StringMatch::Contains => haystack.contains(&needle),
        StringMatch::Exact => haystack == needle,
        StringMatch::Starts => haystack.starts_with(&needle),
        StringMatch::Ends => haystack.ends_with(&needle),
    }
}

/// Rules/flavor text comparison.
#[must_use]
pub fn text_match(
    haystack: &str,
    needle: &str,
    mode: TextComparison,
    case_sensitive: bool,
) -> bool {
    let haystack = fold(haystack, case_sensitive);
    let needle = fold(needle, case_sensitive);
    match mode {
        TextComparison::Exact => haystack.trim() == needle.trim(),
        TextComparison::WordOrder => haystack.contains(&needle),
        TextComparison::AllWords => needle.split_whitespace().all(|w| haystack.contains(w)),
    }
}

fn element_key(s: &str) -> String {
    canonical_element(s).map_or_else(|| s.trim().to_lowercase(), |e| e.name().to_string())
}

fn keyword_key(s: &str) -> String {
    canonical_keyword(s).map_or_else(|| s.trim().to_lowercase(), |k| k.name().to_string())
}

fn key_set<'s, I: IntoIterator<Item = &'s str>>(items: I, key: fn(&str) -> String) -> Vec<String> {
    let mut keys: Vec<String> = items.into_iter().map(key).collect();
    keys.sort();
    keys.dedup();
    keys
}

fn matches_elements(card: &CardRecord, selected: &[String], mode: ElementComparison) -> bool {
    let card_keys = key_set(card.element_names(), element_key);
    let wanted = key_set(selected.iter().map(String::as_str), element_key);
    match mode {
        ElementComparison::Including => wanted.iter().any(|e| card_keys.contains(e)),
        ElementComparison::Exactly => card_keys == wanted,
        ElementComparison::AtMost => card_keys.iter().all(|e| wanted.contains(e)),
        ElementComparison::AtLeast => wanted.iter().all(|e| card_keys.contains(e)),
    }
}

/// Deckbuilding identity: every element on the card and every colored cost
/// token must be in the identity. Generic cost is always allowed.
fn matches_identity(card: &CardRecord, identity: &[String]) -> bool {
    let allowed = key_set(identity.iter().map(String::as_str), element_key);
    let generic = ElementId::Generic.name();

    card.element_names()
        .into_iter()
        .chain(
            card.cost_tokens()
                .iter()
                .map(String::as_str)
                .filter(|t| canonical_element(t).is_some()),
        )
        .map(element_key)
        .all(|e| e == generic || allowed.contains(&e))
}

fn matches_keywords(card: &CardRecord, selected: &[String], mode: KeywordComparison) -> bool {
    let keywords = card.keyword_list();
    let card_keys = key_set(keywords.iter().map(String::as_str), keyword_key);
    let wanted = key_set(selected.iter().map(String::as_str), keyword_key);
    match mode {
        KeywordComparison::Including => wanted.iter().any(|k| card_keys.contains(k)),
        KeywordComparison::Excluding => !wanted.iter().any(|k| card_keys.contains(k)),
        KeywordComparison::Exactly => card_keys == wanted,
    }
}

fn matches_mana_cost(card: &CardRecord, value: &str, mode: ManaCostComparison) -> bool {
    let cost = card.mana_string();
    let target = || value.trim().parse::<i64>().unwrap_or_else(|_| mana_value(value));
    let converted = card.converted_cost();
    match mode {
        ManaCostComparison::Contains => cost.to_lowercase().contains(&value.to_lowercase()),
        ManaCostComparison::Exact => cost.trim().eq_ignore_ascii_case(value.trim()),
        ManaCostComparison::Less => converted < target(),
        ManaCostComparison::Greater => converted > target(),
        ManaCostComparison::LessEqual => converted <= target(),
        ManaCostComparison::GreaterEqual => converted >= target(),
    }
}

fn matches_collector(card: &CardRecord, filter: &CollectorFilter) -> bool {
    let Some(number) = card.collector_number.as_deref() else {
        return false;
    };
    match filter {
        CollectorFilter::Exact(wanted) => number.trim().eq_ignore_ascii_case(wanted),
        CollectorFilter::Range { min, max } => {
            let index = card.collector_index();
            min.map_or(true, |m| index >= m) && max.map_or(true, |m| index <= m)
        }
    }
}

/// Cards without price data pass.
fn matches_price(
    card: &CardRecord,
    min: Option<f64>,
    max: Option<f64>,
    mode: PriceComparison,
) -> bool {
    let Some(price) = card.average_price() else {
        return true;
    };
    match mode {
        PriceComparison::Between => {
            min.map_or(true, |m| price >= m) && max.map_or(true, |m| price <= m)
        }
        PriceComparison::Less => max.or(min).map_or(true, |m| price < m),
        PriceComparison::Greater => min.or(max).map_or(true, |m| price > m),
    }
}

fn matches_lore(card: &CardRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    [
        card.name.as_str(),
        card.rules_text(),
        card.card_type.as_str(),
        card.flavor_text.as_deref().unwrap_or(""),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}
