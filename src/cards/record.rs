//! Card records - the read-only input to every search.
//!
//! Records arrive as JSON from an external loader. Several fields exist in
//! more than one historical shape (elements as a count map or a legacy
//! array, cost as tokens, an integer or a mana string); the accessors here
//! flatten those shapes so matchers never branch on them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::symbols::{is_cost_glyph, is_keyword_name, KeywordId};

/// Element data on a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Elements {
    /// Element name to count. Only counts above zero are populated.
    Counts(BTreeMap<String, i64>),
    /// Legacy list of element names or glyphs.
    List(Vec<String>),
}

impl Default for Elements {
    fn default() -> Self {
        Elements::List(Vec::new())
    }
}

/// Cost data on a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cost {
    /// One token per unit of cost (`["Fire", "Generic"]`).
    Tokens(Vec<String>),
    /// Plain numeric cost.
    Converted(i64),
    /// Mana string such as `{3}{⬢}`.
    Mana(String),
}

impl Default for Cost {
    fn default() -> Self {
        Cost::Tokens(Vec::new())
    }
}

/// Attack/defense value. May hold a symbol such as `*` or `X`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stat {
    Number(i64),
    Text(String),
}

impl Stat {
    /// Numeric value, parsing leading digits from text values.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Stat::Number(n) => Some(*n),
            Stat::Text(s) => leading_int(s),
        }
    }

    /// Text form as written on the card.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Stat::Number(n) => n.to_string(),
            Stat::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for Stat {
    fn from(v: i64) -> Self {
        Stat::Number(v)
    }
}

impl From<i32> for Stat {
    fn from(v: i32) -> Self {
        Stat::Number(v as i64)
    }
}

impl From<&str> for Stat {
    fn from(v: &str) -> Self {
        Stat::Text(v.to_string())
    }
}

/// Market price information.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceInfo {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

/// A card as supplied by the catalog loader.
///
/// ## Example
///
/// ```
/// use card_query::cards::CardRecord;
///
/// let card = CardRecord::new("c1", "Ember Sprite", "Familiar")
///     .with_elements(["Fire"])
///     .with_cost_tokens(["Fire", "Generic"])
///     .with_stats(2, 1);
///
/// assert_eq!(card.converted_cost(), 2);
/// assert_eq!(card.element_names(), vec!["Fire"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub text: Option<String>,
    pub description: Option<String>,
    pub elements: Elements,
    pub keywords: Option<Vec<String>>,
    pub cost: Cost,
    pub mana_cost: Option<String>,
    pub attack: Option<Stat>,
    pub defense: Option<Stat>,
    pub rarity: Option<String>,
    pub set: Option<String>,
    pub collector_number: Option<String>,
    pub artist: Option<String>,
    pub flavor_text: Option<String>,
    pub language: Option<String>,
    pub legality: Option<BTreeMap<String, bool>>,
    pub price: Option<PriceInfo>,
}

impl CardRecord {
    /// Create a record with identity and type only.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, card_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            card_type: card_type.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set elements in the legacy list shape.
    #[must_use]
    pub fn with_elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements = Elements::List(elements.into_iter().map(Into::into).collect());
        self
    }

    /// Set elements in the count-map shape.
    #[must_use]
    pub fn with_element_counts<I, S>(mut self, counts: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        self.elements = Elements::Counts(counts.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_cost_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cost = Cost::Tokens(tokens.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_mana_cost(mut self, mana: impl Into<String>) -> Self {
        self.mana_cost = Some(mana.into());
        self
    }

    #[must_use]
    pub fn with_stats(mut self, attack: impl Into<Stat>, defense: impl Into<Stat>) -> Self {
        self.attack = Some(attack.into());
        self.defense = Some(defense.into());
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    #[must_use]
    pub fn with_set(mut self, set: impl Into<String>) -> Self {
        self.set = Some(set.into());
        self
    }

    #[must_use]
    pub fn with_collector_number(mut self, number: impl Into<String>) -> Self {
        self.collector_number = Some(number.into());
        self
    }

    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    #[must_use]
    pub fn with_flavor_text(mut self, flavor: impl Into<String>) -> Self {
        self.flavor_text = Some(flavor.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_legality(mut self, format: impl Into<String>, legal: bool) -> Self {
        self.legality
            .get_or_insert_with(BTreeMap::new)
            .insert(format.into(), legal);
        self
    }

    #[must_use]
    pub fn with_price(mut self, average: f64) -> Self {
        self.price = Some(PriceInfo {
            low: average,
            average,
            high: average,
        });
        self
    }

    /// Rules text: `text`, falling back to `description`.
    #[must_use]
    pub fn rules_text(&self) -> &str {
        self.text
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("")
    }

    /// Populated element names.
    ///
    /// Legacy lists drop entries that are really keyword names.
    #[must_use]
    pub fn element_names(&self) -> Vec<&str> {
        match &self.elements {
            Elements::Counts(counts) => counts
                .iter()
                .filter(|(_, count)| **count > 0)
                .map(|(name, _)| name.as_str())
                .collect(),
            Elements::List(list) => list
                .iter()
                .map(String::as_str)
                .filter(|e| !is_keyword_name(e))
                .collect(),
        }
    }

    /// Keyword list, derived from rules text when the card carries none.
    #[must_use]
    pub fn keyword_list(&self) -> Vec<String> {
        if let Some(keywords) = &self.keywords {
            return keywords.clone();
        }

        let text = self.rules_text().to_lowercase();
        KeywordId::all()
            .filter(|k| text.contains(k.name()) || text.contains(k.glyph()))
            .map(KeywordId::display_name)
            .collect()
    }

    /// Cost tokens, when the cost is stored as a token list.
    #[must_use]
    pub fn cost_tokens(&self) -> &[String] {
        match &self.cost {
            Cost::Tokens(tokens) => tokens,
            _ => &[],
        }
    }

    /// Converted cost.
    ///
    /// Token lists count one per token. Mana strings sum their digit runs
    /// and count element/keyword glyphs.
    #[must_use]
    pub fn converted_cost(&self) -> i64 {
        match &self.cost {
            Cost::Tokens(tokens) => tokens.len() as i64,
            Cost::Converted(n) => *n,
            Cost::Mana(mana) => mana_value(mana),
        }
    }

    /// Cost rendered as one string (tokens concatenated).
    #[must_use]
    pub fn cost_string(&self) -> String {
        match &self.cost {
            Cost::Tokens(tokens) => tokens.concat(),
            Cost::Converted(n) => n.to_string(),
            Cost::Mana(mana) => mana.clone(),
        }
    }

    /// Raw mana string used for `mana:` pattern matching.
    #[must_use]
    pub fn mana_string(&self) -> String {
        match &self.mana_cost {
            Some(mana) => mana.clone(),
            None => self.cost_string(),
        }
    }

    /// Numeric attack, `None` when absent or symbolic.
    #[must_use]
    pub fn attack_value(&self) -> Option<i64> {
        self.attack.as_ref().and_then(Stat::as_int)
    }

    /// Numeric defense, `None` when absent or symbolic.
    #[must_use]
    pub fn defense_value(&self) -> Option<i64> {
        self.defense.as_ref().and_then(Stat::as_int)
    }

    /// Numeric part of the collector number, 0 when there is none.
    #[must_use]
    pub fn collector_index(&self) -> i64 {
        self.collector_number
            .as_deref()
            .and_then(first_int)
            .unwrap_or(0)
    }

    /// Legality in a format, when the card carries legality data.
    #[must_use]
    pub fn legal_in(&self, format: &str) -> Option<bool> {
        let legality = self.legality.as_ref()?;
        legality
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(format))
            .map(|(_, legal)| *legal)
    }

    /// Language code, `en` when unset.
    #[must_use]
    pub fn language_code(&self) -> &str {
        self.language.as_deref().unwrap_or("en")
    }

    /// Average price, when known.
    #[must_use]
    pub fn average_price(&self) -> Option<f64> {
        self.price.as_ref().map(|p| p.average)
    }

    /// Token cards carry `TOKEN` in their type or `token` in their id.
    #[must_use]
    pub fn is_token(&self) -> bool {
        self.card_type.contains("TOKEN") || self.id.contains("token")
    }

    /// Emblems, planes and schemes.
    #[must_use]
    pub fn is_extra(&self) -> bool {
        ["EMBLEM", "PLANE", "SCHEME"]
            .iter()
            .any(|t| self.card_type.contains(t))
    }
}

/// Converted value of a mana string: digit runs summed, cost glyphs counted.
pub(crate) fn mana_value(mana: &str) -> i64 {
    let mut total = 0i64;
    let mut digits = String::new();
    for c in mana.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if !digits.is_empty() {
            total += digits.parse::<i64>().unwrap_or(0);
            digits.clear();
        }
        if is_cost_glyph(c) {
            total += 1;
        }
    }
    if !digits.is_empty() {
        total += digits.parse::<i64>().unwrap_or(0);
    }
    total
}

/// Leading integer of a string (optional sign), like a lenient `parseInt`.
pub(crate) fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// First run of digits anywhere in a string.
pub(crate) fn first_int(s: &str) -> Option<i64> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_text_fallback() {
        let card = CardRecord::new("1", "A", "Familiar");
        assert_eq!(card.rules_text(), "");

        let mut card = card;
        card.description = Some("from description".to_string());
        assert_eq!(card.rules_text(), "from description");

        let card = card.with_text("from text");
        assert_eq!(card.rules_text(), "from text");
    }

    #[test]
    fn test_element_count_map() {
        let card = CardRecord::new("1", "A", "Familiar")
            .with_element_counts([("Fire", 2), ("Water", 0), ("Earth", 1)]);
        assert_eq!(card.element_names(), vec!["Earth", "Fire"]);
    }

    #[test]
    fn test_legacy_elements_drop_keywords() {
        let card = CardRecord::new("1", "A", "Familiar")
            .with_elements(["Fire", "Brilliance", "▽"]);
        assert_eq!(card.element_names(), vec!["Fire", "▽"]);
    }

    #[test]
    fn test_keywords_derived_from_text() {
        let card = CardRecord::new("1", "A", "Familiar")
            .with_text("Gust. When this enters, gain ⬢ until end of turn.");
        assert_eq!(card.keyword_list(), vec!["Gust".to_string(), "Steadfast".to_string()]);

        let explicit = card.with_keywords(Vec::<String>::new());
        assert!(explicit.keyword_list().is_empty());
    }

    #[test]
    fn test_converted_cost_shapes() {
        let tokens = CardRecord::new("1", "A", "X").with_cost_tokens(["Fire", "Fire", "Generic"]);
        assert_eq!(tokens.converted_cost(), 3);
        assert_eq!(tokens.cost_string(), "FireFireGeneric");

        let mut numeric = CardRecord::new("2", "B", "X");
        numeric.cost = Cost::Converted(4);
        assert_eq!(numeric.converted_cost(), 4);

        let mut mana = CardRecord::new("3", "C", "X");
        mana.cost = Cost::Mana("{3}{⬢}{△}".to_string());
        assert_eq!(mana.converted_cost(), 5);
        assert_eq!(mana.mana_string(), "{3}{⬢}{△}");
    }

    #[test]
    fn test_stats() {
        let card = CardRecord::new("1", "A", "Familiar").with_stats(3, "*");
        assert_eq!(card.attack_value(), Some(3));
        assert_eq!(card.defense_value(), None);
        assert_eq!(card.defense.as_ref().map(Stat::as_text), Some("*".to_string()));
    }

    #[test]
    fn test_collector_index() {
        let card = CardRecord::new("1", "A", "X").with_collector_number("PM-042a");
        assert_eq!(card.collector_index(), 42);
        assert_eq!(CardRecord::new("2", "B", "X").collector_index(), 0);
    }

    #[test]
    fn test_token_and_extra() {
        assert!(CardRecord::new("1", "A", "FAMILIAR TOKEN").is_token());
        assert!(CardRecord::new("spark-token", "A", "Familiar").is_token());
        assert!(CardRecord::new("2", "B", "EMBLEM").is_extra());
        assert!(!CardRecord::new("3", "C", "Familiar").is_extra());
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("12abc"), Some(12));
        assert_eq!(leading_int(" -3"), Some(-3));
        assert_eq!(leading_int("abc"), None);
        assert_eq!(first_int("abc7d"), Some(7));
    }

    #[test]
    fn test_deserialize_json_shapes() {
        let json = r#"{
            "id": "pm-001",
            "name": "Tidal Familiar",
            "type": "Familiar",
            "description": "Submerged.",
            "elements": {"Water": 2},
            "cost": ["Water", "Generic"],
            "attack": 2,
            "defense": "*",
            "rarity": "Rare",
            "set": "PRIMA MATERIA",
            "collectorNumber": "001",
            "flavorText": "The tide remembers."
        }"#;

        let card: CardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(card.card_type, "Familiar");
        assert_eq!(card.element_names(), vec!["Water"]);
        assert_eq!(card.converted_cost(), 2);
        assert_eq!(card.attack, Some(Stat::Number(2)));
        assert_eq!(card.defense, Some(Stat::Text("*".to_string())));
        assert_eq!(card.keyword_list(), vec!["Submerged".to_string()]);
        assert_eq!(card.language_code(), "en");
    }
}
