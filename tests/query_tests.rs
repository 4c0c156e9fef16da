//! DSL query tests.
//!
//! These run full queries against the shared fixture:
//! - structured filters and their aliases
//! - exclusion short-circuiting
//! - the minimum-length gate and the substring fallback

mod common;

use card_query::core::QueryError;
use card_query::query::{parse_query, tokenize, LogicOp};
use card_query::{parse_search_query, search_query, SearchConfig};

use common::{cards, ids};

fn run(query: &str) -> Vec<String> {
    let cards = cards();
    let found = parse_search_query(query, &cards, &SearchConfig::default());
    ids(&found)
}

/// `e:fire` matches by name and by glyph, never by a zero count.
#[test]
fn test_element_by_name_or_glyph() {
    assert_eq!(run("e:fire"), ["ORI-001", "ORI-003", "STM-011-token"]);
    assert_eq!(run("e:water"), ["ORI-002"]);
    assert_eq!(run("e:⊡"), ["STM-010"]);
}

/// Exclusion rejects cards the positive filters would accept.
#[test]
fn test_exclusion_short_circuits() {
    assert_eq!(run("e:fire -token"), ["ORI-001", "ORI-003"]);
    assert_eq!(run("-elemental"), ["ORI-001", "ORI-003", "STM-011-token"]);
}

/// Keyword counts ignore which keywords are present.
#[test]
fn test_keyword_count() {
    assert_eq!(run("k>=2"), ["ORI-002", "STM-010"]);
    assert_eq!(run("k:>=2"), ["ORI-002", "STM-010"]);
    assert_eq!(run("k:gust"), ["ORI-003"]);
    assert_eq!(run("k:✦"), ["STM-010"]);
}

#[test]
fn test_type_filters() {
    assert_eq!(run("t:familiar"), ["ORI-001", "STM-011-token"]);
    assert_eq!(run("t:flag"), ["ORI-003"]);
    assert_eq!(run("is:permanent"), ["ORI-002", "STM-010"]);
    assert_eq!(run("is:spell"), ["ORI-003"]);
}

#[test]
fn test_cost_filters() {
    assert_eq!(run("c>=3"), ["ORI-002", "STM-010"]);
    assert_eq!(run("cmc<=2"), ["ORI-001", "ORI-003", "STM-011-token"]);
    assert_eq!(run("c:7"), ["STM-010"]);
    assert_eq!(run("mana:{△}"), ["ORI-003"]);
}

#[test]
fn test_oracle_filters() {
    assert_eq!(run("o:~/~"), ["ORI-001"]);
    assert_eq!(run(r#"o:"draw a card""#), ["ORI-002"]);
    assert_eq!(run("o:void"), ["STM-010"]);
}

#[test]
fn test_rarity_set_and_game() {
    assert_eq!(run("r:rare"), ["ORI-002"]);
    assert_eq!(run("s:storm"), ["STM-010", "STM-011-token"]);
    assert_eq!(
        run("game:standard"),
        ["ORI-001", "ORI-002", "ORI-003", "STM-011-token"]
    );
}

#[test]
fn test_free_text() {
    assert_eq!(run("ember"), ["ORI-001", "STM-011-token"]);
    assert!(run("foo:bar").is_empty());
}

/// Categories combine with AND; `OR` is recorded but has no effect.
#[test]
fn test_logical_markers_are_inert() {
    let filters = parse_query("t:elemental OR r:common").unwrap();
    assert_eq!(filters.operators.as_slice(), &[LogicOp::Or]);
    assert!(run("t:elemental OR r:common").is_empty());
    assert!(run("t:elemental r:common").is_empty());
}

#[test]
fn test_minimum_length_gate() {
    assert!(run("").is_empty());
    assert!(run("e").is_empty());
    assert!(run(" c ").is_empty());
}

#[test]
fn test_quoted_token() {
    let tokens = tokenize(r#"t:"legendary familiar" e:fire"#).unwrap();
    assert_eq!(tokens, [r#"t:"legendary familiar""#, "e:fire"]);

    let filters = parse_query(r#"t:"legendary familiar""#).unwrap();
    assert_eq!(filters.types.len(), 1);
}

/// Unparseable queries fall back to a substring search of the raw text.
#[test]
fn test_parse_error_falls_back_to_substring() {
    let cards = cards();
    let config = SearchConfig::default();

    assert_eq!(
        search_query("patience\u{1b}", &cards, &config),
        Err(QueryError::ControlCharacter { position: 8 })
    );
    assert!(parse_search_query("patience\u{1b}", &cards, &config).is_empty());
}

/// Apostrophes and half-typed quotes keep the other filters working.
#[test]
fn test_open_quotes_are_not_errors() {
    assert_eq!(run("tide's"), ["ORI-002"]);
    assert_eq!(run("r:rare o:tide's"), ["ORI-002"]);
    assert!(run("r:common o:tide's").is_empty());
    assert_eq!(run(r#"o:"draw a"#), ["ORI-002"]);
    assert_eq!(run(r#"t:"famil"#), ["ORI-001", "STM-011-token"]);
}

/// A key with no value leaves the rest of the query in force.
#[test]
fn test_empty_field_value_constrains_nothing() {
    assert_eq!(run("t: ember"), ["ORI-001", "STM-011-token"]);
    assert_eq!(run("e:water s:"), ["ORI-002"]);
}

#[test]
fn test_case_sensitive_config() {
    let cards = cards();
    let config = SearchConfig::new().case_sensitive();
    assert!(parse_search_query("EMBER", &cards, &config).is_empty());
    assert_eq!(
        ids(&parse_search_query("Ember", &cards, &config)),
        ["ORI-001"]
    );
}
