//! Query parser: tokens to `FilterKind`s to a `FilterSet`.
//!
//! ## Grammar
//!
//! - `-term`: exclude cards matching `term`
//! - `key:value` / `key:"quoted value"`: structured filter
//! - `key<op>value` (`e>=2`, `cmc<=3`): structured numeric filter
//! - `AND` / `OR`: logical markers, recorded only
//! - anything else: free text
//!
//! Recognized keys: `t/type`, `e/element`, `k/keyword`, `c/cost/cmc`,
//! `r/rarity`, `s/set`, `o/oracle/text`, `mana`, `is`, `game`.
//! Unknown keys become `TextTerm::Field` and search the literal `key:value`.
//! A key with no value (`t:`) is an empty text term and constrains nothing.

use log::debug;

use crate::core::QueryResult;

use super::filter::{
    CostFilter, FilterKind, FilterSet, LogicOp, SetFilter, SymbolFilter, TextTerm, TypeFilter,
};
use super::numeric::{
    extract_operator, extract_value, has_operator, parse_numeric_filter, NumericFilter,
    NumericValue,
};
use super::tokenizer::{strip_quotes, tokenize};

/// Keys that accept the colon-less `key<op>value` form.
const NUMERIC_KEYS: [&str; 7] = ["e", "element", "k", "keyword", "c", "cost", "cmc"];

/// Parse a raw query into a filter set.
///
/// ```
/// use card_query::query::parse_query;
///
/// let filters = parse_query("t:familiar e:fire -token").unwrap();
/// assert_eq!(filters.types.len(), 1);
/// assert_eq!(filters.elements.len(), 1);
/// assert_eq!(filters.exclude.len(), 1);
/// ```
pub fn parse_query(query: &str) -> QueryResult<FilterSet> {
    let tokens = tokenize(query)?;
    let filters = parse_tokens(&tokens)?;
    debug!(
        "parsed query {:?}: {} categories, {} exclusions",
        query,
        filters.populated_categories(),
        filters.exclude.len()
    );
    Ok(filters)
}

/// Classify every token and collect them into a filter set.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> QueryResult<FilterSet> {
    tokens.iter().map(|t| parse_token(t.as_ref())).collect()
}

/// Classify one token.
pub fn parse_token(token: &str) -> QueryResult<FilterKind> {
    if let Some(rest) = token.strip_prefix('-') {
        if !strip_quotes(rest).is_empty() {
            return Ok(FilterKind::Exclude(strip_quotes(rest).to_string()));
        }
    }

    if let Some((key, value)) = token.split_once(':') {
        if strip_quotes(value).is_empty() {
            return Ok(FilterKind::Text(TextTerm::Plain(String::new())));
        }
        return Ok(parse_structured(&key.to_lowercase(), value));
    }

    match token.to_uppercase().as_str() {
        "AND" => return Ok(FilterKind::Logic(LogicOp::And)),
        "OR" => return Ok(FilterKind::Logic(LogicOp::Or)),
        _ => {}
    }

    if let Some((key, value)) = split_operator_form(token) {
        return Ok(parse_structured(&key, value));
    }

    Ok(FilterKind::Text(TextTerm::Plain(strip_quotes(token).to_string())))
}

/// Dispatch a `key:value` pair by (lower-cased) key.
fn parse_structured(key: &str, value: &str) -> FilterKind {
    let clean = strip_quotes(value).to_string();

    match key {
        "t" | "type" => FilterKind::Type(TypeFilter::Contains(clean)),
        "e" | "element" => FilterKind::Element(symbol_filter(value, clean)),
        "k" | "keyword" => FilterKind::Keyword(symbol_filter(value, clean)),
        "c" | "cost" | "cmc" => FilterKind::Cost(CostFilter::Converted(parse_numeric_filter(value))),
        "r" | "rarity" => FilterKind::Rarity(clean),
        "s" | "set" => FilterKind::Set(SetFilter::Named(clean)),
        "o" | "oracle" | "text" => FilterKind::Oracle(clean),
        "mana" => FilterKind::Cost(CostFilter::ManaPattern(clean)),
        "is" => FilterKind::Type(TypeFilter::Is(clean.to_lowercase())),
        "game" => FilterKind::Set(SetFilter::Game(clean)),
        _ => FilterKind::Text(TextTerm::Field {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Element/keyword values are counts when they carry an operator.
fn symbol_filter(raw: &str, clean: String) -> SymbolFilter {
    if has_operator(raw) {
        SymbolFilter::Count(NumericFilter {
            op: extract_operator(raw),
            value: NumericValue::Int(extract_value(raw)),
        })
    } else {
        SymbolFilter::Named(clean)
    }
}

/// Split `e>=2` into (`e`, `>=2`) when the prefix is a numeric key.
fn split_operator_form(token: &str) -> Option<(String, &str)> {
    let pos = token.find(['<', '>', '='])?;
    let key = token[..pos].to_lowercase();
    if NUMERIC_KEYS.contains(&key.as_str()) {
        Some((key, &token[pos..]))
    } else {
        None
    }
}
