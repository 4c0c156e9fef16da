//! Query tokenizer.
//!
//! Splits on unquoted whitespace. Quote characters (`"` or `'`) are kept in
//! the emitted token; the parser strips them from field values. There is no
//! escape syntax inside quotes, and a quote left open runs to the end of the
//! input, so apostrophes in words (`o:don't`) stay ordinary characters.

use crate::core::{QueryError, QueryResult};

/// Split a raw query into tokens.
///
/// Control characters other than whitespace are rejected so the caller can
/// fall back to a plain substring search.
///
/// ```
/// use card_query::query::tokenize;
///
/// let tokens = tokenize(r#"t:"legendary familiar" e:fire"#).unwrap();
/// assert_eq!(tokens, vec![r#"t:"legendary familiar""#, "e:fire"]);
/// ```
pub fn tokenize(query: &str) -> QueryResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for (position, c) in query.chars().enumerate() {
        if c.is_control() && !c.is_whitespace() {
            return Err(QueryError::ControlCharacter { position });
        }
        match quote {
            Some(open) => {
                current.push(c);
                if c == open {
                    quote = None;
                }
            }
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                current.push(c);
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Strip one leading and one trailing quote character.
#[must_use]
pub fn strip_quotes(value: &str) -> &str {
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('\''))
        .unwrap_or(value);
    value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value)
}
