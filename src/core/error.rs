//! Error types.
//!
//! Query errors never reach callers of the DSL entry point: the search
//! boundary turns them into a plain substring search. They are still
//! surfaced by `search_query` for callers that want to report them.

/// Errors produced while tokenizing or parsing a DSL query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The query holds a non-whitespace control character.
    #[error("control character at position {position}")]
    ControlCharacter { position: usize },
}

/// Errors produced while building a card catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two records share the same id.
    #[error("card id `{0}` is already in the catalog")]
    DuplicateId(String),

    /// The card list could not be decoded.
    #[error("invalid card data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_display() {
        let err = QueryError::ControlCharacter { position: 2 };
        assert_eq!(err.to_string(), "control character at position 2");
    }

    #[test]
    fn test_catalog_error_from_json() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: CatalogError = json_err.into();
        assert!(matches!(err, CatalogError::Json(_)));
        assert!(err.to_string().starts_with("invalid card data"));
    }
}
