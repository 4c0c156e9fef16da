//! # card-query
//!
//! Search engine for an in-memory trading-card catalog.
//!
//! ## Entry Points
//!
//! 1. **DSL queries**: `t:familiar e:fire k>=2 -token`. Parse failures never
//!    reach the caller of `parse_search_query`; the raw query is matched as a
//!    substring instead.
//!
//! 2. **Criteria objects**: a flat, camelCase key/value record as built by
//!    advanced-search forms, with per-field comparison modes and a global
//!    `and`/`or` combination.
//!
//! Both paths share the card model and the result processor (stable sort,
//! pagination, grouping with header records).
//!
//! ## Modules
//!
//! - `core`: configuration, errors, seeded RNG for random ordering
//! - `cards`: card records, element/keyword symbol tables, catalog
//! - `query`: tokenizer, numeric filters, DSL parser
//! - `criteria`: criteria object and its normalized form
//! - `matcher`: `CardFilter` implementations for both paths
//! - `results`: sort, paginate, group
//! - `search`: entry points
//!
//! ## Example
//!
//! ```
//! use card_query::{parse_search_query, CardRecord, SearchConfig};
//!
//! let cards = vec![
//!     CardRecord::new("1", "Ember Sprite", "Familiar").with_elements(["Fire"]),
//!     CardRecord::new("2", "Spark Token", "Familiar").with_elements(["△"]),
//!     CardRecord::new("3", "Tidal Guard", "Familiar").with_elements(["Water"]),
//! ];
//!
//! let found = parse_search_query("e:fire -token", &cards, &SearchConfig::default());
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].name, "Ember Sprite");
//! ```

pub mod cards;
pub mod core;
pub mod criteria;
pub mod matcher;
pub mod query;
pub mod results;
pub mod search;

// Re-export commonly used types
pub use crate::core::{CatalogError, QueryError, QueryResult, SearchConfig, SortRng};

pub use crate::cards::{
    canonical_element, canonical_keyword, CardCatalog, CardField, CardRecord, CollectionStats,
    ElementId, KeywordId,
};

pub use crate::query::{parse_query, tokenize, CompareOp, FilterKind, FilterSet, NumericFilter};

pub use crate::criteria::{CombineMode, CriteriaSet, Criterion, SearchCriteria};

pub use crate::matcher::{simple_text_search, CardFilter, CriteriaMatcher, DslMatcher};

pub use crate::results::{GroupBy, GroupHeader, ResultEntry, ResultOptions, SortKey, SortOrder};

pub use crate::search::{
    parse_search_query, search_cards, search_query, search_query_with_options,
};
