//! Core types shared by every search: configuration, errors, RNG.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{SearchConfig, DEFAULT_MIN_QUERY_LEN};
pub use error::{CatalogError, QueryError, QueryResult};
pub use rng::SortRng;
