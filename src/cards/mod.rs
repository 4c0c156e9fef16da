//! Card records, symbol tables and the catalog.
//!
//! ## Key Types
//!
//! - `CardRecord`: one card as supplied by the host (JSON-shaped, read-only)
//! - `ElementId` / `KeywordId`: canonical symbol identities
//! - `CardCatalog`: ordered collection with id lookup and summaries

pub mod catalog;
pub mod record;
pub mod symbols;

pub use catalog::{CardCatalog, CardField, CollectionStats};
pub use record::{CardRecord, Cost, Elements, PriceInfo, Stat};
pub use symbols::{canonical_element, canonical_keyword, ElementId, KeywordId};
