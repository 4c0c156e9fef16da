//! Structured criteria input and its normalized form.
//!
//! ## Key Types
//!
//! - `SearchCriteria`: flat camelCase object, every key optional
//! - `Criterion`: one typed, non-trivial constraint
//! - `CriteriaSet`: the constraints plus the `and`/`or` combination mode

pub mod normalize;
pub mod types;

pub use normalize::{CollectorFilter, CriteriaSet, Criterion, StatFilter, StatTarget};
pub use types::{
    CollectorComparison, CombineMode, ElementComparison, FormatStatus, InclusionMode,
    KeywordComparison, ManaCostComparison, PriceComparison, RangeInput, SearchCriteria, StatInput,
    StringMatch, TextComparison,
};
