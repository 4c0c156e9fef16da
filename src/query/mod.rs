//! DSL query front end: tokenizer, numeric filters, parser.
//!
//! ## Key Types
//!
//! - `FilterKind`: one classified token
//! - `FilterSet`: all constraints of one query, one list per category
//! - `NumericFilter`: `{operator, value}` comparison

pub mod filter;
pub mod numeric;
pub mod parser;
pub mod tokenizer;

pub use filter::{
    CostFilter, FilterKind, FilterSet, LogicOp, SetFilter, SymbolFilter, Terms, TextTerm,
    TypeFilter,
};
pub use numeric::{
    extract_operator, extract_value, has_operator, parse_numeric_filter, CompareOp,
    NumericFilter, NumericValue,
};
pub use parser::{parse_query, parse_token, parse_tokens};
pub use tokenizer::{strip_quotes, tokenize};
