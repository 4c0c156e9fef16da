//! Numeric comparison filters (`c>=3`, `e:2`, `k>=2`, `attack ≤ 4`).

use serde::{Deserialize, Serialize};

use crate::cards::record::{first_int, leading_int};

/// Comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// Parse an operator symbol. Accepts ASCII and Unicode forms.
    #[must_use]
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "=" | "==" => Some(CompareOp::Eq),
            "≠" | "!=" => Some(CompareOp::Ne),
            "<" => Some(CompareOp::Lt),
            "≤" | "<=" => Some(CompareOp::Le),
            ">" => Some(CompareOp::Gt),
            "≥" | ">=" => Some(CompareOp::Ge),
            _ => None,
        }
    }

    /// ASCII symbol for this operator.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    /// Apply the operator: `lhs op rhs`.
    #[must_use]
    pub fn compare<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ne => lhs != rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Ge => lhs >= rhs,
        }
    }
}

/// Right-hand side of a numeric filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericValue {
    Int(i64),
    /// `*`: the wildcard stat sentinel.
    Wildcard,
    /// Value that failed to parse. Never matches.
    Invalid,
}

/// An `{operator, value}` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumericFilter {
    pub op: CompareOp,
    pub value: NumericValue,
}

impl NumericFilter {
    #[must_use]
    pub const fn new(op: CompareOp, value: i64) -> Self {
        Self {
            op,
            value: NumericValue::Int(value),
        }
    }

    /// Does `actual` satisfy this filter?
    #[must_use]
    pub fn matches(&self, actual: i64) -> bool {
        match self.value {
            NumericValue::Int(expected) => self.op.compare(actual, expected),
            NumericValue::Wildcard => self.op == CompareOp::Eq,
            NumericValue::Invalid => false,
        }
    }
}

const OPERATORS: [(&str, CompareOp); 5] = [
    (">=", CompareOp::Ge),
    ("<=", CompareOp::Le),
    (">", CompareOp::Gt),
    ("<", CompareOp::Lt),
    ("=", CompareOp::Eq),
];

/// Does the value embed a comparison operator anywhere?
#[must_use]
pub fn has_operator(value: &str) -> bool {
    OPERATORS.iter().any(|(symbol, _)| value.contains(symbol))
}

/// Parse a cost-style value (`>=3`, `2`, `*`).
///
/// The first operator found (checked longest first) is removed and the
/// remainder parsed as a leading integer. Without any operator the value is
/// an equality test, with unparseable text defaulting to 0.
#[must_use]
pub fn parse_numeric_filter(value: &str) -> NumericFilter {
    let value = super::tokenizer::strip_quotes(value.trim());

    for (symbol, op) in OPERATORS {
        if value.contains(symbol) {
            let rest = value.replacen(symbol, "", 1);
            let parsed = leading_int(&rest).map_or(NumericValue::Invalid, NumericValue::Int);
            return NumericFilter { op, value: parsed };
        }
    }

    if value == "*" || value == "∗" {
        return NumericFilter {
            op: CompareOp::Eq,
            value: NumericValue::Wildcard,
        };
    }

    NumericFilter::new(CompareOp::Eq, leading_int(value).unwrap_or(0))
}

/// First operator present in the value, `=` when none.
#[must_use]
pub fn extract_operator(value: &str) -> CompareOp {
    OPERATORS
        .iter()
        .find(|(symbol, _)| value.contains(symbol))
        .map_or(CompareOp::Eq, |(_, op)| *op)
}

/// First run of digits in the value, 0 when none.
#[must_use]
pub fn extract_value(value: &str) -> i64 {
    first_int(value).unwrap_or(0)
}
