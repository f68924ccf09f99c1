//! Numeral shape predicates
//!
//! Pure classifiers over a single text token. Surrounding whitespace is
//! tolerated; anything that does not match is simply `false`.

use regex::Regex;
use std::sync::OnceLock;

static INTEGER: OnceLock<Regex> = OnceLock::new();
static FRACTION: OnceLock<Regex> = OnceLock::new();
static EXPONENT: OnceLock<Regex> = OnceLock::new();
static DECIMAL: OnceLock<Regex> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    // Patterns are literals below; compilation cannot fail at runtime.
    cell.get_or_init(|| Regex::new(source).unwrap_or_else(|e| panic!("bad pattern {source}: {e}")))
}

/// Optional sign and one or more digits
pub fn is_integer(token: &str) -> bool {
    pattern(&INTEGER, r"^\s*[-+]?\d+\s*$").is_match(token)
}

/// `a/b` with an optional sign on `a`
pub fn is_fraction(token: &str) -> bool {
    pattern(&FRACTION, r"^\s*[-+]?\d+\s*/\s*\d+\s*$").is_match(token)
}

/// Digits, optional point and fraction digits, then `e`/`E` and a signed exponent
pub fn is_exponent(token: &str) -> bool {
    pattern(&EXPONENT, r"^\s*[-+]?\d+\.?\d*[eE][-+]?\d+\s*$").is_match(token)
}

/// Digits with an optional point and fraction digits
pub fn is_decimal(token: &str) -> bool {
    pattern(&DECIMAL, r"^\s*[-+]?\d+\.?\d*\s*$").is_match(token)
}

/// Outcome of reading a token as a whole number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerToken {
    Value(i64),
    /// Integer-shaped but does not fit in an `i64`
    Oversized,
    NotInteger,
}

impl IntegerToken {
    pub fn value(self) -> Option<i64> {
        match self {
            IntegerToken::Value(v) => Some(v),
            _ => None,
        }
    }
}

pub fn read_integer(token: &str) -> IntegerToken {
    if !is_integer(token) {
        return IntegerToken::NotInteger;
    }
    match token.trim().parse::<i64>() {
        Ok(value) => IntegerToken::Value(value),
        Err(_) => IntegerToken::Oversized,
    }
}

/// Numeric value of a determinant-style token (fraction, exponent or decimal).
///
/// `None` when the token has none of those shapes. A zero denominator yields
/// a non-finite value, which callers treat as out of range.
pub fn numeric_value(token: &str) -> Option<f64> {
    if is_fraction(token) {
        let (numerator, denominator) = token.split_once('/')?;
        let numerator: f64 = numerator.trim().parse().ok()?;
        let denominator: f64 = denominator.trim().parse().ok()?;
        return Some(numerator / denominator);
    }
    if is_exponent(token) || is_decimal(token) {
        return token.trim().parse().ok();
    }
    None
}
