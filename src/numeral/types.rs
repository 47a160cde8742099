//! Numeral module core types
//!
//! Contains the numeral classification enum and codec error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Smallest value representable as a Roman numeral
pub const MIN_ROMAN_VALUE: i64 = 1;

/// Largest value representable as a Roman numeral (no overline forms)
pub const MAX_ROMAN_VALUE: i64 = 3999;

/// Value/symbol pairs used for greedy Roman encoding, largest first
pub(crate) const ROMAN_ENCODE_TABLE: [(i64, &str); 13] = [
    (1000, "m"),
    (900, "cm"),
    (500, "d"),
    (400, "cd"),
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

// ============================================================
// Error Types
// ============================================================

/// Numeral codec error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumeralError {
    #[error("Invalid Roman numeral: {0}")]
    InvalidNumeral(String),

    #[error("Number out of range for Roman numerals: {0}")]
    OutOfRange(i64),

    #[error("Sequence of {count} numbers starting at {start} overflows")]
    SequenceOverflow { start: i64, count: usize },
}

pub type Result<T> = std::result::Result<T, NumeralError>;

// ============================================================
// Core Data Structures
// ============================================================

/// Lexical class of a canonical page label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralType {
    /// Decimal digits ("1", "212")
    Arabic,
    /// Roman letters in any case ("iv", "XII")
    Roman,
    /// Anything else ("A-1", "Plate 3")
    Arbitrary,
}

impl NumeralType {
    /// Wire name of the numeral type
    pub fn as_str(&self) -> &'static str {
        match self {
            NumeralType::Arabic => "arabic",
            NumeralType::Roman => "roman",
            NumeralType::Arbitrary => "arbitrary",
        }
    }
}

impl fmt::Display for NumeralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
