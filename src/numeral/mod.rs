//! Numeral codec module
//!
//! Converts canonical page labels between Roman and Arabic forms and
//! classifies free-form labels.
//!
//! # Features
//!
//! - Subtractive-pair Roman decoding (case-insensitive)
//! - Greedy Roman encoding for 1..=3999 (lowercase output)
//! - Arabic and Roman sequence generation
//! - Lexical numeral type detection and continuity checks
//!
//! # Example
//!
//! ```rust
//! use canonical_pages::{NumeralCodec, NumeralType};
//!
//! let labels = NumeralCodec::generate_roman_numerals("ix", 3).unwrap();
//! assert_eq!(labels, vec!["ix", "x", "xi"]);
//! assert_eq!(NumeralCodec::detect_numeral_type("212"), NumeralType::Arabic);
//! ```

// Submodules
mod codec;
mod types;

// Re-export public API
pub use codec::NumeralCodec;
pub use types::{NumeralError, NumeralType, Result, MAX_ROMAN_VALUE, MIN_ROMAN_VALUE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_round_trip() {
        let roman = NumeralCodec::number_to_roman(48).unwrap();
        assert_eq!(roman, "xlviii");
        assert_eq!(NumeralCodec::roman_to_number(&roman), Ok(48));
    }

    #[test]
    fn test_roman_bounds_constants() {
        assert!(NumeralCodec::number_to_roman(MIN_ROMAN_VALUE).is_ok());
        assert!(NumeralCodec::number_to_roman(MAX_ROMAN_VALUE).is_ok());
        assert!(matches!(
            NumeralCodec::number_to_roman(MAX_ROMAN_VALUE + 1),
            Err(NumeralError::OutOfRange(_))
        ));
    }
}
