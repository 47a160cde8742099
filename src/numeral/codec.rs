//! Numeral Codec Implementation
//!
//! Roman/Arabic conversion, sequence generation and label classification.

use super::types::{
    NumeralError, NumeralType, Result, MAX_ROMAN_VALUE, MIN_ROMAN_VALUE, ROMAN_ENCODE_TABLE,
};

/// Converts and classifies canonical page labels
pub struct NumeralCodec;

impl NumeralCodec {
    /// Value of a single Roman symbol (case-insensitive)
    fn roman_symbol_value(symbol: char) -> Option<i64> {
        match symbol.to_ascii_uppercase() {
            'I' => Some(1),
            'V' => Some(5),
            'X' => Some(10),
            'L' => Some(50),
            'C' => Some(100),
            'D' => Some(500),
            'M' => Some(1000),
            _ => None,
        }
    }

    /// Decode a Roman numeral using the subtractive-pair rule
    ///
    /// Scans left to right and subtracts a symbol when a larger one follows.
    /// The input is not checked for canonical form ("IIII" decodes to 4).
    pub fn roman_to_number(roman: &str) -> Result<i64> {
        let values = roman
            .chars()
            .map(|c| {
                Self::roman_symbol_value(c)
                    .ok_or_else(|| NumeralError::InvalidNumeral(roman.to_string()))
            })
            .collect::<Result<Vec<i64>>>()?;

        let mut result = 0i64;
        for (i, current) in values.iter().enumerate() {
            match values.get(i + 1) {
                Some(next) if current < next => result -= current,
                _ => result += current,
            }
        }

        Ok(result)
    }

    /// Encode a number as a lowercase Roman numeral (1..=3999)
    pub fn number_to_roman(num: i64) -> Result<String> {
        if !(MIN_ROMAN_VALUE..=MAX_ROMAN_VALUE).contains(&num) {
            return Err(NumeralError::OutOfRange(num));
        }

        let mut result = String::new();
        let mut remaining = num;

        for (value, symbol) in ROMAN_ENCODE_TABLE {
            while remaining >= value {
                result.push_str(symbol);
                remaining -= value;
            }
        }

        Ok(result)
    }

    /// Value of the last element of `count` consecutive numbers from `start`
    ///
    /// `None` when the run does not fit in an `i64`. An empty run ends at `start`.
    pub(crate) fn sequence_end(start: i64, count: usize) -> Option<i64> {
        let offset = i64::try_from(count.saturating_sub(1)).ok()?;
        start.checked_add(offset)
    }

    /// Generate `count` consecutive lowercase Roman numerals starting at `start`
    pub fn generate_roman_numerals(start: &str, count: usize) -> Result<Vec<String>> {
        let start_num = Self::roman_to_number(start)?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let end_num = Self::sequence_end(start_num, count).unwrap_or(i64::MAX);
        if start_num < MIN_ROMAN_VALUE {
            return Err(NumeralError::OutOfRange(start_num));
        }
        if end_num > MAX_ROMAN_VALUE {
            return Err(NumeralError::OutOfRange(MAX_ROMAN_VALUE + 1));
        }

        (start_num..=end_num).map(Self::number_to_roman).collect()
    }

    /// Generate `count` consecutive decimal labels starting at `start`
    ///
    /// Zero and negative starts are allowed. Fails when the last number
    /// would not fit in an `i64`.
    pub fn generate_arabic_numerals(start: i64, count: usize) -> Result<Vec<String>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let end = Self::sequence_end(start, count)
            .ok_or(NumeralError::SequenceOverflow { start, count })?;
        Ok((start..=end).map(|n| n.to_string()).collect())
    }

    /// Classify a label as Arabic, Roman or arbitrary
    ///
    /// Roman detection is lexical only, so a word such as "mix" is Roman.
    pub fn detect_numeral_type(value: &str) -> NumeralType {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            NumeralType::Arabic
        } else if !value.is_empty()
            && value.chars().all(|c| Self::roman_symbol_value(c).is_some())
        {
            NumeralType::Roman
        } else {
            NumeralType::Arbitrary
        }
    }

    /// Check whether labels form a run where each is exactly one more than the last
    ///
    /// Fewer than two values is trivially continuous. Mixed numeral types and
    /// arbitrary labels are never continuous.
    pub fn detect_sequence_continuity<S: AsRef<str>>(values: &[S]) -> bool {
        if values.len() < 2 {
            return true;
        }

        let first_type = Self::detect_numeral_type(values[0].as_ref());
        if values
            .iter()
            .any(|v| Self::detect_numeral_type(v.as_ref()) != first_type)
        {
            return false;
        }

        let numbers: Option<Vec<i64>> = match first_type {
            NumeralType::Arabic => values.iter().map(|v| v.as_ref().parse::<i64>().ok()).collect(),
            NumeralType::Roman => values
                .iter()
                .map(|v| Self::roman_to_number(v.as_ref()).ok())
                .collect(),
            NumeralType::Arbitrary => return false,
        };

        match numbers {
            Some(numbers) => numbers
                .windows(2)
                .all(|pair| pair[0].checked_add(1) == Some(pair[1])),
            None => false,
        }
    }

    /// Split comma-separated user input into trimmed, non-empty labels
    pub fn parse_arbitrary_sequence(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate raw text read from a page-number region
    ///
    /// Returns the trimmed label when it looks like a page number (digits,
    /// Roman letters or a purely alphabetic label), otherwise `None`.
    pub fn normalize_detected_label(text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let plausible = trimmed.bytes().all(|b| b.is_ascii_digit())
            || trimmed.bytes().all(|b| b.is_ascii_alphabetic());

        plausible.then(|| trimmed.to_string())
    }
}
