//! Rule Validation
//!
//! Structural checks applied before a rule is accepted.

use super::types::{CanonicalPageRule, Result, RuleError, RuleType};
use crate::numeral::{NumeralCodec, NumeralType};

/// Validate a rule's span and its positive-rule payload
pub fn validate_rule(rule: &CanonicalPageRule) -> Result<()> {
    if rule.document_page_start < 1 {
        return Err(RuleError::InvalidStartPage(rule.document_page_start));
    }

    if rule.document_page_start > rule.document_page_end {
        return Err(RuleError::InvertedRange {
            start: rule.document_page_start,
            end: rule.document_page_end,
        });
    }

    if rule.rule_type == RuleType::Negative {
        return Ok(());
    }

    let numeral_type = rule.numeral_type.ok_or(RuleError::MissingNumeralType)?;

    match numeral_type {
        NumeralType::Arabic | NumeralType::Roman => {
            let start = rule
                .starting_canonical_page
                .as_deref()
                .ok_or(RuleError::MissingStartingPage(numeral_type))?;

            let parses = match numeral_type {
                NumeralType::Arabic => start.trim().parse::<i64>().is_ok(),
                _ => NumeralCodec::roman_to_number(start).is_ok_and(|n| n >= 1),
            };
            if !parses {
                return Err(RuleError::InvalidStartingPage {
                    value: start.to_string(),
                    numeral_type,
                });
            }
        }
        NumeralType::Arbitrary => {
            let sequence = rule
                .arbitrary_sequence
                .as_ref()
                .ok_or(RuleError::MissingArbitrarySequence)?;
            let expected = rule.page_count() as usize;
            if sequence.len() != expected {
                return Err(RuleError::SequenceLengthMismatch {
                    expected,
                    actual: sequence.len(),
                });
            }
        }
    }

    Ok(())
}
