//! Canonical Page Sequence Generation
//!
//! Expands a positive rule into one canonical label per covered page.
//!
//! The whole run is validated arithmetically, but only the requested window
//! of labels is materialized, so a rule reaching far past the document end
//! costs no more than the pages it actually labels.

use super::types::{CanonicalPageRule, RuleType};
use crate::numeral::{NumeralCodec, NumeralType, MAX_ROMAN_VALUE, MIN_ROMAN_VALUE};

/// Labels for pages `offset..offset + take` of the rule (0-based within the rule)
///
/// `None` when the rule as a whole cannot be generated.
fn sequence_window(rule: &CanonicalPageRule, offset: usize, take: usize) -> Option<Vec<String>> {
    if rule.rule_type == RuleType::Negative {
        return None;
    }

    let page_count = usize::try_from(rule.page_count()).ok().filter(|&n| n > 0)?;
    let take = take.min(page_count.saturating_sub(offset));
    let skipped = i64::try_from(offset).ok()?;

    match rule.numeral_type? {
        NumeralType::Arabic => {
            let seed = rule.starting_canonical_page.as_deref()?;
            let start = seed.trim().parse::<i64>().ok()?;
            if NumeralCodec::sequence_end(start, page_count).is_none() {
                tracing::debug!(rule_id = %rule.id, seed, "Arabic sequence overflows");
                return None;
            }
            NumeralCodec::generate_arabic_numerals(start.checked_add(skipped)?, take).ok()
        }
        NumeralType::Roman => {
            let seed = rule.starting_canonical_page.as_deref()?;
            let start = match NumeralCodec::roman_to_number(seed) {
                Ok(start) => start,
                Err(e) => {
                    tracing::debug!(rule_id = %rule.id, error = %e, "Roman sequence not generated");
                    return None;
                }
            };
            let in_range = start >= MIN_ROMAN_VALUE
                && NumeralCodec::sequence_end(start, page_count)
                    .is_some_and(|end| end <= MAX_ROMAN_VALUE);
            if !in_range {
                tracing::debug!(rule_id = %rule.id, seed, "Roman sequence out of range");
                return None;
            }
            let first = start.checked_add(skipped)?;
            let last = first.checked_add(i64::try_from(take).ok()?)?;
            (first..last).map(|n| NumeralCodec::number_to_roman(n).ok()).collect()
        }
        NumeralType::Arbitrary => rule
            .arbitrary_sequence
            .as_ref()
            .filter(|sequence| sequence.len() == page_count)
            .map(|sequence| sequence.iter().skip(offset).take(take).cloned().collect()),
    }
}

/// Generate the canonical labels of a rule, one per covered page
///
/// Returns `None` for negative rules and for any rule whose sequence cannot
/// be produced: inverted span, missing seed, unparsable Arabic seed, an
/// Arabic run past `i64::MAX`, invalid or overflowing Roman seed, or an
/// arbitrary sequence whose length differs from the page count. Errors are
/// absorbed here so one bad rule never stops the resolution of the others.
pub fn generate_canonical_page_sequence(rule: &CanonicalPageRule) -> Option<Vec<String>> {
    sequence_window(rule, 0, usize::MAX)
}

/// Labels of the first `take` pages of the rule
///
/// Same failure cases as [`generate_canonical_page_sequence`].
pub(crate) fn generate_canonical_page_prefix(
    rule: &CanonicalPageRule,
    take: usize,
) -> Option<Vec<String>> {
    sequence_window(rule, 0, take)
}

/// Label of the first covered page
pub(crate) fn first_canonical_page(rule: &CanonicalPageRule) -> Option<String> {
    sequence_window(rule, 0, 1)?.into_iter().next()
}

/// Label of the last covered page
pub(crate) fn last_canonical_page(rule: &CanonicalPageRule) -> Option<String> {
    let last_offset = usize::try_from(rule.page_count() - 1).ok()?;
    sequence_window(rule, last_offset, 1)?.into_iter().next()
}
