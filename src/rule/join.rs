//! Contiguous Rule Joining
//!
//! Merges neighbouring rules that describe one continuous run, e.g. an
//! Arabic rule for pages 20-29 ("1".."10") followed by one for 30-39
//! ("11".."20").

use super::sequence::{first_canonical_page, last_canonical_page};
use super::types::{AutoJoinPlan, CanonicalPageRule, RuleJoin};
use crate::numeral::{NumeralCodec, NumeralType};

/// Which of two neighbouring rules survives a join
enum Keep {
    First,
    Second,
}

/// Decide whether `first` (earlier span) and `second` can be joined
fn joinable(first: &CanonicalPageRule, second: &CanonicalPageRule) -> Option<Keep> {
    if first.document_page_end.checked_add(1) != Some(second.document_page_start) {
        return None;
    }
    if first.numeral_type != second.numeral_type || first.rule_type != second.rule_type {
        return None;
    }
    if first.numeral_type == Some(NumeralType::Arbitrary) {
        return None;
    }

    // Each generated run is continuous on its own, so the seam decides
    if first.is_positive() {
        let seam = [last_canonical_page(first)?, first_canonical_page(second)?];
        if !NumeralCodec::detect_sequence_continuity(&seam) {
            return None;
        }
    }

    // Longer rule wins; equal spans keep the earlier-created one
    let keep = match first.page_count().cmp(&second.page_count()) {
        std::cmp::Ordering::Greater => Keep::First,
        std::cmp::Ordering::Less => Keep::Second,
        std::cmp::Ordering::Equal if first.created_at < second.created_at => Keep::First,
        std::cmp::Ordering::Equal => Keep::Second,
    };

    Some(keep)
}

/// Whether a rule listed between positions `a` and `b` touches their joined span
///
/// Joining moves one rule's pages to the other's position in the list, which
/// would change which rule wins on those pages.
fn interleaved(rules: &[CanonicalPageRule], a: usize, b: usize) -> bool {
    let start = rules[a].document_page_start.min(rules[b].document_page_start);
    let end = rules[a].document_page_end.max(rules[b].document_page_end);

    rules[a.min(b) + 1..a.max(b)]
        .iter()
        .any(|rule| rule.document_page_start <= end && start <= rule.document_page_end)
}

/// Join contiguous rules until no further join applies
///
/// Rules are considered in document order. Two neighbours join when their
/// spans touch, they share rule type and numeral type, and (for positive
/// rules) their generated labels form one continuous sequence. Arbitrary
/// rules never join. A pair is also left alone when a rule listed between
/// the two overlaps their combined span, so the resolved pages are the same
/// before and after the plan. The kept rule is widened to cover both spans
/// and reseeded from the first page so its labels stay unchanged.
pub fn auto_join_contiguous_rules(rules: &[CanonicalPageRule]) -> AutoJoinPlan {
    let mut current = rules.to_vec();
    let mut joins = Vec::new();

    loop {
        let mut order: Vec<usize> = (0..current.len()).collect();
        order.sort_by_key(|&i| current[i].document_page_start);

        let candidate = order.iter().find_map(|&first| {
            order.iter().find_map(|&second| {
                if first == second || interleaved(&current, first, second) {
                    return None;
                }
                joinable(&current[first], &current[second]).map(|keep| (first, second, keep))
            })
        });

        let Some((first_idx, second_idx, keep)) = candidate else {
            break;
        };

        let (keep_idx, remove_idx) = match keep {
            Keep::First => (first_idx, second_idx),
            Keep::Second => (second_idx, first_idx),
        };

        let start = current[first_idx].document_page_start;
        let end = current[second_idx].document_page_end;
        let seed = first_canonical_page(&current[first_idx]);
        let removed_rule_id = current[remove_idx].id.clone();

        let kept = &mut current[keep_idx];
        kept.document_page_start = start;
        kept.document_page_end = end;
        if kept.is_positive() {
            kept.starting_canonical_page = seed;
        }

        let join = RuleJoin {
            kept_rule_id: kept.id.clone(),
            removed_rule_id,
            document_page_start: start,
            document_page_end: end,
        };
        tracing::info!(
            kept = %join.kept_rule_id,
            removed = %join.removed_rule_id,
            start,
            end,
            "Joined contiguous rules"
        );

        current.remove(remove_idx);
        joins.push(join);
    }

    AutoJoinPlan {
        rules: current,
        joins,
    }
}
