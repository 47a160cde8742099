//! Rule Overlap Detection
//!
//! Rules are applied last-wins during resolution, so overlapping spans
//! silently shadow each other. These checks surface overlaps before a rule
//! is stored.

use super::types::{CanonicalPageRule, RuleConflict, RuleSummary};
use std::collections::BTreeSet;

/// Find existing rules overlapping the span `start..=end`
///
/// `exclude_rule_id` skips the rule being edited.
pub fn detect_rule_conflicts(
    existing: &[CanonicalPageRule],
    start: u32,
    end: u32,
    exclude_rule_id: Option<&str>,
) -> RuleConflict {
    let overlapping: Vec<&CanonicalPageRule> = existing
        .iter()
        .filter(|rule| exclude_rule_id != Some(rule.id.as_str()))
        .filter(|rule| start <= rule.document_page_end && end >= rule.document_page_start)
        .collect();

    let pages: BTreeSet<u32> = overlapping
        .iter()
        .flat_map(|rule| start.max(rule.document_page_start)..=end.min(rule.document_page_end))
        .collect();

    RuleConflict {
        document_pages: pages.into_iter().collect(),
        existing_rules: overlapping.into_iter().map(RuleSummary::from).collect(),
    }
}

/// Overlaps of every rule against the rules listed after it
///
/// Returns `(rule_id, conflict)` pairs for each rule whose span is shadowed
/// by a later rule, in input order.
pub fn find_overlapping_rules(rules: &[CanonicalPageRule]) -> Vec<(String, RuleConflict)> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(i, rule)| {
            let conflict = detect_rule_conflicts(
                &rules[i + 1..],
                rule.document_page_start,
                rule.document_page_end,
                Some(rule.id.as_str()),
            );
            (!conflict.is_empty()).then(|| (rule.id.clone(), conflict))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<CanonicalPageRule> {
        vec![
            CanonicalPageRule::roman("front", 1, 10, "i"),
            CanonicalPageRule::arabic("body", 11, 100, "1"),
            CanonicalPageRule::negative("plates", 50, 53),
        ]
    }

    #[test]
    fn test_no_overlap() {
        let conflict = detect_rule_conflicts(&rules(), 101, 120, None);
        assert!(conflict.is_empty());
        assert!(conflict.existing_rules.is_empty());
    }

    #[test]
    fn test_overlap_pages_sorted_and_deduplicated() {
        let conflict = detect_rule_conflicts(&rules(), 9, 12, None);
        assert_eq!(conflict.document_pages, vec![9, 10, 11, 12]);
        let ids: Vec<&str> = conflict.existing_rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["front", "body"]);

        let conflict = detect_rule_conflicts(&rules(), 52, 60, None);
        assert_eq!(conflict.document_pages, (52..=60).collect::<Vec<_>>());
        assert_eq!(conflict.existing_rules.len(), 2);
    }

    #[test]
    fn test_exclude_rule_being_edited() {
        let conflict = detect_rule_conflicts(&rules(), 1, 10, Some("front"));
        assert!(conflict.is_empty());
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        let conflict = detect_rule_conflicts(&rules(), 101, 101, None);
        assert!(conflict.is_empty());
        let conflict = detect_rule_conflicts(&rules(), 100, 100, None);
        assert_eq!(conflict.document_pages, vec![100]);
    }

    #[test]
    fn test_find_overlapping_rules() {
        let overlaps = find_overlapping_rules(&rules());
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].0, "body");
        assert_eq!(overlaps[0].1.document_pages, vec![50, 51, 52, 53]);
        assert_eq!(overlaps[0].1.existing_rules[0].id, "plates");
    }
}
