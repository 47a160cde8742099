//! Canonical Page Resolution
//!
//! Merges rules over region detections over the document page baseline.
//!
//! Precedence, highest first:
//! 1. User-defined rules (later rules win over earlier ones)
//! 2. Region-derived page numbers
//! 3. Unaccounted (document page number)

use super::types::{CanonicalPageInfo, CanonicalPageStatistics, CanonicalPages, Resolution};
use crate::region::{ConflictDetector, Region, RegionDerivedPageNumber};
use crate::rule::{generate_canonical_page_prefix, CanonicalPageRule, RuleType};

/// Computes the authoritative canonical page of every document page
pub struct CanonicalPageResolver;

impl CanonicalPageResolver {
    /// Compute canonical pages for all document pages
    ///
    /// 1. Conflicting page-number regions block resolution entirely.
    /// 2. Every page starts as its own document page number.
    /// 3. Region detections overwrite the baseline (last fact wins).
    /// 4. Rules overwrite everything, in input order.
    ///
    /// Facts and rule spans outside `1..=document_page_count` are ignored.
    pub fn compute_canonical_pages(
        document_page_count: u32,
        regions: &[Region],
        rules: &[CanonicalPageRule],
        region_derived_page_numbers: &[RegionDerivedPageNumber],
    ) -> Resolution {
        let conflicts = ConflictDetector::detect_page_number_conflicts(
            regions,
            document_page_count,
            Some(region_derived_page_numbers),
        );
        if !conflicts.is_empty() {
            return Resolution::Conflicted(conflicts);
        }

        let mut pages: Vec<CanonicalPageInfo> = (1..=document_page_count)
            .map(CanonicalPageInfo::unaccounted)
            .collect();

        for fact in region_derived_page_numbers {
            match Self::slot(&mut pages, fact.document_page) {
                Some(slot) => {
                    *slot = CanonicalPageInfo::region(
                        fact.canonical_page.clone(),
                        fact.region_id.clone(),
                    )
                }
                None => tracing::debug!(
                    page = fact.document_page,
                    region_id = %fact.region_id,
                    "Ignoring region detection outside document"
                ),
            }
        }

        for rule in rules {
            Self::apply_rule(&mut pages, document_page_count, rule);
        }

        tracing::debug!(
            pages = pages.len(),
            rules = rules.len(),
            detections = region_derived_page_numbers.len(),
            "Canonical pages resolved"
        );

        Resolution::Resolved(CanonicalPages::from_vec(pages))
    }

    /// Mutable entry of a 1-indexed document page
    fn slot(pages: &mut [CanonicalPageInfo], document_page: u32) -> Option<&mut CanonicalPageInfo> {
        let index = usize::try_from(document_page).ok()?.checked_sub(1)?;
        pages.get_mut(index)
    }

    /// Overlay one rule; a rule whose sequence cannot be generated touches nothing
    ///
    /// Only the pages inside the document are visited and labeled.
    fn apply_rule(
        pages: &mut [CanonicalPageInfo],
        document_page_count: u32,
        rule: &CanonicalPageRule,
    ) {
        let last_page = rule.document_page_end.min(document_page_count);

        match rule.rule_type {
            RuleType::Negative => {
                for page in rule.document_page_start..=last_page {
                    if let Some(slot) = Self::slot(pages, page) {
                        *slot = CanonicalPageInfo::rule_negative(rule.id.clone());
                    }
                }
            }
            RuleType::Positive => {
                let in_document = if rule.document_page_start > last_page {
                    0
                } else {
                    (last_page - rule.document_page_start) as usize + 1
                };
                let Some(sequence) = generate_canonical_page_prefix(rule, in_document) else {
                    tracing::warn!(
                        rule_id = %rule.id,
                        start = rule.document_page_start,
                        end = rule.document_page_end,
                        "Skipping rule: canonical page sequence could not be generated"
                    );
                    return;
                };

                for (page, label) in (rule.document_page_start..).zip(sequence) {
                    if label.is_empty() {
                        continue;
                    }
                    if let Some(slot) = Self::slot(pages, page) {
                        *slot = CanonicalPageInfo::rule_positive(label, rule.id.clone());
                    }
                }
            }
        }
    }
}

/// Canonical page info of a document page, `None` if absent
pub fn get_canonical_page_for_page(
    document_page: u32,
    canonical_pages: &CanonicalPages,
) -> Option<&CanonicalPageInfo> {
    canonical_pages.get(document_page)
}

/// Page counts by source
pub fn get_canonical_pages_statistics(canonical_pages: &CanonicalPages) -> CanonicalPageStatistics {
    canonical_pages.statistics()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::types::{PageColor, PageSource};
    use crate::page_range::PageConfig;

    fn resolve(
        count: u32,
        regions: &[Region],
        rules: &[CanonicalPageRule],
        facts: &[RegionDerivedPageNumber],
    ) -> CanonicalPages {
        CanonicalPageResolver::compute_canonical_pages(count, regions, rules, facts).into_pages()
    }

    fn label(pages: &CanonicalPages, page: u32) -> Option<&str> {
        pages.get(page).and_then(|info| info.canonical_page.as_deref())
    }

    #[test]
    fn test_baseline_unaccounted() {
        for count in [0u32, 1, 7, 250] {
            let pages = resolve(count, &[], &[], &[]);
            assert_eq!(pages.len(), count as usize);
            for (page, info) in pages.iter() {
                assert_eq!(info.source, PageSource::Unaccounted);
                assert_eq!(info.color, PageColor::Red);
                assert_eq!(info.canonical_page, Some(page.to_string()));
            }
        }
    }

    #[test]
    fn test_region_overlay() {
        let regions = vec![Region::page_number("r1", "Footer", PageConfig::all_pages())];
        let facts = vec![
            RegionDerivedPageNumber::new(2, "ii", "r1", "Footer"),
            RegionDerivedPageNumber::new(3, "iii", "r1", "Footer"),
        ];
        let pages = resolve(4, &regions, &[], &facts);
        assert_eq!(label(&pages, 1), Some("1"));
        let info = pages.get(2).unwrap();
        assert_eq!(info.source, PageSource::Region);
        assert_eq!(info.source_id.as_deref(), Some("r1"));
        assert_eq!(info.color, PageColor::Green);
        assert_eq!(label(&pages, 3), Some("iii"));
    }

    #[test]
    fn test_region_fact_last_write_wins() {
        let facts = vec![
            RegionDerivedPageNumber::new(1, "first", "r1", "Footer"),
            RegionDerivedPageNumber::new(1, "second", "r1", "Footer"),
        ];
        let pages = resolve(2, &[], &[], &facts);
        assert_eq!(label(&pages, 1), Some("second"));
    }

    #[test]
    fn test_region_fact_outside_document_ignored() {
        let facts = vec![
            RegionDerivedPageNumber::new(0, "x", "r1", "Footer"),
            RegionDerivedPageNumber::new(9, "y", "r1", "Footer"),
        ];
        let pages = resolve(3, &[], &[], &facts);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages.statistics().unaccounted_pages, 3);
    }

    #[test]
    fn test_negative_rule() {
        let rules = vec![CanonicalPageRule::negative("n1", 3, 5)];
        let pages = resolve(7, &[], &rules, &[]);
        for page in 3..=5 {
            let info = pages.get(page).unwrap();
            assert!(info.canonical_page.is_none());
            assert_eq!(info.color, PageColor::Gray);
            assert_eq!(info.source, PageSource::RuleNegative);
            assert_eq!(info.source_id.as_deref(), Some("n1"));
        }
        assert_eq!(label(&pages, 2), Some("2"));
        assert_eq!(label(&pages, 6), Some("6"));
    }

    #[test]
    fn test_positive_roman_rule() {
        let rules = vec![CanonicalPageRule::roman("p1", 1, 3, "i")];
        let pages = resolve(5, &[], &rules, &[]);
        assert_eq!(label(&pages, 1), Some("i"));
        assert_eq!(label(&pages, 2), Some("ii"));
        assert_eq!(label(&pages, 3), Some("iii"));
        assert_eq!(pages.get(3).unwrap().color, PageColor::Blue);
        assert_eq!(label(&pages, 4), Some("4"));
    }

    #[test]
    fn test_rules_override_regions() {
        let regions = vec![Region::page_number("r1", "Footer", PageConfig::all_pages())];
        let facts = vec![RegionDerivedPageNumber::new(2, "9", "r1", "Footer")];
        let rules = vec![CanonicalPageRule::arabic("p1", 2, 3, "1")];
        let pages = resolve(3, &regions, &rules, &facts);
        let info = pages.get(2).unwrap();
        assert_eq!(info.source, PageSource::RulePositive);
        assert_eq!(info.canonical_page.as_deref(), Some("1"));
    }

    #[test]
    fn test_later_rule_wins() {
        let rules = vec![
            CanonicalPageRule::arabic("body", 1, 10, "1"),
            CanonicalPageRule::negative("plate", 4, 5),
        ];
        let pages = resolve(10, &[], &rules, &[]);
        assert_eq!(pages.get(4).unwrap().source, PageSource::RuleNegative);
        assert_eq!(label(&pages, 6), Some("6"));

        let reversed: Vec<CanonicalPageRule> = rules.into_iter().rev().collect();
        let pages = resolve(10, &[], &reversed, &[]);
        assert_eq!(label(&pages, 4), Some("4"));
        assert_eq!(pages.statistics().user_defined_negative_pages, 0);
    }

    #[test]
    fn test_malformed_rule_leaves_pages_untouched() {
        let regions = vec![Region::page_number("r1", "Footer", PageConfig::all_pages())];
        let facts = vec![RegionDerivedPageNumber::new(2, "b", "r1", "Footer")];
        let rules = vec![
            CanonicalPageRule::roman("bad", 1, 3, "not-roman"),
            CanonicalPageRule::arbitrary("short", 1, 3, ["x"]),
        ];
        let pages = resolve(3, &regions, &rules, &facts);
        assert_eq!(label(&pages, 1), Some("1"));
        assert_eq!(label(&pages, 2), Some("b"));
        assert_eq!(pages.get(2).unwrap().source, PageSource::Region);
    }

    #[test]
    fn test_rule_clamped_to_document() {
        let rules = vec![
            CanonicalPageRule::arabic("p1", 3, 8, "10"),
            CanonicalPageRule::negative("n1", 0, 1),
        ];
        let pages = resolve(5, &[], &rules, &[]);
        assert_eq!(pages.len(), 5);
        assert_eq!(label(&pages, 5), Some("12"));
        assert_eq!(pages.get(1).unwrap().source, PageSource::RuleNegative);
    }

    #[test]
    fn test_arabic_rule_overflowing_seed_skipped() {
        let rules = vec![CanonicalPageRule::arabic("r", 1, 3, i64::MAX.to_string())];
        let pages = resolve(3, &[], &rules, &[]);
        assert_eq!(pages.statistics().unaccounted_pages, 3);
        assert_eq!(label(&pages, 1), Some("1"));

        // The last label still fits
        let rules = vec![CanonicalPageRule::arabic("r", 2, 3, (i64::MAX - 1).to_string())];
        let pages = resolve(3, &[], &rules, &[]);
        assert_eq!(label(&pages, 3), Some(i64::MAX.to_string().as_str()));
    }

    #[test]
    fn test_rule_far_past_document_end() {
        let rules = vec![
            CanonicalPageRule::arabic("body", 1, 30_000_000, "1"),
            CanonicalPageRule::negative("tail", 9, u32::MAX),
        ];
        let pages = resolve(10, &[], &rules, &[]);
        assert_eq!(pages.len(), 10);
        assert_eq!(label(&pages, 8), Some("8"));
        assert_eq!(pages.get(10).unwrap().source, PageSource::RuleNegative);

        // Rules starting after the last page touch nothing
        let rules = vec![CanonicalPageRule::arabic("late", 11, 20, "1")];
        assert_eq!(resolve(10, &[], &rules, &[]).statistics().unaccounted_pages, 10);
    }

    #[test]
    fn test_roman_rule_past_limit_skipped_inside_document() {
        // Only 3 pages exist, but the full run would pass mmmcmxcix
        let rules = vec![CanonicalPageRule::roman("r", 1, 4000, "i")];
        let pages = resolve(3, &[], &rules, &[]);
        assert_eq!(pages.statistics().user_defined_positive_pages, 0);
    }

    #[test]
    fn test_empty_arbitrary_label_skipped() {
        let rules = vec![CanonicalPageRule::arbitrary("x", 1, 3, ["A", "", "C"])];
        let pages = resolve(3, &[], &rules, &[]);
        assert_eq!(label(&pages, 1), Some("A"));
        assert_eq!(pages.get(2).unwrap().source, PageSource::Unaccounted);
        assert_eq!(label(&pages, 3), Some("C"));
    }

    #[test]
    fn test_conflict_blocks_whole_document() {
        let regions = vec![
            Region::page_number("a", "Footer", PageConfig::all_pages()),
            Region::page_number("b", "Header", PageConfig::page_range("10")),
        ];
        let facts = vec![
            RegionDerivedPageNumber::new(10, "8", "a", "Footer"),
            RegionDerivedPageNumber::new(10, "viii", "b", "Header"),
        ];
        let rules = vec![CanonicalPageRule::arabic("p1", 1, 20, "1")];
        let resolution =
            CanonicalPageResolver::compute_canonical_pages(20, &regions, &rules, &facts);
        assert!(resolution.is_conflicted());
        assert_eq!(resolution.conflicts()[0].page_number, 10);
        assert!(resolution.into_pages().is_empty());
    }

    #[test]
    fn test_get_canonical_page_for_page() {
        let pages = resolve(2, &[], &[], &[]);
        assert_eq!(
            get_canonical_page_for_page(2, &pages).and_then(|i| i.canonical_page.clone()),
            Some("2".to_string())
        );
        assert!(get_canonical_page_for_page(3, &pages).is_none());
    }

    #[test]
    fn test_get_canonical_pages_statistics() {
        let rules = vec![
            CanonicalPageRule::arabic("p1", 1, 2, "1"),
            CanonicalPageRule::negative("n1", 3, 3),
        ];
        let facts = vec![RegionDerivedPageNumber::new(4, "x", "r1", "Footer")];
        let stats = get_canonical_pages_statistics(&resolve(5, &[], &rules, &facts));
        assert_eq!(stats.total_pages, 5);
        assert_eq!(stats.user_defined_positive_pages, 2);
        assert_eq!(stats.user_defined_negative_pages, 1);
        assert_eq!(stats.region_derived_pages, 1);
        assert_eq!(stats.unaccounted_pages, 1);
    }
}
