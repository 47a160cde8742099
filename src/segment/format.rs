//! Segment Formatting
//!
//! Compresses resolved pages into display-ready runs. Both formatters make a
//! single pass over the pages in document order.

use super::types::{
    CanonicalPageRange, CanonicalPageSegment, DocumentPageRange, DISPLAY_SEPARATOR,
    NO_PAGES_DISPLAY,
};
use crate::canonical::{CanonicalPageInfo, CanonicalPages, PageColor, PageSource};
use crate::page_range::{normalize_page_range, parse_page_range, EN_DASH};
use crate::region::Region;
use crate::rule::CanonicalPageRule;

/// Compact display run (document span, label span, source)
struct DisplayRun<'a> {
    start_doc_page: u32,
    end_doc_page: u32,
    start_canonical: Option<&'a str>,
    end_canonical: Option<&'a str>,
    source: PageSource,
    color: PageColor,
}

/// Formats resolved canonical pages for the UI
pub struct SegmentFormatter;

impl SegmentFormatter {
    /// Check if `info` on `page` continues `segment`
    ///
    /// Region pages merge with any region segment, even across regions.
    /// Every other source must match both source and id.
    fn can_extend(segment: &CanonicalPageSegment, page: u32, info: &CanonicalPageInfo) -> bool {
        if page != segment.document_page_range.end + 1 {
            return false;
        }
        match info.source {
            PageSource::Region => segment.source == PageSource::Region,
            _ => info.source == segment.source && info.source_id == segment.rule_id,
        }
    }

    /// Display name of a region; unnamed regions contribute none
    fn region_name<'a>(regions: &'a [Region], region_id: &str) -> Option<&'a str> {
        regions
            .iter()
            .find(|r| r.id == region_id)
            .map(|r| r.name.as_str())
            .filter(|name| !name.is_empty())
    }

    fn start_segment(
        page: u32,
        info: &CanonicalPageInfo,
        rules: &[CanonicalPageRule],
        regions: &[Region],
    ) -> CanonicalPageSegment {
        let mut segment = CanonicalPageSegment {
            document_page_range: DocumentPageRange { start: page, end: page },
            canonical_page_range: CanonicalPageRange {
                start: info.canonical_page.clone(),
                end: info.canonical_page.clone(),
            },
            source: info.source,
            color: info.color,
            rule_id: None,
            region_ids: Vec::new(),
            region_names: Vec::new(),
            label: None,
        };

        match info.source {
            PageSource::RulePositive | PageSource::RuleNegative => {
                segment.rule_id = info.source_id.clone();
                segment.label = info
                    .source_id
                    .as_deref()
                    .and_then(|id| rules.iter().find(|r| r.id == id))
                    .and_then(|r| r.label.clone())
                    .filter(|label| !label.is_empty());
            }
            PageSource::Region => {
                if let Some(region_id) = info.source_id.as_deref() {
                    segment.region_ids.push(region_id.to_string());
                    if let Some(name) = Self::region_name(regions, region_id) {
                        segment.region_names.push(name.to_string());
                    }
                }
            }
            PageSource::Unaccounted => {}
        }

        segment
    }

    fn extend_segment(
        segment: &mut CanonicalPageSegment,
        page: u32,
        info: &CanonicalPageInfo,
        regions: &[Region],
    ) {
        segment.document_page_range.end = page;
        segment.canonical_page_range.end = info.canonical_page.clone();

        if info.source != PageSource::Region {
            return;
        }
        if let Some(region_id) = info.source_id.as_deref() {
            if !segment.region_ids.iter().any(|id| id == region_id) {
                segment.region_ids.push(region_id.to_string());
                if let Some(name) = Self::region_name(regions, region_id) {
                    segment.region_names.push(name.to_string());
                }
            }
        }
    }

    /// Segments with rule/region metadata for rich UI display (popovers)
    pub fn format_canonical_pages_with_metadata(
        canonical_pages: &CanonicalPages,
        rules: &[CanonicalPageRule],
        regions: &[Region],
    ) -> Vec<CanonicalPageSegment> {
        let mut segments = Vec::new();
        let mut current: Option<CanonicalPageSegment> = None;

        for (page, info) in canonical_pages.iter() {
            let extend = current
                .as_ref()
                .is_some_and(|segment| Self::can_extend(segment, page, info));

            if extend {
                if let Some(segment) = current.as_mut() {
                    Self::extend_segment(segment, page, info, regions);
                }
            } else {
                segments.extend(current.take());
                current = Some(Self::start_segment(page, info, rules, regions));
            }
        }

        segments.extend(current);
        segments
    }

    /// Compact display string, e.g. `"1-19 🔴  i-x 🔵  1-480 🔵  i-c 🟢"`
    ///
    /// Consecutive pages merge on source alone. Negative-rule runs show
    /// their document pages followed by "(ignored)".
    pub fn format_canonical_pages_display(canonical_pages: &CanonicalPages) -> String {
        if canonical_pages.is_empty() {
            return NO_PAGES_DISPLAY.to_string();
        }

        let mut runs: Vec<DisplayRun<'_>> = Vec::new();

        for (page, info) in canonical_pages.iter() {
            let label = info.canonical_page.as_deref();
            match runs.last_mut() {
                Some(run) if run.source == info.source && page == run.end_doc_page + 1 => {
                    run.end_doc_page = page;
                    run.end_canonical = label;
                }
                _ => runs.push(DisplayRun {
                    start_doc_page: page,
                    end_doc_page: page,
                    start_canonical: label,
                    end_canonical: label,
                    source: info.source,
                    color: info.color,
                }),
            }
        }

        runs.iter()
            .map(Self::render_run)
            .collect::<Vec<_>>()
            .join(DISPLAY_SEPARATOR)
    }

    fn render_run(run: &DisplayRun<'_>) -> String {
        let emoji = run.color.emoji();

        if run.source == PageSource::RuleNegative {
            let range = if run.start_doc_page == run.end_doc_page {
                run.start_doc_page.to_string()
            } else {
                format!("{}-{}", run.start_doc_page, run.end_doc_page)
            };
            return format!("{} {} (ignored)", range, emoji);
        }

        let start = run.start_canonical.unwrap_or_default();
        let end = run.end_canonical.unwrap_or_default();
        if start == end {
            format!("{} {}", start, emoji)
        } else {
            format!("{}-{} {}", start, end, emoji)
        }
    }

    /// Map a document page range to canonical labels, e.g. "1–3, 5" → "i–iii, 1"
    ///
    /// Accepts hyphens or en-dashes. Pages without a canonical label keep
    /// their document number. Consecutive document pages are grouped.
    /// Unparsable input is returned unchanged.
    pub fn canonical_range_string(
        document_range: &str,
        canonical_pages: &CanonicalPages,
    ) -> String {
        if document_range.trim().is_empty() {
            return String::new();
        }

        let document_pages = match parse_page_range(&normalize_page_range(document_range)) {
            Ok(pages) => pages,
            Err(_) => return document_range.to_string(),
        };

        let label_of = |page: u32| -> String {
            canonical_pages
                .get(page)
                .and_then(|info| info.canonical_page.clone())
                .unwrap_or_else(|| page.to_string())
        };

        // (last document page, first label, last label)
        let mut runs: Vec<(u32, String, String)> = Vec::new();
        for page in document_pages {
            let label = label_of(page);
            match runs.last_mut() {
                Some((last_page, _, end_label)) if page == *last_page + 1 => {
                    *last_page = page;
                    *end_label = label;
                }
                _ => runs.push((page, label.clone(), label)),
            }
        }

        runs.into_iter()
            .map(|(_, start, end)| {
                if start == end {
                    start
                } else {
                    format!("{}{}{}", start, EN_DASH, end)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalPageResolver;
    use crate::page_range::PageConfig;
    use crate::region::RegionDerivedPageNumber;

    fn resolve(
        count: u32,
        regions: &[Region],
        rules: &[CanonicalPageRule],
        facts: &[RegionDerivedPageNumber],
    ) -> CanonicalPages {
        CanonicalPageResolver::compute_canonical_pages(count, regions, rules, facts).into_pages()
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(
            SegmentFormatter::format_canonical_pages_display(&CanonicalPages::empty()),
            "(No pages)"
        );
    }

    #[test]
    fn test_display_single_positive_run() {
        let rules = vec![CanonicalPageRule::arabic("body", 1, 480, "1")];
        let pages = resolve(480, &[], &rules, &[]);
        assert_eq!(SegmentFormatter::format_canonical_pages_display(&pages), "1-480 🔵");
    }

    #[test]
    fn test_display_mixed_sources() {
        let regions = vec![Region::page_number("r1", "Footer", PageConfig::all_pages())];
        let facts = vec![
            RegionDerivedPageNumber::new(24, "i", "r1", "Footer"),
            RegionDerivedPageNumber::new(25, "ii", "r1", "Footer"),
        ];
        let rules = vec![
            CanonicalPageRule::roman("front", 4, 13, "i"),
            CanonicalPageRule::arabic("body", 14, 20, "1"),
            CanonicalPageRule::negative("plates", 21, 23),
        ];
        let pages = resolve(25, &regions, &rules, &facts);
        assert_eq!(
            SegmentFormatter::format_canonical_pages_display(&pages),
            "1-3 🔴  i-7 🔵  21-23 ⚪ (ignored)  i-ii 🟢"
        );
    }

    #[test]
    fn test_display_single_page_runs() {
        let rules = vec![CanonicalPageRule::negative("n", 2, 2)];
        let pages = resolve(2, &[], &rules, &[]);
        assert_eq!(
            SegmentFormatter::format_canonical_pages_display(&pages),
            "1 🔴  2 ⚪ (ignored)"
        );
    }

    #[test]
    fn test_metadata_splits_rules_by_id() {
        let rules = vec![
            CanonicalPageRule::roman("front", 1, 3, "i").with_label("Front matter"),
            CanonicalPageRule::arabic("body", 4, 6, "1"),
        ];
        let pages = resolve(6, &[], &rules, &[]);
        let segments = SegmentFormatter::format_canonical_pages_with_metadata(&pages, &rules, &[]);
        assert_eq!(segments.len(), 2);

        assert_eq!(segments[0].document_page_range, DocumentPageRange { start: 1, end: 3 });
        assert_eq!(segments[0].canonical_page_range.start.as_deref(), Some("i"));
        assert_eq!(segments[0].canonical_page_range.end.as_deref(), Some("iii"));
        assert_eq!(segments[0].rule_id.as_deref(), Some("front"));
        assert_eq!(segments[0].label.as_deref(), Some("Front matter"));
        assert_eq!(segments[0].page_count(), 3);

        assert_eq!(segments[1].rule_id.as_deref(), Some("body"));
        assert!(segments[1].label.is_none());

        // The compact form merges both rules into one blue run
        assert_eq!(SegmentFormatter::format_canonical_pages_display(&pages), "i-3 🔵");
    }

    #[test]
    fn test_metadata_merges_regions() {
        let regions = vec![
            Region::page_number(
                "odd",
                "Odd footer",
                PageConfig::all_pages().with_every_other(1, None),
            ),
            Region::page_number(
                "even",
                "Even footer",
                PageConfig::all_pages().with_every_other(2, None),
            ),
        ];
        let facts = vec![
            RegionDerivedPageNumber::new(1, "1", "odd", "Odd footer"),
            RegionDerivedPageNumber::new(2, "2", "even", "Even footer"),
            RegionDerivedPageNumber::new(3, "3", "odd", "Odd footer"),
        ];
        let pages = resolve(4, &regions, &[], &facts);
        let segments =
            SegmentFormatter::format_canonical_pages_with_metadata(&pages, &[], &regions);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].source, PageSource::Region);
        assert_eq!(segments[0].document_page_range, DocumentPageRange { start: 1, end: 3 });
        assert_eq!(segments[0].region_ids, vec!["odd", "even"]);
        assert_eq!(segments[0].region_names, vec!["Odd footer", "Even footer"]);
        assert!(segments[0].rule_id.is_none());
        assert_eq!(segments[1].source, PageSource::Unaccounted);
    }

    #[test]
    fn test_metadata_unknown_region_has_no_name() {
        let facts = vec![RegionDerivedPageNumber::new(1, "1", "ghost", "Ghost")];
        let pages = resolve(1, &[], &[], &facts);
        let segments = SegmentFormatter::format_canonical_pages_with_metadata(&pages, &[], &[]);
        assert_eq!(segments[0].region_ids, vec!["ghost"]);
        assert!(segments[0].region_names.is_empty());
    }

    #[test]
    fn test_metadata_skips_empty_region_names() {
        let regions = vec![
            Region::page_number("blank", "", PageConfig::this_page(1)),
            Region::page_number("named", "Footer", PageConfig::this_page(2)),
        ];
        let facts = vec![
            RegionDerivedPageNumber::new(1, "1", "blank", ""),
            RegionDerivedPageNumber::new(2, "2", "named", "Footer"),
        ];
        let pages = resolve(2, &regions, &[], &facts);
        let segments =
            SegmentFormatter::format_canonical_pages_with_metadata(&pages, &[], &regions);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].region_ids, vec!["blank", "named"]);
        assert_eq!(segments[0].region_names, vec!["Footer"]);
    }

    #[test]
    fn test_metadata_empty() {
        let pages = CanonicalPages::empty();
        let segments = SegmentFormatter::format_canonical_pages_with_metadata(&pages, &[], &[]);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_metadata_negative_rule_segment() {
        let rules = vec![CanonicalPageRule::negative("n1", 2, 3).with_label("Blank")];
        let pages = resolve(4, &[], &rules, &[]);
        let segments = SegmentFormatter::format_canonical_pages_with_metadata(&pages, &rules, &[]);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].source, PageSource::RuleNegative);
        assert_eq!(segments[1].color, PageColor::Gray);
        assert!(segments[1].canonical_page_range.start.is_none());
        assert_eq!(segments[1].label.as_deref(), Some("Blank"));
    }

    #[test]
    fn test_canonical_range_string() {
        let rules = vec![
            CanonicalPageRule::roman("front", 1, 4, "i"),
            CanonicalPageRule::arabic("body", 5, 20, "1"),
        ];
        let pages = resolve(20, &[], &rules, &[]);
        assert_eq!(
            SegmentFormatter::canonical_range_string("1\u{2013}3, 5", &pages),
            "i\u{2013}iii, 1"
        );
        assert_eq!(SegmentFormatter::canonical_range_string("4-6", &pages), "iv\u{2013}2");
        assert_eq!(SegmentFormatter::canonical_range_string("30", &pages), "30");
    }

    #[test]
    fn test_canonical_range_string_edge_cases() {
        let pages = resolve(3, &[], &[], &[]);
        assert_eq!(SegmentFormatter::canonical_range_string("  ", &pages), "");
        assert_eq!(SegmentFormatter::canonical_range_string("see 3", &pages), "see 3");
    }
}
