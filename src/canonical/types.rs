//! Canonical page module core types
//!
//! Per-page resolution output and the resolved page arena.

use crate::region::PageNumberConflict;
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::fmt;

// ============================================================
// Core Data Structures
// ============================================================

/// Where a page's canonical number came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageSource {
    /// No information; the document page number is assumed
    Unaccounted,
    /// Detected inside a page-number region
    Region,
    /// Assigned by a positive rule
    RulePositive,
    /// Suppressed by a negative rule
    RuleNegative,
}

impl PageSource {
    /// Fixed UI color for the source
    pub fn color(&self) -> PageColor {
        match self {
            PageSource::Unaccounted => PageColor::Red,
            PageSource::Region => PageColor::Green,
            PageSource::RulePositive => PageColor::Blue,
            PageSource::RuleNegative => PageColor::Gray,
        }
    }

    /// Check if the source is a rule
    pub fn is_rule(&self) -> bool {
        matches!(self, PageSource::RulePositive | PageSource::RuleNegative)
    }

    /// Wire name of the source
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSource::Unaccounted => "unaccounted",
            PageSource::Region => "region",
            PageSource::RulePositive => "rule-positive",
            PageSource::RuleNegative => "rule-negative",
        }
    }
}

impl fmt::Display for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI color of a resolved page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageColor {
    Red,
    Green,
    Blue,
    Gray,
}

impl PageColor {
    /// Glyph used by the compact display string
    pub fn emoji(&self) -> &'static str {
        match self {
            PageColor::Red => "🔴",
            PageColor::Green => "🟢",
            PageColor::Blue => "🔵",
            PageColor::Gray => "⚪",
        }
    }
}

/// Resolved canonical page of one document page
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPageInfo {
    /// Canonical label; `None` for pages excluded by a negative rule
    pub canonical_page: Option<String>,
    /// Source of the label
    pub source: PageSource,
    /// Region or rule id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// UI color, always `source.color()`
    pub color: PageColor,
}

impl CanonicalPageInfo {
    fn new(canonical_page: Option<String>, source: PageSource, source_id: Option<String>) -> Self {
        Self {
            canonical_page,
            source,
            source_id,
            color: source.color(),
        }
    }

    /// Baseline entry: the document page number itself
    pub fn unaccounted(document_page: u32) -> Self {
        Self::new(Some(document_page.to_string()), PageSource::Unaccounted, None)
    }

    /// Entry detected by a page-number region
    pub fn region(canonical_page: impl Into<String>, region_id: impl Into<String>) -> Self {
        Self::new(Some(canonical_page.into()), PageSource::Region, Some(region_id.into()))
    }

    /// Entry assigned by a positive rule
    pub fn rule_positive(canonical_page: impl Into<String>, rule_id: impl Into<String>) -> Self {
        Self::new(Some(canonical_page.into()), PageSource::RulePositive, Some(rule_id.into()))
    }

    /// Entry suppressed by a negative rule
    pub fn rule_negative(rule_id: impl Into<String>) -> Self {
        Self::new(None, PageSource::RuleNegative, Some(rule_id.into()))
    }
}

/// Resolved pages of a document, indexed by document page (1-indexed)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalPages {
    pages: Vec<CanonicalPageInfo>,
}

impl CanonicalPages {
    pub(crate) fn from_vec(pages: Vec<CanonicalPageInfo>) -> Self {
        Self { pages }
    }

    /// Empty result (conflicted or zero-page document)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of resolved pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if nothing was resolved
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Entry of a document page
    pub fn get(&self, document_page: u32) -> Option<&CanonicalPageInfo> {
        let index = usize::try_from(document_page).ok()?.checked_sub(1)?;
        self.pages.get(index)
    }

    /// Entries with their document page, in page order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &CanonicalPageInfo)> + '_ {
        (1u32..).zip(self.pages.iter())
    }

    /// Tally of pages by source
    pub fn statistics(&self) -> CanonicalPageStatistics {
        let mut stats = CanonicalPageStatistics {
            total_pages: self.pages.len(),
            ..Default::default()
        };

        for info in &self.pages {
            match info.source {
                PageSource::Unaccounted => stats.unaccounted_pages += 1,
                PageSource::Region => stats.region_derived_pages += 1,
                PageSource::RulePositive => stats.user_defined_positive_pages += 1,
                PageSource::RuleNegative => stats.user_defined_negative_pages += 1,
            }
        }

        stats
    }
}

impl Serialize for CanonicalPages {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Page counts by source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPageStatistics {
    pub total_pages: usize,
    pub unaccounted_pages: usize,
    pub region_derived_pages: usize,
    pub user_defined_positive_pages: usize,
    pub user_defined_negative_pages: usize,
}

impl CanonicalPageStatistics {
    /// Fraction of pages with a region or rule behind them (0.0-1.0)
    pub fn accounted_ratio(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        (self.total_pages - self.unaccounted_pages) as f64 / self.total_pages as f64
    }
}

/// Outcome of canonical page resolution
///
/// Ambiguous page-number regions are reported as data: no partial mapping is
/// ever produced while conflicts exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Every document page has exactly one entry
    Resolved(CanonicalPages),
    /// Page-number regions conflict; the user must resolve them first
    Conflicted(Vec<PageNumberConflict>),
}

impl Resolution {
    /// Check if resolution was blocked by conflicts
    pub fn is_conflicted(&self) -> bool {
        matches!(self, Resolution::Conflicted(_))
    }

    /// Resolved pages, if any
    pub fn pages(&self) -> Option<&CanonicalPages> {
        match self {
            Resolution::Resolved(pages) => Some(pages),
            Resolution::Conflicted(_) => None,
        }
    }

    /// Conflicts that blocked resolution (empty when resolved)
    pub fn conflicts(&self) -> &[PageNumberConflict] {
        match self {
            Resolution::Resolved(_) => &[],
            Resolution::Conflicted(conflicts) => conflicts,
        }
    }

    /// Resolved pages, or an empty set when conflicted
    pub fn into_pages(self) -> CanonicalPages {
        match self {
            Resolution::Resolved(pages) => pages,
            Resolution::Conflicted(_) => CanonicalPages::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_colors() {
        assert_eq!(PageSource::Unaccounted.color(), PageColor::Red);
        assert_eq!(PageSource::Region.color(), PageColor::Green);
        assert_eq!(PageSource::RulePositive.color(), PageColor::Blue);
        assert_eq!(PageSource::RuleNegative.color(), PageColor::Gray);
    }

    #[test]
    fn test_source_serde_names() {
        assert_eq!(serde_json::to_string(&PageSource::RulePositive).unwrap(), "\"rule-positive\"");
        assert_eq!(serde_json::to_string(&PageSource::Unaccounted).unwrap(), "\"unaccounted\"");
        assert_eq!(PageSource::RuleNegative.to_string(), "rule-negative");
        assert!(PageSource::RuleNegative.is_rule());
        assert!(!PageSource::Region.is_rule());
    }

    #[test]
    fn test_info_constructors() {
        let info = CanonicalPageInfo::unaccounted(7);
        assert_eq!(info.canonical_page.as_deref(), Some("7"));
        assert_eq!(info.color, PageColor::Red);
        assert!(info.source_id.is_none());

        let info = CanonicalPageInfo::rule_negative("n1");
        assert!(info.canonical_page.is_none());
        assert_eq!(info.color, PageColor::Gray);
        assert_eq!(info.source_id.as_deref(), Some("n1"));
    }

    #[test]
    fn test_pages_lookup_is_one_indexed() {
        let pages = CanonicalPages::from_vec(vec![
            CanonicalPageInfo::unaccounted(1),
            CanonicalPageInfo::region("ii", "r1"),
        ]);
        assert!(pages.get(0).is_none());
        assert_eq!(pages.get(2).unwrap().canonical_page.as_deref(), Some("ii"));
        assert!(pages.get(3).is_none());
        let numbers: Vec<u32> = pages.iter().map(|(page, _)| page).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_statistics() {
        let pages = CanonicalPages::from_vec(vec![
            CanonicalPageInfo::unaccounted(1),
            CanonicalPageInfo::region("2", "r1"),
            CanonicalPageInfo::rule_positive("iii", "p1"),
            CanonicalPageInfo::rule_positive("iv", "p1"),
            CanonicalPageInfo::rule_negative("n1"),
        ]);
        let stats = pages.statistics();
        assert_eq!(stats.total_pages, 5);
        assert_eq!(stats.unaccounted_pages, 1);
        assert_eq!(stats.region_derived_pages, 1);
        assert_eq!(stats.user_defined_positive_pages, 2);
        assert_eq!(stats.user_defined_negative_pages, 1);
        assert!((stats.accounted_ratio() - 0.8).abs() < f64::EPSILON);
        assert_eq!(CanonicalPageStatistics::default().accounted_ratio(), 0.0);
    }

    #[test]
    fn test_pages_serialize_as_map() {
        let pages = CanonicalPages::from_vec(vec![CanonicalPageInfo::rule_positive("i", "p1")]);
        let json = serde_json::to_value(&pages).unwrap();
        assert_eq!(json["1"]["canonicalPage"], "i");
        assert_eq!(json["1"]["source"], "rule-positive");
        assert_eq!(json["1"]["color"], "blue");
    }

    #[test]
    fn test_resolution_accessors() {
        let resolved = Resolution::Resolved(CanonicalPages::from_vec(vec![
            CanonicalPageInfo::unaccounted(1),
        ]));
        assert!(!resolved.is_conflicted());
        assert!(resolved.conflicts().is_empty());
        assert_eq!(resolved.pages().map(CanonicalPages::len), Some(1));

        let conflicted = Resolution::Conflicted(vec![PageNumberConflict {
            page_number: 4,
            regions: vec![],
        }]);
        assert!(conflicted.is_conflicted());
        assert!(conflicted.pages().is_none());
        assert_eq!(conflicted.conflicts().len(), 1);
        assert!(conflicted.into_pages().is_empty());
    }
}
