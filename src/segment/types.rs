//! Segment module core types

use crate::canonical::{PageColor, PageSource};
use serde::{Deserialize, Serialize};

// ============================================================
// Constants
// ============================================================

/// Separator between segments in the compact display string
pub const DISPLAY_SEPARATOR: &str = "  ";

/// Display string for an empty resolution
pub const NO_PAGES_DISPLAY: &str = "(No pages)";

// ============================================================
// Core Data Structures
// ============================================================

/// Inclusive document page span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPageRange {
    pub start: u32,
    pub end: u32,
}

/// First and last canonical label of a segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalPageRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Run of consecutive document pages sharing a source, with UI metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPageSegment {
    /// Document pages covered
    pub document_page_range: DocumentPageRange,
    /// Canonical labels at both ends
    pub canonical_page_range: CanonicalPageRange,
    /// Shared source
    pub source: PageSource,
    /// Shared color
    pub color: PageColor,
    /// Rule behind a rule segment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    /// Regions behind a region segment, in first-seen order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub region_ids: Vec<String>,
    /// Names of those regions (regions without a known name are skipped)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub region_names: Vec<String>,
    /// Label of the rule, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CanonicalPageSegment {
    /// Number of document pages in the segment
    pub fn page_count(&self) -> u32 {
        self.document_page_range.end - self.document_page_range.start + 1
    }
}
