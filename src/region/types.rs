//! Region module core types
//!
//! Regions are user-drawn rectangles that either exclude text from indexing
//! or mark where a printed page number appears.

use crate::page_range::{PageApplicability, PageConfig};
use serde::{Deserialize, Serialize};

// ============================================================
// Core Data Structures
// ============================================================

/// Region purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionType {
    /// Text inside is excluded from extraction
    Exclude,
    /// Text inside is the printed page number
    PageNumber,
}

/// Rectangle in PDF user space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// User-defined region of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Region identifier
    pub id: String,
    /// User-provided name
    pub name: String,
    /// Region purpose
    pub region_type: RegionType,
    /// Pages the region applies to
    #[serde(flatten)]
    pub page_config: PageConfig,
    /// Rectangle on the page
    #[serde(default)]
    pub bbox: BoundingBox,
}

impl Region {
    /// Create a page-number region
    pub fn page_number(
        id: impl Into<String>,
        name: impl Into<String>,
        page_config: PageConfig,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region_type: RegionType::PageNumber,
            page_config,
            bbox: BoundingBox::default(),
        }
    }

    /// Create an exclude region
    pub fn exclude(
        id: impl Into<String>,
        name: impl Into<String>,
        page_config: PageConfig,
    ) -> Self {
        Self {
            region_type: RegionType::Exclude,
            ..Self::page_number(id, name, page_config)
        }
    }

    /// Set the bounding box
    #[must_use]
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Check if this region takes part in canonical page computation
    pub fn is_page_number(&self) -> bool {
        self.region_type == RegionType::PageNumber
    }
}

impl PageApplicability for Region {
    fn page_config(&self) -> &PageConfig {
        &self.page_config
    }
}

/// Page label detected inside a page-number region by the text layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDerivedPageNumber {
    /// Document page (1-indexed)
    pub document_page: u32,
    /// Detected label
    pub canonical_page: String,
    /// Region that produced the label
    pub region_id: String,
    /// Name of that region
    #[serde(default)]
    pub region_name: String,
}

impl RegionDerivedPageNumber {
    /// Create a detection fact
    pub fn new(
        document_page: u32,
        canonical_page: impl Into<String>,
        region_id: impl Into<String>,
        region_name: impl Into<String>,
    ) -> Self {
        Self {
            document_page,
            canonical_page: canonical_page.into(),
            region_id: region_id.into(),
            region_name: region_name.into(),
        }
    }
}

/// Region claiming a conflicted page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingRegion {
    pub id: String,
    pub name: String,
}

/// A document page claimed by two or more page-number regions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNumberConflict {
    /// Conflicted document page
    pub page_number: u32,
    /// Claimants in input order
    pub regions: Vec<ConflictingRegion>,
}
