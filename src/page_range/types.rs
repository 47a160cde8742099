//! Page range module core types
//!
//! Contains the page configuration model shared by every entity that can be
//! scoped to a subset of document pages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================
// Constants
// ============================================================

/// Separator between range segments ("1-2,5")
pub const SEGMENT_SEPARATOR: char = ',';

/// Separator between the bounds of one segment ("1-2")
pub const RANGE_SEPARATOR: char = '-';

/// En-dash used by exported index ranges ("1–3")
pub const EN_DASH: char = '\u{2013}';

// ============================================================
// Error Types
// ============================================================

/// Page range parsing error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageRangeError {
    #[error("Invalid page number: {0}")]
    InvalidPageNumber(String),

    #[error("Invalid range: start ({start}) > end ({end})")]
    InvalidRange { start: u32, end: u32 },
}

pub type Result<T> = std::result::Result<T, PageRangeError>;

// ============================================================
// Core Data Structures
// ============================================================

/// How the base page set of an entity is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageConfigMode {
    /// Exactly `page_number`
    #[default]
    ThisPage,
    /// Every page of the document
    AllPages,
    /// Pages listed in `page_range`
    PageRange,
    /// Pages listed in `page_range` (free-form entry in the editor)
    Custom,
}

/// Page applicability configuration
///
/// `every_other` only takes effect when `start_page` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Base page set selector
    pub page_config_mode: PageConfigMode,
    /// Page for `this_page` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    /// Range string for `page_range`/`custom` modes ("1-50", "1-2,5-6,8")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_range: Option<String>,
    /// Keep only every second page counting from `start_page`
    #[serde(default)]
    pub every_other: bool,
    /// First page of the every-other stepping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_page: Option<u32>,
    /// Last page of the every-other stepping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_page: Option<u32>,
    /// Pages removed after every other filter
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub except_pages: Vec<u32>,
}

impl PageConfig {
    /// Configuration covering a single page
    pub fn this_page(page: u32) -> Self {
        Self {
            page_config_mode: PageConfigMode::ThisPage,
            page_number: Some(page),
            ..Default::default()
        }
    }

    /// Configuration covering the whole document
    pub fn all_pages() -> Self {
        Self {
            page_config_mode: PageConfigMode::AllPages,
            ..Default::default()
        }
    }

    /// Configuration covering an explicit range string
    pub fn page_range(range: impl Into<String>) -> Self {
        Self {
            page_config_mode: PageConfigMode::PageRange,
            page_range: Some(range.into()),
            ..Default::default()
        }
    }

    /// Restrict to every other page starting at `start_page`
    #[must_use]
    pub fn with_every_other(mut self, start_page: u32, end_page: Option<u32>) -> Self {
        self.every_other = true;
        self.start_page = Some(start_page);
        self.end_page = end_page;
        self
    }

    /// Exclude the given pages
    #[must_use]
    pub fn with_except_pages(mut self, pages: impl IntoIterator<Item = u32>) -> Self {
        self.except_pages = pages.into_iter().collect();
        self
    }
}
