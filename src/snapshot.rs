//! Project snapshot input
//!
//! A snapshot is the JSON interchange file the CLI reads: the document page
//! count plus the regions, rules and region detections of one project.
//!
//! ```json
//! {
//!   "documentPageCount": 24,
//!   "regions": [],
//!   "rules": [
//!     { "id": "front", "ruleType": "positive", "documentPageStart": 1,
//!       "documentPageEnd": 4, "numeralType": "roman", "startingCanonicalPage": "i" }
//!   ],
//!   "regionDerivedPageNumbers": []
//! }
//! ```

use crate::canonical::{CanonicalPageResolver, Resolution};
use crate::region::{Region, RegionDerivedPageNumber};
use crate::rule::{
    auto_join_contiguous_rules, find_overlapping_rules, CanonicalPageRule, RuleConflict, RuleJoin,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Snapshot loading error types
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Everything needed to resolve canonical pages for one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// Number of physical pages in the document
    pub document_page_count: u32,
    /// User-defined regions
    #[serde(default)]
    pub regions: Vec<Region>,
    /// Canonical page rules, in application order
    #[serde(default)]
    pub rules: Vec<CanonicalPageRule>,
    /// Labels detected inside page-number regions
    #[serde(default)]
    pub region_derived_page_numbers: Vec<RegionDerivedPageNumber>,
}

impl ProjectSnapshot {
    /// Create an empty snapshot for a document
    pub fn new(document_page_count: u32) -> Self {
        Self {
            document_page_count,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_regions(mut self, regions: Vec<Region>) -> Self {
        self.regions = regions;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Vec<CanonicalPageRule>) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_region_derived_page_numbers(mut self, facts: Vec<RegionDerivedPageNumber>) -> Self {
        self.region_derived_page_numbers = facts;
        self
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SnapshotError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;

        tracing::debug!(
            path = %path.display(),
            pages = snapshot.document_page_count,
            regions = snapshot.regions.len(),
            rules = snapshot.rules.len(),
            "Snapshot loaded"
        );

        Ok(snapshot)
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve canonical pages for this snapshot
    pub fn resolve(&self) -> Resolution {
        CanonicalPageResolver::compute_canonical_pages(
            self.document_page_count,
            &self.regions,
            &self.rules,
            &self.region_derived_page_numbers,
        )
    }

    /// Overlaps between rules, keyed by the earlier rule's id
    pub fn rule_overlaps(&self) -> Vec<(String, RuleConflict)> {
        find_overlapping_rules(&self.rules)
    }

    /// Join contiguous continuing rules in place, returning the joins made
    pub fn auto_join_rules(&mut self) -> Vec<RuleJoin> {
        let plan = auto_join_contiguous_rules(&self.rules);
        self.rules = plan.rules;
        plan.joins
    }
}
