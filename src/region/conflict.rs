//! Page Number Conflict Detection
//!
//! Finds document pages claimed by more than one page-number region.

use super::types::{ConflictingRegion, PageNumberConflict, Region, RegionDerivedPageNumber};
use crate::page_range::{get_applicable_pages_within, PageApplicability};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Detects pages with ambiguous page-number regions
pub struct ConflictDetector;

impl ConflictDetector {
    /// Detect conflicts between page-number regions
    ///
    /// Only `page_number` regions are considered. When detection facts are
    /// supplied, a region only claims a page if it actually produced a label
    /// there, so two regions configured over the same page do not conflict
    /// unless both found text. Conflicts are returned in page order.
    pub fn detect_page_number_conflicts(
        regions: &[Region],
        max_page: u32,
        region_derived_page_numbers: Option<&[RegionDerivedPageNumber]>,
    ) -> Vec<PageNumberConflict> {
        let detected_per_page: Option<HashMap<u32, HashSet<&str>>> =
            region_derived_page_numbers.map(|facts| {
                let mut map: HashMap<u32, HashSet<&str>> = HashMap::new();
                for fact in facts {
                    map.entry(fact.document_page)
                        .or_default()
                        .insert(fact.region_id.as_str());
                }
                map
            });

        let mut claimants: BTreeMap<u32, Vec<&Region>> = BTreeMap::new();

        for region in regions.iter().filter(|r| r.is_page_number()) {
            for page in get_applicable_pages_within(region.page_config(), max_page) {
                if let Some(detected) = &detected_per_page {
                    let has_text = detected
                        .get(&page)
                        .is_some_and(|ids| ids.contains(region.id.as_str()));
                    if !has_text {
                        continue;
                    }
                }
                claimants.entry(page).or_default().push(region);
            }
        }

        let conflicts: Vec<PageNumberConflict> = claimants
            .into_iter()
            .filter(|(_, regs)| regs.len() > 1)
            .map(|(page, regs)| PageNumberConflict {
                page_number: page,
                regions: regs
                    .into_iter()
                    .map(|r| ConflictingRegion {
                        id: r.id.clone(),
                        name: r.name.clone(),
                    })
                    .collect(),
            })
            .collect();

        if !conflicts.is_empty() {
            tracing::warn!(
                conflicted_pages = conflicts.len(),
                first_page = conflicts[0].page_number,
                "Page number regions conflict"
            );
        }

        conflicts
    }
}
