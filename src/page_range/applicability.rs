//! Page Applicability
//!
//! Decides which document pages a region (or any other page-scoped entity)
//! applies to.

use super::parse::{page_range_contains, parse_page_range, parse_page_range_within};
use super::types::{PageConfig, PageConfigMode, Result};
use std::collections::HashSet;

/// Anything scoped to a subset of document pages through a [`PageConfig`]
pub trait PageApplicability {
    /// Page configuration of the entity
    fn page_config(&self) -> &PageConfig;

    /// Check if the entity applies to `target_page`
    fn applies_to_page(&self, target_page: u32) -> bool {
        applies_to_page(self.page_config(), target_page)
    }

    /// All pages in `1..=max_page` scope the entity applies to
    fn applicable_pages(&self, max_page: u32) -> Vec<u32> {
        get_applicable_pages(self.page_config(), max_page)
    }

    /// Human-readable summary of the configuration
    fn page_config_summary(&self) -> String {
        page_config_summary(self.page_config())
    }
}

impl PageApplicability for PageConfig {
    fn page_config(&self) -> &PageConfig {
        self
    }
}

/// Every-other filter; `true` when the page survives
fn passes_every_other(config: &PageConfig, page: u32) -> bool {
    let start_page = match (config.every_other, config.start_page) {
        (true, Some(start_page)) => start_page,
        _ => return true,
    };

    let offset = i64::from(page) - i64::from(start_page);
    if offset < 0 || offset % 2 != 0 {
        return false;
    }

    config.end_page.map_or(true, |end_page| page <= end_page)
}

/// Check if a configuration applies to a single page
///
/// Unlike [`get_applicable_pages`] this never materializes the page set for
/// `all_pages`, and has no upper bound on the page.
pub fn applies_to_page(config: &PageConfig, target_page: u32) -> bool {
    let in_base_set = match config.page_config_mode {
        PageConfigMode::ThisPage => config.page_number == Some(target_page),
        PageConfigMode::AllPages => true,
        PageConfigMode::PageRange | PageConfigMode::Custom => match config.page_range.as_deref() {
            Some(range) => match page_range_contains(range, target_page) {
                Ok(contained) => contained,
                Err(e) => {
                    tracing::debug!(range, error = %e, "Ignoring invalid page range");
                    false
                }
            },
            None => false,
        },
    };

    in_base_set
        && passes_every_other(config, target_page)
        && !config.except_pages.contains(&target_page)
}

/// Get all page numbers a configuration applies to
///
/// `max_page` bounds the `all_pages` mode only; explicit ranges are returned
/// as written. An invalid range string yields no pages.
pub fn get_applicable_pages(config: &PageConfig, max_page: u32) -> Vec<u32> {
    applicable_pages_with(config, max_page, parse_page_range)
}

/// Pages a configuration applies to, restricted to `1..=max_page` in every mode
pub(crate) fn get_applicable_pages_within(config: &PageConfig, max_page: u32) -> Vec<u32> {
    let this_page_in_document = config.page_number.is_some_and(|page| page <= max_page);
    if config.page_config_mode == PageConfigMode::ThisPage && !this_page_in_document {
        return Vec::new();
    }
    applicable_pages_with(config, max_page, |range| parse_page_range_within(range, max_page))
}

fn applicable_pages_with<F>(config: &PageConfig, max_page: u32, parse_range: F) -> Vec<u32>
where
    F: Fn(&str) -> Result<Vec<u32>>,
{
    let base: Vec<u32> = match config.page_config_mode {
        PageConfigMode::ThisPage => config.page_number.filter(|&p| p > 0).into_iter().collect(),
        PageConfigMode::AllPages => (1..=max_page).collect(),
        PageConfigMode::PageRange | PageConfigMode::Custom => match config.page_range.as_deref() {
            Some(range) => match parse_range(range) {
                Ok(pages) => pages,
                Err(e) => {
                    tracing::debug!(range, error = %e, "Ignoring invalid page range");
                    return Vec::new();
                }
            },
            None => Vec::new(),
        },
    };

    let except: HashSet<u32> = config.except_pages.iter().copied().collect();

    base.into_iter()
        .filter(|&page| passes_every_other(config, page))
        .filter(|page| !except.contains(page))
        .collect()
}

/// Human-readable summary such as "Pages 1-20 (every other, 1-19) except 7"
pub fn page_config_summary(config: &PageConfig) -> String {
    let range = config.page_range.as_deref().unwrap_or_default();

    let mut summary = match config.page_config_mode {
        PageConfigMode::ThisPage => match config.page_number {
            Some(page) => format!("Page {}", page),
            None => "Page (unset)".to_string(),
        },
        PageConfigMode::AllPages => "All pages".to_string(),
        PageConfigMode::PageRange => format!("Pages {}", range),
        PageConfigMode::Custom => format!("Custom: {}", range),
    };

    if let (true, Some(start_page)) = (config.every_other, config.start_page) {
        match config.end_page {
            Some(end_page) => {
                summary.push_str(&format!(" (every other, {}-{})", start_page, end_page))
            }
            None => summary.push_str(&format!(" (every other, starting page {})", start_page)),
        }
    }

    if !config.except_pages.is_empty() {
        let pages: Vec<String> = config.except_pages.iter().map(u32::to_string).collect();
        summary.push_str(&format!(" except {}", pages.join(", ")));
    }

    summary
}
