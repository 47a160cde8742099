//! Page Range Parsing
//!
//! Comma/hyphen range syntax ("1-2,5-6,8") to sorted page lists.

use super::types::{PageRangeError, Result, EN_DASH, RANGE_SEPARATOR, SEGMENT_SEPARATOR};
use std::collections::BTreeSet;

/// Parse a single page token
fn parse_page_token(token: &str) -> Result<u32> {
    let token = token.trim();
    token
        .parse::<u32>()
        .map_err(|_| PageRangeError::InvalidPageNumber(token.to_string()))
}

/// Parse a page range string into inclusive `(start, end)` spans, as written
fn parse_page_spans(range_str: &str) -> Result<Vec<(u32, u32)>> {
    range_str
        .split(SEGMENT_SEPARATOR)
        .map(str::trim)
        .map(|part| match part.split_once(RANGE_SEPARATOR) {
            Some((start_str, end_str)) => {
                let start = parse_page_token(start_str)?;
                let end = parse_page_token(end_str)?;
                if start > end {
                    return Err(PageRangeError::InvalidRange { start, end });
                }
                Ok((start, end))
            }
            None => parse_page_token(part).map(|page| (page, page)),
        })
        .collect()
}

/// Parse a page range string into a sorted, deduplicated page list
///
/// - `"1-5"` → `[1, 2, 3, 4, 5]`
/// - `"1-2,5-6,8"` → `[1, 2, 5, 6, 8]`
/// - `"10"` → `[10]`
pub fn parse_page_range(range_str: &str) -> Result<Vec<u32>> {
    let mut pages = BTreeSet::new();
    for (start, end) in parse_page_spans(range_str)? {
        pages.extend(start..=end);
    }
    Ok(pages.into_iter().collect())
}

/// Like [`parse_page_range`], keeping only pages in `1..=max_page`
///
/// The whole string is still validated; spans are clipped before expansion.
pub(crate) fn parse_page_range_within(range_str: &str, max_page: u32) -> Result<Vec<u32>> {
    let mut pages = BTreeSet::new();
    for (start, end) in parse_page_spans(range_str)? {
        pages.extend(start.max(1)..=end.min(max_page));
    }
    Ok(pages.into_iter().collect())
}

/// Check membership of one page without expanding the range
pub(crate) fn page_range_contains(range_str: &str, page: u32) -> Result<bool> {
    Ok(parse_page_spans(range_str)?
        .iter()
        .any(|&(start, end)| (start..=end).contains(&page)))
}

/// Validate a page range string for form input
///
/// Returns a human-readable message when invalid, `None` when valid.
pub fn validate_page_range(range_str: &str, max_page: Option<u32>) -> Option<String> {
    let pages = match parse_page_range(range_str) {
        Ok(pages) => pages,
        Err(e) => return Some(e.to_string()),
    };

    if pages.is_empty() {
        return Some("Page range must contain at least one page".to_string());
    }

    if let Some(max_page) = max_page {
        let invalid: Vec<String> = pages
            .iter()
            .filter(|&&p| p < 1 || p > max_page)
            .map(u32::to_string)
            .collect();
        if !invalid.is_empty() {
            return Some(format!(
                "Pages out of range: {} (max: {})",
                invalid.join(", "),
                max_page
            ));
        }
    }

    None
}

/// Replace en-dashes with hyphens so exported ranges can be re-parsed
pub fn normalize_page_range(input: &str) -> String {
    input.replace(EN_DASH, "-").trim().to_string()
}
