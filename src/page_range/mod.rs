//! Page range module
//!
//! Parses page range strings and evaluates which document pages an entity
//! applies to.
//!
//! # Features
//!
//! - Comma/hyphen range parsing with validation messages for forms
//! - `this_page`, `all_pages`, `page_range` and `custom` modes
//! - Every-other stepping with an optional end page
//! - Explicit page exceptions
//!
//! # Example
//!
//! ```rust
//! use canonical_pages::{parse_page_range, PageApplicability, PageConfig};
//!
//! assert_eq!(parse_page_range("1-2,5-6,8").unwrap(), vec![1, 2, 5, 6, 8]);
//!
//! let config = PageConfig::all_pages().with_every_other(1, None);
//! assert_eq!(config.applicable_pages(6), vec![1, 3, 5]);
//! ```

// Submodules
mod applicability;
mod parse;
mod types;

// Re-export public API
pub use applicability::{
    applies_to_page, get_applicable_pages, page_config_summary, PageApplicability,
};
pub(crate) use applicability::get_applicable_pages_within;
pub use parse::{normalize_page_range, parse_page_range, validate_page_range};
pub use types::{PageConfig, PageConfigMode, PageRangeError, Result, EN_DASH};
