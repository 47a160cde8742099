//! Canonical page resolution module
//!
//! Decides, for every physical page of a document, which printed page
//! number an indexer should cite.
//!
//! # Features
//!
//! - Conflict gate over page-number regions (all-or-nothing)
//! - Rule > region > document page precedence
//! - Per-rule failure isolation for malformed sequences
//! - Per-source statistics
//!
//! # Example
//!
//! ```rust
//! use canonical_pages::{CanonicalPageResolver, CanonicalPageRule};
//!
//! let rules = vec![
//!     CanonicalPageRule::roman("front", 1, 4, "i"),
//!     CanonicalPageRule::arabic("body", 5, 20, "1"),
//! ];
//! let resolution = CanonicalPageResolver::compute_canonical_pages(20, &[], &rules, &[]);
//! let pages = resolution.pages().unwrap();
//! assert_eq!(pages.get(4).unwrap().canonical_page.as_deref(), Some("iv"));
//! assert_eq!(pages.get(5).unwrap().canonical_page.as_deref(), Some("1"));
//! ```

// Submodules
mod resolver;
mod types;

// Re-export public API
pub use resolver::{
    get_canonical_page_for_page, get_canonical_pages_statistics, CanonicalPageResolver,
};
pub use types::{
    CanonicalPageInfo, CanonicalPageStatistics, CanonicalPages, PageColor, PageSource, Resolution,
};
