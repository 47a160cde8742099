//! Segment formatting module
//!
//! Turns a resolved page map into ranges for display: a rich form with
//! rule/region metadata and a compact glyph string.

// Submodules
mod format;
mod types;

// Re-export public API
pub use format::SegmentFormatter;
pub use types::{
    CanonicalPageRange, CanonicalPageSegment, DocumentPageRange, DISPLAY_SEPARATOR,
    NO_PAGES_DISPLAY,
};
