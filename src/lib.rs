//! canonical-pages - Canonical page numbering for back-of-book indexing
//!
//! Scanned and typeset books rarely number their pages 1..N: front matter
//! runs in Roman numerals, plates are unnumbered, and body numbering restarts
//! after the preface. This crate decides, for every physical page, which
//! printed page number an index should cite.
//!
//! # Modules
//!
//! - [`numeral`] - Roman/Arabic conversion and sequence generation
//! - [`page_range`] - Page range parsing and applicability filters
//! - [`region`] - Page-number regions and conflict detection
//! - [`rule`] - User rules: validation, overlap checks, joining
//! - [`canonical`] - Resolution of the per-page canonical mapping
//! - [`segment`] - Range formatting for display
//! - [`snapshot`] - JSON project snapshots (CLI input)
//! - [`config`] - TOML configuration
//!
//! # Example
//!
//! ```rust
//! use canonical_pages::{CanonicalPageResolver, CanonicalPageRule, SegmentFormatter};
//!
//! let rules = vec![
//!     CanonicalPageRule::roman("front", 4, 13, "i"),
//!     CanonicalPageRule::arabic("body", 14, 40, "1"),
//! ];
//! let pages = CanonicalPageResolver::compute_canonical_pages(40, &[], &rules, &[]).into_pages();
//! assert_eq!(
//!     SegmentFormatter::format_canonical_pages_display(&pages),
//!     "1-3 🔴  i-27 🔵"
//! );
//! ```

pub mod canonical;
pub mod cli;
pub mod config;
pub mod numeral;
pub mod page_range;
pub mod region;
pub mod rule;
pub mod segment;
pub mod snapshot;

// Re-exports for convenience
pub use canonical::{
    get_canonical_page_for_page, get_canonical_pages_statistics, CanonicalPageInfo,
    CanonicalPageResolver, CanonicalPageStatistics, CanonicalPages, PageColor, PageSource,
    Resolution,
};
pub use cli::{CheckRulesArgs, Cli, Commands, ConvertArgs, ResolveArgs, ValidateRangeArgs};
pub use config::{CliOverrides, Config, ConfigError, OutputConfig, OutputFormat, ResolveConfig};
pub use numeral::{NumeralCodec, NumeralError, NumeralType};
pub use page_range::{
    applies_to_page, get_applicable_pages, normalize_page_range, page_config_summary,
    parse_page_range, validate_page_range, PageApplicability, PageConfig, PageConfigMode,
    PageRangeError,
};
pub use region::{
    BoundingBox, ConflictDetector, ConflictingRegion, PageNumberConflict, Region,
    RegionDerivedPageNumber, RegionType,
};
pub use rule::{
    auto_join_contiguous_rules, detect_rule_conflicts, find_overlapping_rules,
    generate_canonical_page_sequence, validate_rule, AutoJoinPlan, CanonicalPageRule,
    RuleConflict, RuleError, RuleJoin, RuleSummary, RuleType,
};
pub use segment::{CanonicalPageRange, CanonicalPageSegment, DocumentPageRange, SegmentFormatter};
pub use snapshot::{ProjectSnapshot, SnapshotError};

/// Process exit codes of the `canonical-pages` binary
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Unexpected failure
    pub const GENERAL_ERROR: i32 = 1;
    /// Snapshot or other input file missing
    pub const INPUT_NOT_FOUND: i32 = 2;
    /// Page-number regions conflict; resolution blocked
    pub const CONFLICT: i32 = 3;
    /// Malformed input (JSON, rules, ranges, numerals)
    pub const INVALID_INPUT: i32 = 4;
}
