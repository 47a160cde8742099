//! Canonical page rule module
//!
//! User overrides that assign (positive) or suppress (negative) canonical
//! page numbers for a contiguous span of document pages.
//!
//! # Features
//!
//! - Rule model with Arabic, Roman and arbitrary label sequences
//! - Structural validation
//! - Overlap detection against existing rules
//! - Joining of contiguous rules that continue one another

// Submodules
mod join;
mod overlap;
mod sequence;
mod types;
mod validate;

// Re-export public API
pub use join::auto_join_contiguous_rules;
pub use overlap::{detect_rule_conflicts, find_overlapping_rules};
pub use sequence::generate_canonical_page_sequence;
pub(crate) use sequence::generate_canonical_page_prefix;
pub use types::{
    AutoJoinPlan, CanonicalPageRule, Result, RuleConflict, RuleError, RuleJoin, RuleSummary,
    RuleType,
};
pub use validate::validate_rule;
