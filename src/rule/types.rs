//! Rule module core types
//!
//! Canonical page rules are user overrides that assign or suppress canonical
//! numbering for a contiguous span of document pages.

use crate::numeral::NumeralType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================
// Error Types
// ============================================================

/// Rule validation error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("documentPageStart must be >= 1 (got {0})")]
    InvalidStartPage(u32),

    #[error("documentPageStart must be <= documentPageEnd ({start} > {end})")]
    InvertedRange { start: u32, end: u32 },

    #[error("numeralType is required for positive rules")]
    MissingNumeralType,

    #[error("startingCanonicalPage is required for {0} numeral type")]
    MissingStartingPage(NumeralType),

    #[error("startingCanonicalPage '{value}' is not a valid {numeral_type} numeral")]
    InvalidStartingPage {
        value: String,
        numeral_type: NumeralType,
    },

    #[error("arbitrarySequence is required for arbitrary numeral type")]
    MissingArbitrarySequence,

    #[error("arbitrarySequence length must match document page range (expected {expected}, got {actual})")]
    SequenceLengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, RuleError>;

// ============================================================
// Core Data Structures
// ============================================================

/// Whether a rule assigns or suppresses canonical pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    /// Assigns canonical page labels
    Positive,
    /// Marks pages as deliberately unindexed
    Negative,
}

/// User-authored canonical page override
///
/// Covers `document_page_start..=document_page_end` (1-indexed, inclusive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalPageRule {
    /// Rule identifier
    pub id: String,
    /// Positive or negative
    pub rule_type: RuleType,
    /// First covered document page
    pub document_page_start: u32,
    /// Last covered document page
    pub document_page_end: u32,
    /// Optional user label ("Front matter")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Numeral type of the generated labels (positive rules)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeral_type: Option<NumeralType>,
    /// Seed label for arabic/roman rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_canonical_page: Option<String>,
    /// Explicit per-page labels for arbitrary rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arbitrary_sequence: Option<Vec<String>>,
    /// Creation time, used to break ties when joining rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CanonicalPageRule {
    fn base(id: impl Into<String>, rule_type: RuleType, start: u32, end: u32) -> Self {
        Self {
            id: id.into(),
            rule_type,
            document_page_start: start,
            document_page_end: end,
            label: None,
            numeral_type: None,
            starting_canonical_page: None,
            arbitrary_sequence: None,
            created_at: None,
        }
    }

    /// Negative rule over `start..=end`
    pub fn negative(id: impl Into<String>, start: u32, end: u32) -> Self {
        Self::base(id, RuleType::Negative, start, end)
    }

    /// Positive Arabic rule counting up from `starting_page`
    pub fn arabic(
        id: impl Into<String>,
        start: u32,
        end: u32,
        starting_page: impl Into<String>,
    ) -> Self {
        Self {
            numeral_type: Some(NumeralType::Arabic),
            starting_canonical_page: Some(starting_page.into()),
            ..Self::base(id, RuleType::Positive, start, end)
        }
    }

    /// Positive Roman rule counting up from `starting_page`
    pub fn roman(
        id: impl Into<String>,
        start: u32,
        end: u32,
        starting_page: impl Into<String>,
    ) -> Self {
        Self {
            numeral_type: Some(NumeralType::Roman),
            starting_canonical_page: Some(starting_page.into()),
            ..Self::base(id, RuleType::Positive, start, end)
        }
    }

    /// Positive rule with explicit labels
    pub fn arbitrary<I, S>(id: impl Into<String>, start: u32, end: u32, sequence: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            numeral_type: Some(NumeralType::Arbitrary),
            arbitrary_sequence: Some(sequence.into_iter().map(Into::into).collect()),
            ..Self::base(id, RuleType::Positive, start, end)
        }
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the creation time
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Number of covered pages (zero or negative for an inverted span)
    pub fn page_count(&self) -> i64 {
        i64::from(self.document_page_end) - i64::from(self.document_page_start) + 1
    }

    /// Check if the rule covers a document page
    pub fn covers(&self, page: u32) -> bool {
        (self.document_page_start..=self.document_page_end).contains(&page)
    }

    /// Check if this is a positive rule
    pub fn is_positive(&self) -> bool {
        self.rule_type == RuleType::Positive
    }
}

/// Short description of an existing rule involved in an overlap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    pub id: String,
    pub rule_type: RuleType,
    pub document_page_start: u32,
    pub document_page_end: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl From<&CanonicalPageRule> for RuleSummary {
    fn from(rule: &CanonicalPageRule) -> Self {
        Self {
            id: rule.id.clone(),
            rule_type: rule.rule_type,
            document_page_start: rule.document_page_start,
            document_page_end: rule.document_page_end,
            label: rule.label.clone(),
        }
    }
}

/// Overlap between a proposed span and existing rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConflict {
    /// Overlapping document pages, ascending
    pub document_pages: Vec<u32>,
    /// Existing rules that overlap
    pub existing_rules: Vec<RuleSummary>,
}

impl RuleConflict {
    /// Check if there is no overlap
    pub fn is_empty(&self) -> bool {
        self.document_pages.is_empty()
    }
}

/// One merge performed while joining contiguous rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleJoin {
    /// Rule widened to cover both spans
    pub kept_rule_id: String,
    /// Rule absorbed into the kept one
    pub removed_rule_id: String,
    /// Span of the kept rule after the join
    pub document_page_start: u32,
    pub document_page_end: u32,
}

/// Result of joining contiguous rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoJoinPlan {
    /// Rules after all joins (input order, absorbed rules removed)
    pub rules: Vec<CanonicalPageRule>,
    /// Joins in the order they were applied
    pub joins: Vec<RuleJoin>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let rule = CanonicalPageRule::roman("r1", 1, 10, "i").with_label("Preface");
        assert!(rule.is_positive());
        assert_eq!(rule.numeral_type, Some(NumeralType::Roman));
        assert_eq!(rule.starting_canonical_page.as_deref(), Some("i"));
        assert_eq!(rule.label.as_deref(), Some("Preface"));

        let rule = CanonicalPageRule::negative("r2", 3, 5);
        assert!(!rule.is_positive());
        assert!(rule.numeral_type.is_none());

        let rule = CanonicalPageRule::arbitrary("r3", 1, 2, ["A", "B"]);
        assert_eq!(rule.arbitrary_sequence, Some(vec!["A".to_string(), "B".to_string()]));
    }

    #[test]
    fn test_page_count_and_covers() {
        let rule = CanonicalPageRule::negative("r", 3, 5);
        assert_eq!(rule.page_count(), 3);
        assert!(rule.covers(3));
        assert!(rule.covers(5));
        assert!(!rule.covers(6));

        let inverted = CanonicalPageRule::negative("r", 5, 3);
        assert_eq!(inverted.page_count(), -1);
        assert!(!inverted.covers(4));
    }

    #[test]
    fn test_rule_deserialize() {
        let json = r#"{
            "id": "rule-1",
            "ruleType": "positive",
            "documentPageStart": 20,
            "documentPageEnd": 499,
            "numeralType": "arabic",
            "startingCanonicalPage": "1",
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;
        let rule: CanonicalPageRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.rule_type, RuleType::Positive);
        assert_eq!(rule.page_count(), 480);
        assert_eq!(rule.numeral_type, Some(NumeralType::Arabic));
        assert!(rule.created_at.is_some());
        assert!(rule.arbitrary_sequence.is_none());
    }

    #[test]
    fn test_rule_summary_from_rule() {
        let rule = CanonicalPageRule::negative("n1", 1, 2).with_label("Plates");
        let summary = RuleSummary::from(&rule);
        assert_eq!(summary.id, "n1");
        assert_eq!(summary.rule_type, RuleType::Negative);
        assert_eq!(summary.label.as_deref(), Some("Plates"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RuleError::MissingStartingPage(NumeralType::Roman).to_string(),
            "startingCanonicalPage is required for roman numeral type"
        );
        assert_eq!(
            RuleError::InvertedRange { start: 9, end: 2 }.to_string(),
            "documentPageStart must be <= documentPageEnd (9 > 2)"
        );
    }
}
