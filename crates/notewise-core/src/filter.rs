//! Composable note filter produced by query translation.
//!
//! A `FilterPredicate` combines up to three dimensions with logical AND:
//!
//! - **Time range**: half-open interval over `created_at`
//! - **Category**: exact category match
//! - **Keywords**: title or content contains any keyword (case-insensitive)
//!
//! Absent dimensions do not constrain. An empty predicate matches every note.
//!
//! # Example
//!
//! ```
//! use notewise_core::{Category, FilterPredicate, TimeRange};
//! use chrono::{Duration, Utc};
//!
//! let filter = FilterPredicate::new()
//!     .with_category(Category::Work)
//!     .with_time_range(TimeRange::since(Utc::now() - Duration::days(7)))
//!     .with_keywords(vec!["deadline".to_string()]);
//!
//! assert!(filter.has_category_constraint());
//! assert!(!filter.is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{Category, Note};
use crate::temporal::TimeRange;

/// Structured filter over notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    /// Creation-time window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,

    /// Required category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Keywords combined with OR against title and content.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl FilterPredicate {
    /// Create an empty predicate (matches all notes).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.time_range = Some(range);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Predicate matching title or content against a single literal term.
    pub fn containing(term: impl Into<String>) -> Self {
        Self::new().with_keywords(vec![term.into()])
    }

    /// Check if the predicate is completely empty (matches all notes).
    pub fn is_empty(&self) -> bool {
        !self.has_time_constraint() && !self.has_category_constraint() && !self.has_keywords()
    }

    pub fn has_time_constraint(&self) -> bool {
        self.time_range.is_some()
    }

    pub fn has_category_constraint(&self) -> bool {
        self.category.is_some()
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Evaluate the predicate against a note.
    pub fn matches(&self, note: &Note) -> bool {
        if let Some(range) = &self.time_range {
            if !range.contains(&note.created_at) {
                return false;
            }
        }
        if let Some(category) = self.category {
            if note.category != category {
                return false;
            }
        }
        if self.keywords.is_empty() {
            return true;
        }

        let title = note.title.to_lowercase();
        let content = note.content.to_lowercase();
        self.keywords.iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            title.contains(&keyword) || content.contains(&keyword)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn ts(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, d, 12, 0, 0).unwrap()
    }

    fn note(title: &str, content: &str, category: Category, created: DateTime<Utc>) -> Note {
        Note {
            id: Uuid::now_v7(),
            title: title.to_string(),
            content: content.to_string(),
            category,
            sentiment: None,
            summary: String::new(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_empty_predicate_matches_everything() {
        let filter = FilterPredicate::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&note("Groceries", "milk and eggs", Category::Other, ts(1))));
    }

    #[test]
    fn test_category_constraint() {
        let filter = FilterPredicate::new().with_category(Category::Work);
        assert!(filter.matches(&note("Standup", "sprint review", Category::Work, ts(1))));
        assert!(!filter.matches(&note("Standup", "sprint review", Category::Ideas, ts(1))));
    }

    #[test]
    fn test_keywords_are_or_combined_and_case_insensitive() {
        let filter = FilterPredicate::new().with_keywords(vec!["urgent".into(), "budget".into()]);
        assert!(filter.matches(&note("URGENT: call", "about the lease", Category::Other, ts(1))));
        assert!(filter.matches(&note("Plan", "Quarterly Budget draft", Category::Work, ts(1))));
        assert!(!filter.matches(&note("Plan", "nothing relevant", Category::Work, ts(1))));
    }

    #[test]
    fn test_dimensions_are_and_combined() {
        let filter = FilterPredicate::new()
            .with_category(Category::Work)
            .with_time_range(TimeRange::between(ts(10), ts(15)))
            .with_keywords(vec!["report".into()]);

        assert!(filter.matches(&note("Report", "weekly", Category::Work, ts(12))));
        assert!(!filter.matches(&note("Report", "weekly", Category::Work, ts(16))));
        assert!(!filter.matches(&note("Report", "weekly", Category::Personal, ts(12))));
        assert!(!filter.matches(&note("Memo", "weekly", Category::Work, ts(12))));
    }

    #[test]
    fn test_containing_builds_single_keyword() {
        let filter = FilterPredicate::containing("Lease");
        assert_eq!(filter.keywords, vec!["Lease".to_string()]);
        assert!(filter.matches(&note("Apartment", "renew the lease", Category::Personal, ts(3))));
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let json = serde_json::to_value(FilterPredicate::new()).unwrap();
        assert_eq!(json, serde_json::json!({}));

        let json = serde_json::to_value(FilterPredicate::new().with_category(Category::Ideas))
            .unwrap();
        assert_eq!(json, serde_json::json!({"category": "Ideas"}));
    }
}
