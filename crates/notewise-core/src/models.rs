//! Core data models for notewise.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

// =============================================================================
// CATEGORY
// =============================================================================

/// Fixed note category.
///
/// The declaration order is significant: it is the order in which category
/// hypotheses are scored and the tie-break order for equal scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Ideas,
    #[default]
    Other,
}

impl Category {
    /// All categories in their fixed order.
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Ideas,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Ideas => "Ideas",
            Self::Other => "Other",
        }
    }

    /// Entailment hypothesis used to score this category against a note.
    pub fn hypothesis(&self) -> String {
        format!("This is a {} note.", self.as_str().to_lowercase())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "ideas" => Ok(Self::Ideas),
            "other" => Ok(Self::Other),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

// =============================================================================
// SENTIMENT
// =============================================================================

/// Coarse sentiment attached to a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }

    /// Map a classifier prediction to a sentiment.
    ///
    /// A polar label only counts when its score is strictly above
    /// `threshold`; everything else is neutral.
    pub fn from_prediction(prediction: &SentimentPrediction, threshold: f64) -> Self {
        if prediction.score <= threshold {
            return Self::Neutral;
        }
        match prediction.label.as_str() {
            "POSITIVE" => Self::Positive,
            "NEGATIVE" => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            _ => Err(format!("Invalid sentiment: {}", s)),
        }
    }
}

/// Raw label/score pair returned by a sentiment classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPrediction {
    pub label: String,
    pub score: f64,
}

// =============================================================================
// ANNOTATION
// =============================================================================

/// Metadata derived from note content by the inference services.
///
/// Every field has a safe default, so an annotation is always complete even
/// when some or all analyses failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub sentiment: Sentiment,
    pub summary: String,
    pub suggested_category: Category,
}

/// Generation constraints sent with summarization requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryParams {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            max_length: defaults::SUMMARY_MAX_LENGTH,
            min_length: defaults::SUMMARY_MIN_LENGTH,
            do_sample: false,
        }
    }
}

// =============================================================================
// NOTE
// =============================================================================

/// A stored note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Category,
    /// `None` until the note has been analyzed (serialized as `null`).
    pub sentiment: Option<Sentiment>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub summary: String,
}

/// Partial update of a note; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Sort order for note listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSort {
    /// Most recently updated first.
    #[default]
    UpdatedDesc,
    /// Most recently created first.
    CreatedDesc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_fixed() {
        assert_eq!(
            Category::ALL,
            [
                Category::Work,
                Category::Personal,
                Category::Ideas,
                Category::Other
            ]
        );
    }

    #[test]
    fn test_category_hypothesis_is_lowercased() {
        assert_eq!(Category::Work.hypothesis(), "This is a work note.");
        assert_eq!(Category::Ideas.hypothesis(), "This is a ideas note.");
    }

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            let parsed: Category = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert!("misc".parse::<Category>().is_err());
    }

    #[test]
    fn test_sentiment_above_threshold() {
        let positive = SentimentPrediction {
            label: "POSITIVE".to_string(),
            score: 0.95,
        };
        let negative = SentimentPrediction {
            label: "NEGATIVE".to_string(),
            score: 0.61,
        };
        assert_eq!(Sentiment::from_prediction(&positive, 0.6), Sentiment::Positive);
        assert_eq!(Sentiment::from_prediction(&negative, 0.6), Sentiment::Negative);
    }

    #[test]
    fn test_sentiment_at_or_below_threshold_is_neutral() {
        for label in ["POSITIVE", "NEGATIVE"] {
            let weak = SentimentPrediction {
                label: label.to_string(),
                score: 0.5,
            };
            let boundary = SentimentPrediction {
                label: label.to_string(),
                score: 0.6,
            };
            assert_eq!(Sentiment::from_prediction(&weak, 0.6), Sentiment::Neutral);
            assert_eq!(Sentiment::from_prediction(&boundary, 0.6), Sentiment::Neutral);
        }
    }

    #[test]
    fn test_sentiment_unknown_label_is_neutral() {
        let odd = SentimentPrediction {
            label: "LABEL_1".to_string(),
            score: 0.99,
        };
        assert_eq!(Sentiment::from_prediction(&odd, 0.6), Sentiment::Neutral);
    }

    #[test]
    fn test_annotation_defaults() {
        let annotation = Annotation::default();
        assert_eq!(annotation.sentiment, Sentiment::Neutral);
        assert_eq!(annotation.summary, "");
        assert_eq!(annotation.suggested_category, Category::Other);
    }

    #[test]
    fn test_summary_params_defaults() {
        let params = SummaryParams::default();
        assert_eq!(params.max_length, 100);
        assert_eq!(params.min_length, 30);
        assert!(!params.do_sample);
    }

    #[test]
    fn test_summary_params_wire_shape() {
        let json = serde_json::to_value(SummaryParams::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"max_length": 100, "min_length": 30, "do_sample": false})
        );
    }

    #[test]
    fn test_unanalyzed_note_serializes_sentiment_as_null() {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: "Groceries".to_string(),
            content: "Buy milk and eggs".to_string(),
            category: Category::Personal,
            sentiment: None,
            summary: String::new(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert!(json["sentiment"].is_null());

        let analyzed = Note {
            sentiment: Some(Sentiment::Positive),
            ..note
        };
        let json = serde_json::to_value(&analyzed).unwrap();
        assert_eq!(json["sentiment"], "Positive");
    }

    #[test]
    fn test_note_sort_variants() {
        assert_eq!(NoteSort::default(), NoteSort::UpdatedDesc);
        assert_eq!(serde_json::to_value(NoteSort::CreatedDesc).unwrap(), "created_desc");
        assert!(serde_json::from_str::<NoteSort>("\"unspecified\"").is_err());
    }
}
