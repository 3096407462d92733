//! Note annotation: sentiment, summary, and suggested category.
//!
//! [`TextAnnotator::annotate`] never fails. Three analyses run concurrently
//! under a settle-all join, and each falls back to its own default when it
//! fails:
//!
//! | Analysis | Fallback |
//! |----------|----------|
//! | sentiment | `Neutral` |
//! | summary | `""` |
//! | category | `Other` |
//!
//! Category classification is itself a fan-out of one entailment call per
//! category under a fail-fast-all join: if any single call fails, the whole
//! classification fails and the category falls back to `Other`. The outer join
//! tolerates partial failure; the inner one does not.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

use notewise_core::{
    defaults, logging, Annotation, Category, InferenceBackend, Result, Sentiment, SummaryParams,
};

use crate::config::{ConfigError, ConfigResult};
use crate::join::{fail_fast_all, settle_all, with_deadline};

/// Thresholds and limits for annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Texts shorter than this skip inference entirely.
    pub min_analysis_chars: usize,
    /// Texts shorter than this are not summarized.
    pub min_summary_chars: usize,
    /// Polar sentiment labels need a score strictly above this.
    pub sentiment_threshold: f64,
    /// Generation constraints for the summarizer.
    pub summary: SummaryParams,
    /// Per-call timeout in milliseconds; `None` waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_timeout_ms: Option<u64>,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            min_analysis_chars: defaults::MIN_ANALYSIS_CHARS,
            min_summary_chars: defaults::MIN_SUMMARY_CHARS,
            sentiment_threshold: defaults::SENTIMENT_THRESHOLD,
            summary: SummaryParams::default(),
            call_timeout_ms: None,
        }
    }
}

impl AnnotatorConfig {
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms.map(Duration::from_millis)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.sentiment_threshold) {
            return Err(ConfigError::Validation(format!(
                "sentiment_threshold must be within [0, 1], got: {}",
                self.sentiment_threshold
            )));
        }
        if self.summary.min_length > self.summary.max_length {
            return Err(ConfigError::Validation(format!(
                "summary min_length {} exceeds max_length {}",
                self.summary.min_length, self.summary.max_length
            )));
        }
        if self.call_timeout_ms == Some(0) {
            return Err(ConfigError::Validation(
                "call_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Produces annotations for note content.
#[derive(Clone)]
pub struct TextAnnotator {
    backend: Arc<dyn InferenceBackend>,
    config: AnnotatorConfig,
}

impl TextAnnotator {
    /// Create an annotator with default thresholds.
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self::with_config(backend, AnnotatorConfig::default())
    }

    /// Create an annotator with custom thresholds.
    pub fn with_config(backend: Arc<dyn InferenceBackend>, config: AnnotatorConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Annotate `text`. Always returns a complete annotation.
    #[instrument(skip(self, text), fields(subsystem = "inference", component = "annotator", op = "annotate", text_len))]
    pub async fn annotate(&self, text: &str) -> Annotation {
        let chars = text.chars().count();
        tracing::Span::current().record(logging::TEXT_LEN, chars);

        if chars < self.config.min_analysis_chars {
            debug!("Text below analysis threshold, skipping inference");
            return Annotation::default();
        }

        let start = Instant::now();
        let (sentiment, summary, category) = settle_all(
            self.analyze_sentiment(text),
            self.summarize(text, chars),
            self.classify(text),
        )
        .await;

        let annotation = Annotation {
            sentiment: sentiment.unwrap_or_else(|e| {
                warn!(op = "sentiment", error = %e, "Sentiment analysis failed, using Neutral");
                Sentiment::Neutral
            }),
            summary: summary.unwrap_or_else(|e| {
                warn!(op = "summarize", error = %e, "Summarization failed, using empty summary");
                String::new()
            }),
            suggested_category: category.unwrap_or_else(|e| {
                warn!(op = "classify", error = %e, "Classification failed, using Other");
                Category::Other
            }),
        };

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            sentiment = %annotation.sentiment,
            category = %annotation.suggested_category,
            summary_len = annotation.summary.len(),
            "Annotation complete"
        );
        annotation
    }

    async fn analyze_sentiment(&self, text: &str) -> Result<Sentiment> {
        let prediction =
            with_deadline(self.backend.classify_sentiment(text), self.config.call_timeout())
                .await?;
        Ok(Sentiment::from_prediction(
            &prediction,
            self.config.sentiment_threshold,
        ))
    }

    async fn summarize(&self, text: &str, chars: usize) -> Result<String> {
        if chars < self.config.min_summary_chars {
            return Ok(String::new());
        }
        with_deadline(
            self.backend.summarize(text, &self.config.summary),
            self.config.call_timeout(),
        )
        .await
    }

    async fn classify(&self, text: &str) -> Result<Category> {
        let timeout = self.config.call_timeout();
        let calls = Category::ALL.iter().map(|category| {
            let hypothesis = category.hypothesis();
            async move {
                with_deadline(self.backend.entailment_scores(text, &hypothesis), timeout).await
            }
        });
        let responses = fail_fast_all(calls).await?;
        Ok(best_category(&responses))
    }
}

/// Pick the category whose first score is highest.
///
/// `responses[i]` belongs to `Category::ALL[i]`. Ties keep the earlier
/// category; responses without scores never win. `Other` when nothing wins.
pub fn best_category(responses: &[Vec<f64>]) -> Category {
    let mut best_score = -1.0;
    let mut best = Category::Other;
    for (category, scores) in Category::ALL.iter().zip(responses) {
        if let Some(&score) = scores.first() {
            if score > best_score {
                best_score = score;
                best = *category;
            }
        }
    }
    best
}
