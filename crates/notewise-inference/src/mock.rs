//! Mock inference backend for deterministic testing.
//!
//! Every response is configured up front, and individual services can be
//! switched to fail so fallback paths are reachable without a network.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let backend = MockInferenceBackend::new()
//!     .with_sentiment("POSITIVE", 0.97)
//!     .with_category_score(Category::Ideas, 0.8);
//!
//! let annotator = TextAnnotator::new(Arc::new(backend.clone()));
//! let annotation = annotator.annotate("What if notes could tag themselves?").await;
//! assert_eq!(annotation.suggested_category, Category::Ideas);
//! assert_eq!(backend.entail_call_count(), 4);
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use notewise_core::{
    Category, EntailmentBackend, Error, InferenceBackend, Result, SentimentBackend,
    SentimentPrediction, SummarizationBackend, SummaryParams,
};

/// Mock inference backend for testing.
#[derive(Clone)]
pub struct MockInferenceBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    sentiment: SentimentPrediction,
    summary: String,
    category_scores: HashMap<Category, f64>,
    latency_ms: u64,
    fail_sentiment: bool,
    fail_summary: bool,
    failing_categories: HashSet<Category>,
}

/// One recorded backend call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
    /// Hypothesis for entailment calls.
    pub hypothesis: Option<String>,
    /// Generation parameters for summarize calls.
    pub params: Option<SummaryParams>,
    pub timestamp: std::time::Instant,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            sentiment: SentimentPrediction {
                label: "POSITIVE".to_string(),
                score: 0.5,
            },
            summary: "Mock summary".to_string(),
            category_scores: HashMap::new(),
            latency_ms: 0,
            fail_sentiment: false,
            fail_summary: false,
            failing_categories: HashSet::new(),
        }
    }
}

impl MockInferenceBackend {
    /// Create a new mock backend.
    ///
    /// Defaults: a low-confidence positive sentiment, a fixed summary, and no
    /// entailment scores for any category.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the sentiment prediction.
    pub fn with_sentiment(mut self, label: impl Into<String>, score: f64) -> Self {
        Arc::make_mut(&mut self.config).sentiment = SentimentPrediction {
            label: label.into(),
            score,
        };
        self
    }

    /// Set the summary text.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).summary = summary.into();
        self
    }

    /// Set the entailment score returned for `category`'s hypothesis.
    pub fn with_category_score(mut self, category: Category, score: f64) -> Self {
        Arc::make_mut(&mut self.config)
            .category_scores
            .insert(category, score);
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    pub fn failing_sentiment(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_sentiment = true;
        self
    }

    pub fn failing_summary(mut self) -> Self {
        Arc::make_mut(&mut self.config).fail_summary = true;
        self
    }

    /// Fail the entailment call for one category's hypothesis.
    pub fn failing_category(mut self, category: Category) -> Self {
        Arc::make_mut(&mut self.config)
            .failing_categories
            .insert(category);
        self
    }

    /// Fail every service.
    pub fn failing_all(mut self) -> Self {
        let config = Arc::make_mut(&mut self.config);
        config.fail_sentiment = true;
        config.fail_summary = true;
        config.failing_categories.extend(Category::ALL);
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    pub fn sentiment_call_count(&self) -> usize {
        self.count_operation("sentiment")
    }

    pub fn summarize_call_count(&self) -> usize {
        self.count_operation("summarize")
    }

    pub fn entail_call_count(&self) -> usize {
        self.count_operation("entail")
    }

    /// Hypotheses sent to the entailment service, in call order.
    pub fn hypotheses(&self) -> Vec<String> {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| c.hypothesis.clone())
            .collect()
    }

    /// Parameters of the most recent summarize call.
    pub fn last_summary_params(&self) -> Option<SummaryParams> {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|c| c.params)
    }

    fn count_operation(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log_call(
        &self,
        operation: &str,
        input: &str,
        hypothesis: Option<&str>,
        params: Option<SummaryParams>,
    ) {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.to_string(),
            hypothesis: hypothesis.map(str::to_string),
            params,
            timestamp: std::time::Instant::now(),
        });
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

impl Default for MockInferenceBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn simulated_failure(operation: &str) -> Error {
    Error::Inference(format!("Simulated {} failure", operation))
}

#[async_trait]
impl SentimentBackend for MockInferenceBackend {
    async fn classify_sentiment(&self, text: &str) -> Result<SentimentPrediction> {
        self.log_call("sentiment", text, None, None);
        self.simulate_latency().await;

        if self.config.fail_sentiment {
            return Err(simulated_failure("sentiment"));
        }
        Ok(self.config.sentiment.clone())
    }
}

#[async_trait]
impl SummarizationBackend for MockInferenceBackend {
    async fn summarize(&self, text: &str, params: &SummaryParams) -> Result<String> {
        self.log_call("summarize", text, None, Some(*params));
        self.simulate_latency().await;

        if self.config.fail_summary {
            return Err(simulated_failure("summarize"));
        }
        Ok(self.config.summary.clone())
    }
}

#[async_trait]
impl EntailmentBackend for MockInferenceBackend {
    async fn entailment_scores(&self, premise: &str, hypothesis: &str) -> Result<Vec<f64>> {
        self.log_call("entail", premise, Some(hypothesis), None);
        self.simulate_latency().await;

        let category = Category::ALL
            .into_iter()
            .find(|c| c.hypothesis() == hypothesis);

        match category {
            Some(c) if self.config.failing_categories.contains(&c) => {
                Err(simulated_failure("entail"))
            }
            Some(c) => Ok(self
                .config
                .category_scores
                .get(&c)
                .map(|score| vec![*score, 1.0 - *score])
                .unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl InferenceBackend for MockInferenceBackend {
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
