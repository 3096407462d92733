//! Hugging Face hosted inference backend.
//!
//! Each of the three services is a separate text-in/JSON-out endpoint reached
//! with an optional bearer token.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use notewise_core::{
    defaults, EntailmentBackend, Error, InferenceBackend, Result, SentimentBackend,
    SentimentPrediction, SummarizationBackend, SummaryParams,
};

use crate::config::HuggingFaceConfig;

/// Hugging Face inference backend.
pub struct HuggingFaceBackend {
    client: Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: HuggingFaceConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            sentiment = %config.sentiment_url,
            summarization = %config.summarization_url,
            classification = %config.classification_url,
            authenticated = config.api_token.is_some(),
            "Initializing Hugging Face backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(HuggingFaceConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &HuggingFaceConfig {
        &self.config
    }

    /// Build a request with authentication if configured.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.post(url);
        if let Some(ref token) = self.config.api_token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// POST a JSON body and return the parsed JSON response.
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let start = Instant::now();

        let response = self
            .build_request(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "{} returned {}: {}",
                url, status, body
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(duration_ms = elapsed, "Inference call complete");
        if elapsed > defaults::SLOW_CALL_MS {
            warn!(duration_ms = elapsed, slow = true, "Slow inference call");
        }
        Ok(value)
    }
}

/// Read the first label/score pair of the first group.
///
/// Expected shape: `[[{"label": "POSITIVE", "score": 0.98}, ...]]`.
pub fn parse_sentiment(value: &Value) -> Result<SentimentPrediction> {
    let pair = value
        .get(0)
        .and_then(|group| group.get(0))
        .ok_or_else(|| Error::Inference("Sentiment response has no predictions".to_string()))?;
    serde_json::from_value(pair.clone())
        .map_err(|e| Error::Inference(format!("Malformed sentiment prediction: {}", e)))
}

/// Read `summary_text` from a summarization response, `""` when absent.
///
/// Accepts `[{"summary_text": ...}]` or a bare object.
pub fn parse_summary(value: &Value) -> String {
    first_record(value)
        .get("summary_text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Read the `scores` list from an entailment response.
///
/// Accepts `[{"scores": [...]}]` or a bare object. Missing or empty scores
/// yield an empty vector; a non-numeric first score is an error.
pub fn parse_entailment(value: &Value) -> Result<Vec<f64>> {
    let Some(scores) = first_record(value).get("scores").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };
    match scores.first() {
        None => Ok(Vec::new()),
        Some(first) if first.as_f64().is_none() => Err(Error::Inference(format!(
            "Malformed entailment scores: first score is {}",
            first
        ))),
        Some(_) => Ok(scores.iter().map_while(Value::as_f64).collect()),
    }
}

fn first_record(value: &Value) -> &Value {
    match value {
        Value::Array(items) => items.first().unwrap_or(&Value::Null),
        other => other,
    }
}

#[async_trait]
impl SentimentBackend for HuggingFaceBackend {
    #[instrument(skip(self, text), fields(subsystem = "inference", component = "huggingface", op = "sentiment", text_len = text.chars().count()))]
    async fn classify_sentiment(&self, text: &str) -> Result<SentimentPrediction> {
        let body = json!({ "inputs": text });
        let value = self.post_json(&self.config.sentiment_url, &body).await?;
        parse_sentiment(&value)
    }
}

#[async_trait]
impl SummarizationBackend for HuggingFaceBackend {
    #[instrument(skip(self, text, params), fields(subsystem = "inference", component = "huggingface", op = "summarize", text_len = text.chars().count()))]
    async fn summarize(&self, text: &str, params: &SummaryParams) -> Result<String> {
        let body = json!({ "inputs": text, "parameters": params });
        let value = self.post_json(&self.config.summarization_url, &body).await?;
        Ok(parse_summary(&value))
    }
}

#[async_trait]
impl EntailmentBackend for HuggingFaceBackend {
    #[instrument(skip(self, premise), fields(subsystem = "inference", component = "huggingface", op = "entail", text_len = premise.chars().count()))]
    async fn entailment_scores(&self, premise: &str, hypothesis: &str) -> Result<Vec<f64>> {
        let body = json!({ "inputs": { "premise": premise, "hypothesis": hypothesis } });
        let value = self.post_json(&self.config.classification_url, &body).await?;
        parse_entailment(&value)
    }
}

#[async_trait]
impl InferenceBackend for HuggingFaceBackend {
    async fn health_check(&self) -> Result<bool> {
        let response = self
            .build_request(&self.config.sentiment_url)
            .json(&json!({ "inputs": "health check" }))
            .send()
            .await;

        match response {
            Ok(resp) => {
                if resp.status().is_success() {
                    info!("Hugging Face health check passed");
                    Ok(true)
                } else {
                    warn!("Hugging Face health check failed: {}", resp.status());
                    Ok(false)
                }
            }
            Err(e) => {
                warn!("Hugging Face health check error: {}", e);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sentiment_reads_first_pair_of_first_group() {
        let value = json!([[
            {"label": "NEGATIVE", "score": 0.91},
            {"label": "POSITIVE", "score": 0.09}
        ]]);
        let prediction = parse_sentiment(&value).unwrap();
        assert_eq!(prediction.label, "NEGATIVE");
        assert!((prediction.score - 0.91).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_sentiment_rejects_flat_or_empty() {
        assert!(parse_sentiment(&json!([])).is_err());
        assert!(parse_sentiment(&json!([[]])).is_err());
        assert!(parse_sentiment(&json!({"label": "POSITIVE", "score": 0.9})).is_err());
        assert!(parse_sentiment(&json!([[{"label": "POSITIVE"}]])).is_err());
    }

    #[test]
    fn test_parse_summary_variants() {
        assert_eq!(
            parse_summary(&json!([{"summary_text": "Short version."}])),
            "Short version."
        );
        assert_eq!(parse_summary(&json!({"summary_text": "Bare."})), "Bare.");
        assert_eq!(parse_summary(&json!([])), "");
        assert_eq!(parse_summary(&json!([{"generated_text": "x"}])), "");
    }

    #[test]
    fn test_parse_entailment_variants() {
        assert_eq!(
            parse_entailment(&json!([{"labels": ["entailment"], "scores": [0.8, 0.1, 0.1]}]))
                .unwrap(),
            vec![0.8, 0.1, 0.1]
        );
        assert_eq!(parse_entailment(&json!({"scores": [0.3]})).unwrap(), vec![0.3]);
        assert!(parse_entailment(&json!([{}])).unwrap().is_empty());
        assert!(parse_entailment(&json!([{"scores": []}])).unwrap().is_empty());
        assert!(parse_entailment(&json!({"error": "Model is loading"}))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_entailment_rejects_non_numeric_first_score() {
        for value in [
            json!([{"scores": [null, 0.9, 0.1]}]),
            json!([{"scores": ["0.8", 0.1]}]),
            json!({"scores": [{"value": 0.8}]}),
        ] {
            assert!(matches!(parse_entailment(&value), Err(Error::Inference(_))));
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = HuggingFaceConfig {
            sentiment_url: "not-a-url".to_string(),
            ..HuggingFaceConfig::default()
        };
        assert!(matches!(
            HuggingFaceBackend::new(config),
            Err(Error::Config(_))
        ));
    }
}
