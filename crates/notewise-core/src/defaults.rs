//! Centralized default constants for notewise.
//!
//! Crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// ANNOTATION
// =============================================================================

/// Texts shorter than this (in characters) are never sent for inference.
pub const MIN_ANALYSIS_CHARS: usize = 10;

/// Texts shorter than this (in characters) are never summarized.
pub const MIN_SUMMARY_CHARS: usize = 100;

/// A sentiment label only counts when its score is strictly above this.
pub const SENTIMENT_THRESHOLD: f64 = 0.6;

/// Upper bound on generated summary length (model tokens).
pub const SUMMARY_MAX_LENGTH: u32 = 100;

/// Lower bound on generated summary length (model tokens).
pub const SUMMARY_MIN_LENGTH: u32 = 30;

// =============================================================================
// INFERENCE ENDPOINTS
// =============================================================================

/// Hosted sentiment classifier (SST-2 fine-tuned DistilBERT).
pub const SENTIMENT_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

/// Hosted abstractive summarizer.
pub const SUMMARIZATION_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-cnn";

/// Hosted zero-shot entailment classifier.
pub const CLASSIFICATION_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

/// Calls slower than this are logged with `slow = true`.
pub const SLOW_CALL_MS: u64 = 10_000;

// =============================================================================
// NOTE VALIDATION
// =============================================================================

/// Minimum title length after trimming.
pub const TITLE_MIN_CHARS: usize = 3;

/// Maximum title length after trimming.
pub const TITLE_MAX_CHARS: usize = 100;

/// Minimum content length.
pub const CONTENT_MIN_CHARS: usize = 10;
