//! Structured logging field name constants for notewise.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query the same names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration (phrase matches, keyword drops) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "inference", "search", "db"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "huggingface", "annotator", "translator", "memory_store"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "sentiment", "summarize", "entail", "annotate", "translate"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Search query text.
pub const QUERY: &str = "query";

/// Hypothesis sent to the entailment classifier.
pub const HYPOTHESIS: &str = "hypothesis";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a search or query.
pub const RESULT_COUNT: &str = "result_count";

/// Character length of the analyzed text.
pub const TEXT_LEN: &str = "text_len";

/// Number of keywords extracted from a query.
pub const KEYWORD_COUNT: &str = "keyword_count";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Endpoint or model used for inference.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
