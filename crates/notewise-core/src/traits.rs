//! Core traits for notewise abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::filter::FilterPredicate;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note and return it as stored.
    async fn insert(&self, note: NewNote) -> Result<Note>;

    /// Fetch a note by ID.
    async fn fetch(&self, id: Uuid) -> Result<Note>;

    /// Find notes matching `filter` (all notes when `None`) in `sort` order.
    async fn find(&self, filter: Option<&FilterPredicate>, sort: NoteSort) -> Result<Vec<Note>>;

    /// Apply a partial update and return the updated note.
    async fn update(&self, id: Uuid, patch: NotePatch) -> Result<Note>;

    /// Delete a note permanently.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// INFERENCE BACKEND TRAITS
// =============================================================================

/// Backend for sentiment classification.
#[async_trait]
pub trait SentimentBackend: Send + Sync {
    /// Classify `text`, returning the top label/score pair.
    async fn classify_sentiment(&self, text: &str) -> Result<SentimentPrediction>;
}

/// Backend for abstractive summarization.
#[async_trait]
pub trait SummarizationBackend: Send + Sync {
    /// Summarize `text`; an absent summary in the response yields `""`.
    async fn summarize(&self, text: &str, params: &SummaryParams) -> Result<String>;
}

/// Backend for zero-shot entailment scoring.
#[async_trait]
pub trait EntailmentBackend: Send + Sync {
    /// Score `hypothesis` against `premise`.
    ///
    /// The first score is the entailment score. An empty vector means the
    /// service returned no scores.
    async fn entailment_scores(&self, premise: &str, hypothesis: &str) -> Result<Vec<f64>>;
}

/// Combined inference backend used by the annotator.
#[async_trait]
pub trait InferenceBackend: SentimentBackend + SummarizationBackend + EntailmentBackend {
    /// Check that the backend is reachable.
    async fn health_check(&self) -> Result<bool>;
}
