//! Note service: CRUD with automatic annotation, plus literal and
//! natural-language search.
//!
//! Annotation happens on create and whenever an update carries new content.
//! Annotation never fails, so the only errors surfaced here come from
//! validation and storage.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use notewise_core::{
    logging, Category, Error, FilterPredicate, NewNote, Note, NotePatch, NoteRepository, NoteSort,
    Result,
};
use notewise_inference::TextAnnotator;
use notewise_search::translate_at;

use crate::memory::{validate_content, validate_title};

/// Response of a natural-language search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalLanguageSearchResult {
    /// The query as submitted.
    pub query: String,
    /// The structured filter the query was translated into.
    pub parsed_query: FilterPredicate,
    /// Matching notes, most recently updated first.
    pub results: Vec<Note>,
}

/// Note operations for the route layer.
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
    annotator: TextAnnotator,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>, annotator: TextAnnotator) -> Self {
        Self { repo, annotator }
    }

    /// Create a note, annotating its content.
    ///
    /// An explicit `category` wins over the suggested one.
    #[instrument(skip_all, fields(subsystem = "db", component = "note_service", op = "create", note_id))]
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        category: Option<Category>,
    ) -> Result<Note> {
        let title = validate_title(title)?;
        validate_content(content)?;

        let annotation = self.annotator.annotate(content).await;
        let note = self
            .repo
            .insert(NewNote {
                title,
                content: content.to_string(),
                category: category.unwrap_or(annotation.suggested_category),
                sentiment: Some(annotation.sentiment),
                summary: annotation.summary,
            })
            .await?;

        tracing::Span::current().record(logging::NOTE_ID, tracing::field::display(note.id));
        info!(category = %note.category, "Note created");
        Ok(note)
    }

    pub async fn get(&self, id: Uuid) -> Result<Note> {
        self.repo.fetch(id).await
    }

    /// All notes, most recently updated first.
    pub async fn list(&self) -> Result<Vec<Note>> {
        self.repo.find(None, NoteSort::UpdatedDesc).await
    }

    /// Apply `patch`, re-annotating when it carries new content.
    ///
    /// Fresh annotation values take precedence over values in the patch; an
    /// empty summary from annotation keeps the patch's summary (or the stored
    /// one when the patch has none).
    #[instrument(skip(self, patch), fields(subsystem = "db", component = "note_service", op = "update", note_id = %id))]
    pub async fn update(&self, id: Uuid, mut patch: NotePatch) -> Result<Note> {
        // Missing notes fail before any inference is spent on them.
        self.repo.fetch(id).await?;

        if let Some(content) = patch.content.as_deref().filter(|c| !c.is_empty()) {
            validate_content(content)?;
            let annotation = self.annotator.annotate(content).await;
            patch.sentiment = Some(annotation.sentiment);
            if !annotation.summary.is_empty() {
                patch.summary = Some(annotation.summary);
            }
            debug!("Content changed, annotation refreshed");
        }

        self.repo.update(id, patch).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo.delete(id).await?;
        info!(subsystem = "db", component = "note_service", note_id = %id, "Note deleted");
        Ok(())
    }

    /// Literal, case-insensitive search over title and content.
    #[instrument(skip(self), fields(subsystem = "db", component = "note_service", op = "search"))]
    pub async fn search(&self, text: &str) -> Result<Vec<Note>> {
        let filter = FilterPredicate::containing(text);
        self.repo.find(Some(&filter), NoteSort::UpdatedDesc).await
    }

    /// Translate `query` and return the matching notes.
    pub async fn natural_language_search(
        &self,
        query: &str,
    ) -> Result<NaturalLanguageSearchResult> {
        self.natural_language_search_at(query, &Local::now()).await
    }

    /// [`Self::natural_language_search`] with calendar phrases resolved against `now`.
    #[instrument(skip(self, now), fields(subsystem = "db", component = "note_service", op = "nl_search", result_count))]
    pub async fn natural_language_search_at<Tz: TimeZone>(
        &self,
        query: &str,
        now: &DateTime<Tz>,
    ) -> Result<NaturalLanguageSearchResult> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("Query is required".to_string()));
        }

        let parsed_query = translate_at(query, now);
        let results = self
            .repo
            .find(Some(&parsed_query), NoteSort::UpdatedDesc)
            .await?;

        tracing::Span::current().record(logging::RESULT_COUNT, results.len());
        Ok(NaturalLanguageSearchResult {
            query: query.to_string(),
            parsed_query,
            results,
        })
    }
}
