//! In-memory note repository.
//!
//! Notes are kept in insertion order behind a `tokio` read/write lock, so
//! concurrent writers are serialized and readers always see whole notes.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use notewise_core::{
    defaults, logging, Error, FilterPredicate, NewNote, Note, NotePatch, NoteRepository, NoteSort,
    Result,
};

/// Validate and normalize a note title. Returns the trimmed title.
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    let len = trimmed.chars().count();
    if len < defaults::TITLE_MIN_CHARS {
        return Err(Error::InvalidInput(format!(
            "Title must be at least {} characters",
            defaults::TITLE_MIN_CHARS
        )));
    }
    if len > defaults::TITLE_MAX_CHARS {
        return Err(Error::InvalidInput(format!(
            "Title must be at most {} characters",
            defaults::TITLE_MAX_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate note content length.
pub fn validate_content(content: &str) -> Result<()> {
    if content.chars().count() < defaults::CONTENT_MIN_CHARS {
        return Err(Error::InvalidInput(format!(
            "Content must be at least {} characters",
            defaults::CONTENT_MIN_CHARS
        )));
    }
    Ok(())
}

/// Note repository backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryNoteRepository {
    notes: RwLock<Vec<Note>>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

fn sort_notes(notes: &mut [Note], sort: NoteSort) {
    match sort {
        NoteSort::UpdatedDesc => notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        NoteSort::CreatedDesc => notes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    #[instrument(skip(self, note), fields(subsystem = "db", component = "memory_store", op = "insert", note_id))]
    async fn insert(&self, note: NewNote) -> Result<Note> {
        let title = validate_title(&note.title)?;
        validate_content(&note.content)?;

        let now = Utc::now();
        let stored = Note {
            id: Uuid::now_v7(),
            title,
            content: note.content,
            category: note.category,
            sentiment: note.sentiment,
            summary: note.summary,
            created_at: now,
            updated_at: now,
        };
        tracing::Span::current().record(logging::NOTE_ID, tracing::field::display(stored.id));

        self.notes.write().await.push(stored.clone());
        debug!("Note inserted");
        Ok(stored)
    }

    async fn fetch(&self, id: Uuid) -> Result<Note> {
        self.notes
            .read()
            .await
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(Error::NoteNotFound(id))
    }

    #[instrument(skip(self, filter), fields(subsystem = "db", component = "memory_store", op = "find", result_count))]
    async fn find(&self, filter: Option<&FilterPredicate>, sort: NoteSort) -> Result<Vec<Note>> {
        // Newest insertions first so equal timestamps still list recent notes first.
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .iter()
            .rev()
            .filter(|n| filter.map_or(true, |f| f.matches(n)))
            .cloned()
            .collect();
        sort_notes(&mut notes, sort);

        tracing::Span::current().record(logging::RESULT_COUNT, notes.len());
        Ok(notes)
    }

    #[instrument(skip(self, patch), fields(subsystem = "db", component = "memory_store", op = "update", note_id = %id))]
    async fn update(&self, id: Uuid, patch: NotePatch) -> Result<Note> {
        let title = patch.title.as_deref().map(validate_title).transpose()?;
        if let Some(content) = patch.content.as_deref() {
            validate_content(content)?;
        }

        let mut notes = self.notes.write().await;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(Error::NoteNotFound(id))?;

        if let Some(title) = title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(category) = patch.category {
            note.category = category;
        }
        if let Some(sentiment) = patch.sentiment {
            note.sentiment = Some(sentiment);
        }
        if let Some(summary) = patch.summary {
            note.summary = summary;
        }
        note.updated_at = Utc::now();

        debug!("Note updated");
        Ok(note.clone())
    }

    #[instrument(skip(self), fields(subsystem = "db", component = "memory_store", op = "delete", note_id = %id))]
    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(Error::NoteNotFound(id));
        }
        debug!("Note deleted");
        Ok(())
    }
}
