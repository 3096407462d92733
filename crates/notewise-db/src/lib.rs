//! # notewise-db
//!
//! Note storage and the note service for notewise.
//!
//! This crate provides:
//! - An in-memory [`NoteRepository`] implementation with title/content
//!   validation and `updated_at` maintenance
//! - [`NoteService`], which annotates notes on create/update and serves
//!   literal and natural-language search
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use notewise_db::{MemoryNoteRepository, NoteService};
//! use notewise_inference::{HuggingFaceBackend, TextAnnotator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let annotator = TextAnnotator::new(Arc::new(HuggingFaceBackend::from_env()?));
//!     let service = NoteService::new(Arc::new(MemoryNoteRepository::new()), annotator);
//!
//!     let note = service
//!         .create("Standup", "Shipped the search feature today", None)
//!         .await?;
//!     println!("Created note {} in {}", note.id, note.category);
//!
//!     let found = service.natural_language_search("work notes from today").await?;
//!     println!("{} matches", found.results.len());
//!     Ok(())
//! }
//! ```

pub mod memory;
pub mod service;

// Re-export core types
pub use notewise_core::*;

pub use memory::{validate_content, validate_title, MemoryNoteRepository};
pub use service::{NaturalLanguageSearchResult, NoteService};
