//! # notewise-inference
//!
//! Hosted text inference and note annotation for notewise.
//!
//! This crate provides:
//! - A Hugging Face backend for sentiment, summarization, and zero-shot
//!   entailment
//! - [`TextAnnotator`], which turns note content into an [`Annotation`]
//!   and never fails
//! - Join primitives for concurrent inference fan-out
//! - TOML/environment configuration
//!
//! # Feature Flags
//!
//! - `mock`: Expose [`mock::MockInferenceBackend`] to other crates' tests
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use notewise_inference::{HuggingFaceBackend, TextAnnotator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = HuggingFaceBackend::from_env().unwrap();
//!     let annotator = TextAnnotator::new(Arc::new(backend));
//!     let annotation = annotator.annotate("Shipped the release ahead of schedule!").await;
//!     println!("{:?}", annotation);
//! }
//! ```

pub mod annotator;
pub mod config;
pub mod huggingface;
pub mod join;

// Mock inference backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use notewise_core::*;

pub use annotator::{best_category, AnnotatorConfig, TextAnnotator};
pub use config::{ConfigError, ConfigResult, HuggingFaceConfig, InferenceConfig};
pub use huggingface::HuggingFaceBackend;
