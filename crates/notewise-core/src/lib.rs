//! # notewise-core
//!
//! Core types, traits, and abstractions for notewise.
//!
//! This crate provides the note and annotation data model, the composable
//! `FilterPredicate`, calendar range helpers, and the trait definitions that
//! the inference, search, and storage crates implement or consume.

pub mod defaults;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod temporal;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use filter::FilterPredicate;
pub use models::*;
pub use temporal::{CalendarRange, TimeRange};
pub use traits::*;
