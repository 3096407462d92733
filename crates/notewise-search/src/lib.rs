//! # notewise-search
//!
//! Natural-language search for notewise.
//!
//! This crate turns free-text queries such as `"work notes from last week"`
//! into a [`FilterPredicate`] over notes. Translation is a fixed rule table,
//! not a learned parser: it never fails, and an unrecognised query simply
//! yields keywords (or an unconstrained predicate).
//!
//! ## Example
//!
//! ```
//! use notewise_search::translate;
//!
//! let filter = translate("urgent deadline project");
//! assert_eq!(filter.keywords, vec!["urgent", "deadline", "project"]);
//! assert!(!filter.has_time_constraint());
//! ```

pub mod translator;

// Re-export core types
pub use notewise_core::*;

pub use translator::{
    extract_keywords, match_category_phrase, match_time_phrase, translate, translate_at,
    CATEGORY_PHRASES, STOP_WORDS, TIME_PHRASES,
};
