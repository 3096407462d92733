//! Rule-based translation of free-text queries into note filters.
//!
//! The translator makes a single pass over the lowercased query:
//!
//! 1. The first entry of [`TIME_PHRASES`] found in the query sets the time range.
//! 2. The first entry of [`CATEGORY_PHRASES`] found in the query sets the category.
//! 3. Remaining whitespace tokens become OR'd keywords, minus [`STOP_WORDS`]
//!    and any token that appears inside a phrase key.
//!
//! Table order is observable: `"today or yesterday"` resolves to today.
//!
//! Note the two matching directions. Phrase detection asks whether the query
//! contains a key; keyword filtering asks whether a key contains the token,
//! so short tokens such as `"we"` or `"da"` are dropped as well.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use notewise_core::Category;
//! use notewise_search::translate_at;
//!
//! let now = Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap();
//! let filter = translate_at("Find my work notes from last week", &now);
//!
//! assert_eq!(filter.category, Some(Category::Work));
//! assert!(filter.has_time_constraint());
//! assert!(filter.keywords.is_empty());
//! ```

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, trace};

use notewise_core::{CalendarRange, Category, FilterPredicate};

/// Time phrases in match priority order.
pub const TIME_PHRASES: &[(&str, CalendarRange)] = &[
    ("today", CalendarRange::Today),
    ("yesterday", CalendarRange::Yesterday),
    ("this week", CalendarRange::ThisWeek),
    ("last week", CalendarRange::LastWeek),
];

/// Category phrases in match priority order. `Other` is never inferred.
pub const CATEGORY_PHRASES: &[(&str, Category)] = &[
    ("work", Category::Work),
    ("personal", Category::Personal),
    ("ideas", Category::Ideas),
];

/// Tokens that never become keywords.
pub const STOP_WORDS: &[&str] = &[
    "find",
    "my",
    "notes",
    "from",
    "about",
    "containing",
    "the",
    "a",
    "an",
    "in",
    "on",
    "at",
    "with",
];

/// Translate `query` relative to the current local time.
pub fn translate(query: &str) -> FilterPredicate {
    translate_at(query, &Local::now())
}

/// Translate `query`, resolving calendar phrases against `now` in its own zone.
pub fn translate_at<Tz: TimeZone>(query: &str, now: &DateTime<Tz>) -> FilterPredicate {
    let lowered = query.to_lowercase();
    let mut filter = FilterPredicate::new();

    if let Some(range) = match_time_phrase(&lowered) {
        filter = filter.with_time_range(range.resolve(now));
    }
    if let Some(category) = match_category_phrase(&lowered) {
        filter = filter.with_category(category);
    }
    let keywords = extract_keywords(&lowered);
    if !keywords.is_empty() {
        filter = filter.with_keywords(keywords);
    }

    debug!(
        subsystem = "search",
        component = "translator",
        op = "translate",
        has_time = filter.has_time_constraint(),
        category = ?filter.category,
        keyword_count = filter.keywords.len(),
        "Query translated"
    );
    filter
}

/// First time phrase contained in an already-lowercased query.
pub fn match_time_phrase(lowered: &str) -> Option<CalendarRange> {
    let (phrase, range) = TIME_PHRASES
        .iter()
        .find(|(phrase, _)| lowered.contains(phrase))?;
    trace!(phrase, ?range, "Time phrase matched");
    Some(*range)
}

/// First category phrase contained in an already-lowercased query.
pub fn match_category_phrase(lowered: &str) -> Option<Category> {
    let (phrase, category) = CATEGORY_PHRASES
        .iter()
        .find(|(phrase, _)| lowered.contains(phrase))?;
    trace!(phrase, %category, "Category phrase matched");
    Some(*category)
}

/// Residual keywords of an already-lowercased query, in query order.
pub fn extract_keywords(lowered: &str) -> Vec<String> {
    lowered
        .split_whitespace()
        .filter(|token| {
            let dropped = is_filtered_token(token);
            if dropped {
                trace!(token, "Keyword dropped");
            }
            !dropped
        })
        .map(str::to_string)
        .collect()
}

fn is_filtered_token(token: &str) -> bool {
    STOP_WORDS.contains(&token)
        || TIME_PHRASES.iter().any(|(phrase, _)| phrase.contains(token))
        || CATEGORY_PHRASES.iter().any(|(phrase, _)| phrase.contains(token))
}
