//! Name search helpers shared by the map sidebar and the search box.
//!
//! Matching is a case-insensitive substring test on the site name. It runs
//! entirely over an already-fetched list, so there is no query language.

/// Maximum number of entries offered in the search dropdown.
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// Case-insensitive substring match. An empty query matches everything.
pub fn name_matches(name: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

/// First [`SEARCH_RESULT_LIMIT`] items whose name matches `query`.
///
/// An empty query yields no results (the dropdown stays closed).
pub fn search_by_name<'a, T, F>(items: &'a [T], query: &str, name_of: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    if query.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .filter(|item| name_matches(name_of(item), query))
        .take(SEARCH_RESULT_LIMIT)
        .collect()
}

/// Byte range of the first case-insensitive occurrence of `query` in `text`,
/// for highlighting the matched part of a result.
///
/// Returns `None` when the query is empty, absent, or when lowercasing would
/// shift character boundaries (the range then could not index `text`).
pub fn highlight_range(text: &str, query: &str) -> Option<std::ops::Range<usize>> {
    if query.is_empty() {
        return None;
    }
    let lowered = text.to_lowercase();
    if lowered.len() != text.len() {
        return None;
    }
    let start = lowered.find(&query.to_lowercase())?;
    let end = start + query.to_lowercase().len();
    (text.is_char_boundary(start) && text.is_char_boundary(end)).then_some(start..end)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
