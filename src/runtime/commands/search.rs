use crate::core::search::{expand_search as expand_hits, local_search};
use crate::runtime::AppState;

use super::boxes::list_boxes;
use super::shared::SearchResults;

/// Local search. Every call, including an empty query, supersedes in-flight expansions.
pub fn search_items(state: &AppState, query: &str) -> Result<SearchResults, String> {
    state.search.begin();
    let boxes = list_boxes(state)?;
    Ok(SearchResults {
        query: query.to_string(),
        hits: local_search(&boxes, query),
        terms: Vec::new(),
    })
}

/// Local hits followed by hits for AI-suggested related terms.
///
/// Returns `Ok(None)` when a newer search started while the terms were being
/// fetched; the caller should keep showing the newer results.
pub async fn expand_search(
    state: &AppState,
    query: &str,
) -> Result<Option<SearchResults>, String> {
    let ticket = state.search.begin();
    if query.is_empty() {
        return Ok(Some(SearchResults::default()));
    }

    let terms = state.suggestions.smart_search_interpretation(query).await;
    if !state.search.is_current(ticket) {
        log::debug!("discarding stale expansion for '{}'", query);
        return Ok(None);
    }

    let boxes = list_boxes(state)?;
    let mut hits = local_search(&boxes, query);
    let expanded = expand_hits(&boxes, &hits, &terms);
    hits.extend(expanded);

    Ok(Some(SearchResults {
        query: query.to_string(),
        hits,
        terms,
    }))
}
