//! The record search service.
//!
//! Matching is a linear scan over a static catalog: a record matches when
//! the lowercase query is a substring of the lowercase form of any enabled
//! field (name, description, category, or any single tag entry). Results
//! always preserve catalog declaration order; there is no ranking or
//! relevance scoring.

use medinfo_catalog::{MatchFields, SearchQuery, Searchable};

use crate::error::SearchResult;

/// Returns true if `record` matches the lowercase `needle` on any of the
/// enabled fields.
fn matches<R: Searchable>(record: &R, needle: &str, fields: MatchFields) -> bool {
    if fields.name && record.name().to_lowercase().contains(needle) {
        return true;
    }
    if fields.description && record.description().to_lowercase().contains(needle) {
        return true;
    }
    if fields.category && record.category().to_lowercase().contains(needle) {
        return true;
    }
    if fields.tags {
        return record
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle));
    }
    false
}

/// Searches a catalog with an already-validated query.
///
/// The returned records are borrowed from the catalog in declaration
/// order. An empty result is a valid outcome, not an error.
pub fn search_records<'a, R: Searchable>(
    query: &SearchQuery,
    catalog: &'a [R],
    fields: MatchFields,
) -> Vec<&'a R> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|record| matches(*record, &needle, fields))
        .collect()
}

/// Searches a catalog with raw user input.
///
/// The input is trimmed before the emptiness check, so `""` and `"   "`
/// fail the same way.
///
/// # Errors
///
/// Returns [`SearchError::EmptyQuery`](crate::SearchError::EmptyQuery) if
/// the trimmed input is empty. No search is executed in that case.
pub fn search<'a, R: Searchable>(
    raw_query: &str,
    catalog: &'a [R],
    fields: MatchFields,
) -> SearchResult<Vec<&'a R>> {
    let query = SearchQuery::new(raw_query)?;
    Ok(search_records(&query, catalog, fields))
}

/// A catalog search bound to its configured matching breadth.
///
/// One service instance exists per panel; the field set comes from
/// [`CoreConfig`](crate::CoreConfig) at startup and never changes
/// afterwards.
#[derive(Debug, Clone, Copy)]
pub struct SearchService {
    fields: MatchFields,
}

impl SearchService {
    /// Creates a search service with the given matching breadth.
    pub fn new(fields: MatchFields) -> Self {
        Self { fields }
    }

    /// The field set this service matches against.
    pub fn fields(&self) -> MatchFields {
        self.fields
    }

    /// Runs a search over `catalog` with this service's field set.
    pub fn search<'a, R: Searchable>(
        &self,
        raw_query: &str,
        catalog: &'a [R],
    ) -> SearchResult<Vec<&'a R>> {
        search(raw_query, catalog, self.fields)
    }
}
