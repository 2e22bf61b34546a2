use medinfo_catalog::QueryError;

/// Errors produced by the search service.
///
/// An empty result set is deliberately not represented here: finding
/// nothing is a valid outcome surfaced to the user as an informational
/// notice, never as an error.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was empty or contained only whitespace.
    #[error(transparent)]
    EmptyQuery(#[from] QueryError),
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;
