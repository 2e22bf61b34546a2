/// Errors that can occur when constructing a [`SearchQuery`].
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The input was empty or contained only whitespace
    #[error("search term required: please enter a term to search")]
    Empty,
}

/// A search query that is guaranteed to contain at least one
/// non-whitespace character.
///
/// The input is trimmed of leading and trailing whitespace during
/// construction, so the emptiness check and the eventual matching both see
/// the same text. Panels keep the raw keystroke buffer as a plain `String`;
/// a `SearchQuery` only exists once a search is actually requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Creates a new `SearchQuery` from user input.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Empty`] if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, QueryError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the trimmed query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercase form used for case-insensitive matching.
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SearchQuery {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SearchQuery {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SearchQuery::new(&s).map_err(serde::de::Error::custom)
    }
}
