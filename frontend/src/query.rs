use thiserror::Error;

/// Fixed endpoint the page was served from.
pub const SEARCH_ENDPOINT: &str = "/search";

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a search query")]
    Empty,
}

/// Search text as the user meant it: trimmed, never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Query(String);

impl Query {
    pub fn parse(raw: &str) -> Result<Query, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(Query(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Request URL for this query against `endpoint`.
    ///
    /// Percent-encodes everything but unreserved characters, so `&`, `?`, `#`, spaces and non-ASCII text stay inside the parameter.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}?query={}", endpoint, urlencoding::encode(&self.0))
    }
}
