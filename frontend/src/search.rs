use crate::query::Query;
use gloo_net::http::Request;
use querytube_protocol as proto;
use thiserror::Error;
use tracing::{debug, error};

/// Everything that turns into the connection error panel.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("network: {0}")]
    Network(gloo_net::Error),
    #[error("bad response body: {0}")]
    Decode(gloo_net::Error),
}

pub async fn fetch(endpoint: &str, query: &Query) -> Result<proto::SearchResponse, SearchError> {
    let url = query.url(endpoint);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(SearchError::Network)?;
    if !response.ok() {
        return Err(SearchError::Status(response.status()));
    }
    response
        .json::<proto::SearchResponse>()
        .await
        .map_err(SearchError::Decode)
}

#[derive(Debug)]
pub enum SearchState {
    Idle,
    Loading,
    Results(Vec<proto::VideoResult>),
    Empty,
    ConnectionError,
}

impl SearchState {
    /// State after a search has settled; never `Loading`.
    pub fn settle(result: Result<proto::SearchResponse, SearchError>) -> SearchState {
        match result {
            Err(_) => SearchState::ConnectionError,
            Ok(response) if response.results.is_empty() => SearchState::Empty,
            Ok(response) => SearchState::Results(response.results),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }
}

/// Stamps each search so that only the newest one may update the page.
#[derive(Debug, Default)]
pub struct Generations {
    latest: u64,
}

impl Generations {
    pub fn next(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }
}

/// Settles `state` with the outcome of search `generation`, unless a newer search has started since.
/// Returns whether the page needs redrawing.
pub fn apply(
    state: &mut SearchState,
    generations: &Generations,
    generation: u64,
    result: Result<proto::SearchResponse, SearchError>,
) -> bool {
    if !generations.is_current(generation) {
        debug!(message = "dropping stale search response", generation);
        return false;
    }
    if let Err(error) = &result {
        error!(message = "search failed", ?error);
    }
    *state = SearchState::settle(result);
    true
}
