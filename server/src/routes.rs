use crate::config::Config;
use crate::rank;
use crate::youtube::{Candidate, VideoSource};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use futures::future::join_all;
use querytube_protocol as proto;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

pub struct AppState {
    pub source: Arc<dyn VideoSource>,
    pub max_results: u32,
}

#[derive(Deserialize, Debug)]
pub struct SearchParams {
    query: String,
}

async fn index_html() -> Html<&'static str> {
    Html(include_str!("../../frontend/static/index.html"))
}

// A video whose captions cannot be had is still ranked, on its title alone.
async fn with_transcript(source: &dyn VideoSource, mut candidate: Candidate) -> Candidate {
    match source.transcript(&candidate.video_id).await {
        Ok(transcript) => candidate.transcript = transcript,
        Err(error) => {
            debug!(message = "no transcript", video_id = %candidate.video_id, %error);
        }
    }
    candidate
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<proto::SearchResponse> {
    let candidates = match state.source.search(&params.query, state.max_results).await {
        Ok(candidates) => candidates,
        Err(error) => {
            // the page shows "no results" rather than an error for this
            warn!(message = "video search failed", %error);
            Vec::new()
        }
    };
    debug!(query = %params.query, candidates = candidates.len());
    let source = state.source.as_ref();
    let candidates = join_all(
        candidates
            .into_iter()
            .map(|candidate| with_transcript(source, candidate)),
    )
    .await;
    let results = rank::rank(&params.query, candidates);
    Json(proto::SearchResponse { results })
}

pub fn router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/search", get(search))
        .nest_service("/pkg", ServeDir::new(&config.assets))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
