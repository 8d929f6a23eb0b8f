//! HTTP shell around the fan-out search.
//!
//! ## Endpoints
//!
//! - `GET /search?q=<text>` — JSON object, one array of `{title, url}` per source
//! - `GET /static/*` — front-end assets
//! - any other path — the front-end's `index.html`

use crate::config::TrawlConfig;
use crate::error::Result;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use trawl_search::{Aggregator, ResultBundle, SearchError};

#[derive(Clone)]
struct AppState {
    aggregator: Arc<Aggregator>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Maps search errors onto HTTP responses.
struct ApiError(SearchError);

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            SearchError::InvalidQuery => (StatusCode::BAD_REQUEST, "missing query").into_response(),
            other => {
                tracing::error!(error = %other, "search failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "search failed").into_response()
            }
        }
    }
}

/// Build the router.
///
/// `/search` answers any origin. Static files are served from `static_dir`,
/// and every unmatched path gets `index.html`.
pub fn router(aggregator: Arc<Aggregator>, static_dir: &Path) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    let api = Router::new()
        .route("/search", get(search))
        .layer(cors)
        .with_state(AppState { aggregator });

    Router::new()
        .merge(api)
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback_service(ServeFile::new(static_dir.join("index.html")))
        .layer(TraceLayer::new_for_http())
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> std::result::Result<Json<ResultBundle>, ApiError> {
    let bundle = state.aggregator.aggregate(&params.q).await?;
    Ok(Json(bundle))
}

/// Build the aggregator from `config`, bind the listener, and serve until
/// the process is stopped.
///
/// # Errors
///
/// Returns an error if the source configuration is invalid (before any
/// socket is opened), or if binding or serving fails.
pub async fn serve(config: &TrawlConfig) -> Result<()> {
    let aggregator = Arc::new(Aggregator::new(&config.to_search_config())?);
    let sources: Vec<&str> = aggregator.sources().collect();
    tracing::info!(?sources, "search sources configured");

    let listener = TcpListener::bind(config.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    let app = router(aggregator, &config.server.static_dir);

    tracing::info!("trawl listening on http://{local_addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_query_maps_to_bad_request() {
        let response = ApiError(SearchError::InvalidQuery).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn other_errors_map_to_server_error() {
        let response = ApiError(SearchError::Upstream(502)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_q_defaults_to_empty() {
        let params: SearchParams = serde_json::from_str("{}").expect("deserialize");
        assert!(params.q.is_empty());
    }

    #[tokio::test]
    async fn serve_rejects_invalid_sources_before_binding() {
        let mut config = TrawlConfig::default();
        config.server.host = "127.0.0.1".to_owned();
        config.server.port = 0;
        config.sources[0].endpoint = "https://example.com/no-placeholder".to_owned();

        let err = serve(&config).await.unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }
}
