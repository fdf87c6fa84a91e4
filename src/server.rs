//! HTTP surface: `GET /api/search` plus an optional static directory.

use crate::aggregate::Aggregator;
use crate::error::SearchError;
use crate::models::ResultBundle;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub location: Option<String>,
}

/// Error response with a JSON `{"error": ...}` body.
pub struct ApiError(SearchError);

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SearchError::EmptyQuery => {
                warn!("Rejected search without query");
                (StatusCode::BAD_REQUEST, "Query parameter required")
            }
            SearchError::TaskFailed(e) => {
                error!(error = %e, "Search error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Search failed")
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn search_handler(
    State(aggregator): State<Arc<Aggregator>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ResultBundle>, ApiError> {
    let query = params.query.unwrap_or_default();
    let bundle = aggregator
        .search(&query, params.location.as_deref())
        .await?;
    Ok(Json(bundle))
}

/// Build the application router.
///
/// When `public_dir` is set, any path other than the API is served from it.
pub fn router(aggregator: Arc<Aggregator>, public_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/search", get(search_handler))
        .with_state(aggregator);

    let app = match public_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use crate::client::mock::MockFetcher;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(fetcher: Arc<MockFetcher>) -> Router {
        router(
            Arc::new(Aggregator::new(fetcher, ClientConfig::default())),
            None,
        )
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_query_is_400() {
        let fetcher = Arc::new(MockFetcher::new());
        let (status, body) = get_json(app(Arc::clone(&fetcher)), "/api/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Query parameter required");
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_query_is_400() {
        let fetcher = Arc::new(MockFetcher::new());
        let (status, body) = get_json(app(Arc::clone(&fetcher)), "/api/search?query=&location=Ohio").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_returns_bundle() {
        let fetcher = Arc::new(MockFetcher::new());
        let (status, body) = get_json(app(fetcher), "/api/search?query=election&location=").await;
        assert_eq!(status, StatusCode::OK);

        assert!(body["social"]["youtube"].is_array());
        for key in ["tiktok", "instagram", "twitch"] {
            assert_eq!(body["social"][key].as_array().unwrap().len(), 3, "{key}");
        }
        for key in ["cnn", "fox", "bbc"] {
            let items = body["news"][key].as_array().unwrap();
            assert!(!items.is_empty() && items.len() <= 5, "{key}");
            for item in items {
                assert!(item["title"].as_str().unwrap().contains("election"));
                for field in ["url", "thumbnail", "source"] {
                    assert!(item[field].is_string(), "{key}.{field}");
                }
            }
        }
    }

    #[tokio::test]
    async fn test_encoded_query_is_decoded() {
        let fetcher = Arc::new(MockFetcher::new());
        let (status, body) =
            get_json(app(fetcher), "/api/search?query=climate%20change&location=New%20York").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["news"]["cnn"][0]["title"],
            "Breaking: climate change developments in New York"
        );
    }

    #[tokio::test]
    async fn test_api_error_task_failed_is_500() {
        let handle: tokio::task::JoinHandle<()> = tokio::spawn(async { panic!("boom") });
        let join_error = handle.await.unwrap_err();
        let response = ApiError(SearchError::TaskFailed(join_error)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Search failed");
    }
}
