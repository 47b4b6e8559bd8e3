//! HTTP Handlers

use std::path::Path;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub registry: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        registry: state.registry.name().to_string(),
    })
}

/// Health probe plus the frontend bundle. Paths that are not files fall back
/// to `index.html` so client-side routes survive a reload.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let frontend = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/health", get(health_check))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arden_core::MockRegistryClient;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::path::PathBuf;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn bundle() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("arden-static-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html>arden</html>").unwrap();
        std::fs::write(dir.join("app.js"), "console.log(1)").unwrap();
        dir
    }

    fn app(dir: &Path) -> Router {
        router(
            AppState {
                registry: Arc::new(MockRegistryClient::new()),
            },
            dir,
        )
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let dir = bundle();
        let (status, body) = get_body(app(&dir), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["registry"], "MockRegistry");
    }

    #[tokio::test]
    async fn test_static_and_spa_fallback() {
        let dir = bundle();
        let (status, body) = get_body(app(&dir), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");

        let (status, body) = get_body(app(&dir), "/campaign/launch-analytics-dashboard-1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("arden"));

        std::fs::remove_dir_all(dir).ok();
    }
}
