//! Integration tests for the admin API endpoints.
//!
//! These tests use fake services so that no database or search node is
//! needed.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use common::{AppError, AppResult, ResultExt};
use domain::IndexName;
use platform_service_lib::api::{create_router, AppState};
use platform_service_lib::config::PlatformConfig;
use platform_service_lib::infra::SearchIndex;
use platform_service_lib::repository::CleanupRepository;
use platform_service_lib::service::BackendCleanupService;

// =============================================================================
// Fake Services for Testing
// =============================================================================

/// Records which routine ran; fails every routine when `failing` is set.
#[derive(Default)]
struct FakeCleanup {
    calls: Mutex<Vec<String>>,
    failing: bool,
}

impl FakeCleanup {
    fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    fn record(&self, routine: &str) -> AppResult<()> {
        self.calls.lock().unwrap().push(routine.to_string());
        if self.failing {
            return Err(AppError::Internal("relation \"issues\" does not exist".into()))
                .context("Fail to reset data");
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackendCleanupService for FakeCleanup {
    async fn clear_all(&self) -> AppResult<()> {
        self.record("clear_all")
    }

    async fn clear_db(&self) -> AppResult<()> {
        self.record("clear_db")
    }

    async fn clear_indexes(&self) -> AppResult<()> {
        self.record("clear_indexes")
    }

    async fn reset_data(&self) -> AppResult<()> {
        self.record("reset_data")
    }

    async fn clear_index(&self, index: &IndexName) -> AppResult<u64> {
        self.record(&format!("clear_index:{}", index))?;
        Ok(7)
    }
}

/// Repository whose ping result is fixed.
struct FakeRepository {
    reachable: bool,
}

#[async_trait]
impl CleanupRepository for FakeRepository {
    async fn ping(&self) -> AppResult<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(AppError::internal("connection refused"))
        }
    }

    async fn truncate(&self, _table: &str) -> AppResult<()> {
        Ok(())
    }

    async fn delete_except(&self, _table: &str, _column: &str, _keep: &str) -> AppResult<u64> {
        Ok(0)
    }

    async fn delete_where_not_null(&self, _table: &str, _column: &str) -> AppResult<u64> {
        Ok(0)
    }

    async fn delete_where_eq(&self, _table: &str, _column: &str, _value: &str) -> AppResult<u64> {
        Ok(0)
    }
}

/// Search node whose ping result is fixed.
struct FakeSearch {
    reachable: bool,
}

#[async_trait]
impl SearchIndex for FakeSearch {
    async fn ping(&self) -> AppResult<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(AppError::search_index("Failed to ping search node. Status: 503"))
        }
    }

    async fn clear_cache(&self) -> AppResult<()> {
        Ok(())
    }

    async fn list_indices(&self) -> AppResult<Vec<String>> {
        Ok(Vec::new())
    }

    async fn delete_all_documents(&self, _index: &str) -> AppResult<u64> {
        Ok(0)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn app(cleanup: Arc<FakeCleanup>, config: PlatformConfig) -> Router {
    app_with_health(cleanup, config, true, true)
}

fn app_with_health(
    cleanup: Arc<FakeCleanup>,
    config: PlatformConfig,
    database_up: bool,
    search_up: bool,
) -> Router {
    let state = AppState::new(
        cleanup,
        Arc::new(FakeRepository {
            reachable: database_up,
        }),
        Arc::new(FakeSearch {
            reachable: search_up,
        }),
        config,
    );
    create_router(state)
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_healthy_when_both_backends_answer() {
    let app = app(Arc::new(FakeCleanup::default()), PlatformConfig::default());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["search"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_reports_degraded_when_search_is_down() {
    let app = app_with_health(
        Arc::new(FakeCleanup::default()),
        PlatformConfig::default(),
        true,
        false,
    );

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["search"]["status"], "unhealthy");
    assert!(body["services"]["search"]["error"].is_string());
}

// =============================================================================
// Maintenance routes
// =============================================================================

#[tokio::test]
async fn test_each_route_runs_its_routine() {
    let routes = [
        ("/api/system/reset", "reset_data"),
        ("/api/system/clear", "clear_all"),
        ("/api/system/clear_db", "clear_db"),
        ("/api/system/clear_indexes", "clear_indexes"),
    ];

    for (uri, routine) in routes {
        let cleanup = Arc::new(FakeCleanup::default());
        let app = app(cleanup.clone(), PlatformConfig::default());

        let response = app.oneshot(post(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{}", uri);
        assert_eq!(cleanup.calls(), vec![routine.to_string()]);
    }
}

#[tokio::test]
async fn test_maintenance_routes_reject_get() {
    let app = app(Arc::new(FakeCleanup::default()), PlatformConfig::default());

    let response = app
        .oneshot(Request::get("/api/system/reset").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_failed_routine_returns_operation_message_only() {
    let app = app(Arc::new(FakeCleanup::failing()), PlatformConfig::default());

    let response = app.oneshot(post("/api/system/reset")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "OPERATION_FAILED");
    assert_eq!(body["error"]["message"], "Fail to reset data");
}

#[tokio::test]
async fn test_clear_index_returns_deleted_count() {
    let cleanup = Arc::new(FakeCleanup::default());
    let app = app(cleanup.clone(), PlatformConfig::default());

    let response = app
        .oneshot(post("/api/system/indices/issues/clear"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["index"], "issues");
    assert_eq!(body["deleted"], 7);
    assert_eq!(cleanup.calls(), vec!["clear_index:issues".to_string()]);
}

#[tokio::test]
async fn test_clear_index_rejects_wildcards() {
    let cleanup = Arc::new(FakeCleanup::default());
    let app = app(cleanup.clone(), PlatformConfig::default());

    let response = app
        .oneshot(post("/api/system/indices/iss*/clear"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(cleanup.calls().is_empty());
}

// =============================================================================
// Admin token
// =============================================================================

#[tokio::test]
async fn test_missing_token_is_rejected_when_configured() {
    let cleanup = Arc::new(FakeCleanup::default());
    let config = PlatformConfig::default().with_admin_token("s3cret");
    let app = app(cleanup.clone(), config);

    let response = app.oneshot(post("/api/system/clear")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert!(cleanup.calls().is_empty());
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let cleanup = Arc::new(FakeCleanup::default());
    let config = PlatformConfig::default().with_admin_token("s3cret");
    let app = app(cleanup.clone(), config);

    let request = Request::builder()
        .method("POST")
        .uri("/api/system/clear")
        .header("X-Admin-Token", "guess")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(cleanup.calls().is_empty());
}

#[tokio::test]
async fn test_matching_token_is_accepted() {
    let cleanup = Arc::new(FakeCleanup::default());
    let config = PlatformConfig::default().with_admin_token("s3cret");
    let app = app(cleanup.clone(), config);

    let request = Request::builder()
        .method("POST")
        .uri("/api/system/clear")
        .header("X-Admin-Token", "s3cret")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(cleanup.calls(), vec!["clear_all".to_string()]);
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let config = PlatformConfig::default().with_admin_token("s3cret");
    let app = app(Arc::new(FakeCleanup::default()), config);

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
