//! Maintenance handlers.
//!
//! Every routine answers `204 No Content` on success; failures go through
//! `AppError`'s response mapping.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Serialize;

use common::AppResult;
use domain::IndexName;

use crate::api::state::AppState;

/// Result of emptying a single index.
#[derive(Debug, Serialize)]
pub struct ClearIndexResponse {
    pub index: String,
    pub deleted: u64,
}

/// Create maintenance routes.
pub fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/reset", post(reset_data))
        .route("/clear", post(clear_all))
        .route("/clear_db", post(clear_db))
        .route("/clear_indexes", post(clear_indexes))
        .route("/indices/:name/clear", post(clear_index))
}

async fn reset_data(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.cleanup.reset_data().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_all(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.cleanup.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_db(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.cleanup.clear_db().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_indexes(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.cleanup.clear_indexes().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_index(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ClearIndexResponse>> {
    let index = IndexName::parse(&name)?;
    let deleted = state.cleanup.clear_index(&index).await?;

    Ok(Json(ClearIndexResponse {
        index: index.to_string(),
        deleted,
    }))
}
