use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::metadata::CompetitionId;
use crate::store::{CacheRecord, CacheStore, CompetitionSummary};

/// Errors surfaced by the read endpoints
#[derive(Debug)]
pub enum ApiError {
    NotFound(CompetitionId),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Competition {} not found", id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Read-only routes over the cache; they never trigger a refresh
pub fn router(store: Arc<CacheStore>) -> Router {
    Router::new()
        .route("/api/sheets", get(list_sheets))
        .route("/api/sheet/:id", get(get_sheet))
        .with_state(store)
}

async fn list_sheets(State(store): State<Arc<CacheStore>>) -> Json<BTreeMap<CompetitionId, CompetitionSummary>> {
    let summaries = store
        .snapshot_all()
        .into_iter()
        .map(|(id, record)| (id, CompetitionSummary::from(record)))
        .collect();

    Json(summaries)
}

async fn get_sheet(
    State(store): State<Arc<CacheStore>>,
    Path(id): Path<CompetitionId>,
) -> ApiResult<Json<CacheRecord>> {
    store.snapshot_one(id).map(Json).ok_or(ApiError::NotFound(id))
}
