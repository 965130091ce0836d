use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::*;
use crate::store::{SharedStore, StoreError};

// ============================================================
// Error Handling
// ============================================================

/// Request failure, rendered as a plain-text diagnostic.
///
/// Messages include the underlying cause; this API is meant for trusted
/// internal use.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Store(StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ApiError::NotFound(format!("Habit {id} not found")),
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();

        if status.is_server_error() {
            tracing::error!("Internal error: {}", msg);
        } else {
            tracing::warn!("Request rejected ({}): {}", status, msg);
        }

        (status, msg).into_response()
    }
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation(format!("Invalid habit id: {raw:?}")))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Habits
// ============================================================

pub async fn list_habits(State(store): State<SharedStore>) -> Result<Json<Vec<Habit>>, ApiError> {
    Ok(Json(store.list()?))
}

/// The body is decoded by hand so that every malformed payload, including a
/// missing content type, is a `400` rather than axum's 415/422 rejections.
pub async fn create_habit(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<Habit>), ApiError> {
    let input: CreateHabitInput = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("Invalid JSON: {e}")))?;

    if input.name.trim().is_empty() {
        return Err(ApiError::Validation("Habit name must not be empty".to_string()));
    }

    let habit = store.create(input)?;
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn get_habit(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Habit>, ApiError> {
    let id = parse_id(&id)?;
    store
        .get(id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Habit {id} not found")))
}

pub async fn complete_habit(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Habit>, ApiError> {
    let id = parse_id(&id)?;
    store.complete(id).map(Json).map_err(ApiError::from)
}
