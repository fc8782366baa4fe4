//! Router and request handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;

use enx_db::{NewKey, StoreError};
use enx_export::{ExportError, KEY_LENGTH};

use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/version", get(handle_version))
        .route("/diagnosis", post(handle_diagnosis).put(handle_diagnosis))
        .route("/list.json", get(handle_list))
        .route("/{file}", get(handle_package))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Errors
// ============================================================================

/// Request-scoped failures mapped to HTTP statuses. Build failures never
/// leak partial package bytes; the response is an error descriptor or a
/// plain 404.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    Param(String),

    #[error("Not Found")]
    NotFound,

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::Param(_) => (StatusCode::BAD_REQUEST, "param"),
            ApiError::NotFound => {
                return (StatusCode::NOT_FOUND, "Not Found").into_response();
            }
            ApiError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "data"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        let body = Json(json!({
            "error": kind,
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

// ============================================================================
// Submission payload
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DiagnosisSubmission {
    pub keys: Vec<SubmittedKey>,
    pub regions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedKey {
    /// Base64 of exactly 16 raw key bytes.
    pub key_data: String,
    pub rolling_start_number: u32,
    pub rolling_period: u32,
    pub transmission_risk: i32,
}

/// Decode and validate a submission at the boundary, so storage and the
/// export core only ever see well-formed records.
fn validate_submission(submission: DiagnosisSubmission) -> Result<(String, Vec<NewKey>), ApiError> {
    let Some(region) = submission.regions.into_iter().next() else {
        return Err(ApiError::Param("regions must not be empty".to_string()));
    };
    if submission.keys.is_empty() {
        return Err(ApiError::Param("keys must not be empty".to_string()));
    }

    let mut keys = Vec::with_capacity(submission.keys.len());
    for key in submission.keys {
        let key_data = BASE64
            .decode(&key.key_data)
            .map_err(|e| ApiError::Param(format!("keyData is not valid base64: {e}")))?;
        if key_data.len() != KEY_LENGTH {
            return Err(ApiError::Param(format!(
                "keyData must decode to {KEY_LENGTH} bytes, got {}",
                key_data.len()
            )));
        }
        keys.push(NewKey {
            key_data,
            rolling_start_interval_number: key.rolling_start_number,
            rolling_period: key.rolling_period,
            transmission_risk_level: key.transmission_risk,
        });
    }
    Ok((region, keys))
}

// ============================================================================
// Handlers
// ============================================================================

async fn handle_version() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}

async fn handle_diagnosis(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<DiagnosisSubmission>,
) -> Result<Json<Value>, ApiError> {
    let (region, keys) = validate_submission(submission)?;
    let created_at = Utc::now().timestamp();
    let package_id = state.store.insert_submission(&region, &keys, created_at)?;
    info!(package_id, keys = keys.len(), region = %region, "accepted submission");
    Ok(Json(json!({ "message": "Accepted." })))
}

async fn handle_list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let packages = state.store.list_packages()?;
    let entries: Vec<Value> = packages
        .iter()
        .map(|package| {
            json!({
                "region": package.region,
                "url": format!("{}/{}.zip", state.base_url, package.package_id),
                "created": package.created_at * 1000,
            })
        })
        .collect();
    Ok(Json(Value::Array(entries)))
}

async fn handle_package(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    let package_id = file
        .strip_suffix(".zip")
        .and_then(|stem| stem.parse::<i64>().ok())
        .ok_or(ApiError::NotFound)?;

    let Some(records) = state.store.fetch_package(package_id)? else {
        return Err(ApiError::NotFound);
    };

    // Window reference: the batch's creation time, read in this server's
    // timezone so the package covers the authority's reporting day.
    let reference = DateTime::<Utc>::from_timestamp(records[0].created_at, 0)
        .ok_or_else(|| ApiError::Internal("record timestamp out of range".to_string()))?
        .with_timezone(&Local);

    let package = state.signer.build_package(&records, &reference)?;
    info!(package_id, bytes = package.len(), "served export package");

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{package_id}.zip\""),
        ),
    ];
    Ok((headers, package).into_response())
}
