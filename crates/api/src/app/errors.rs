use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use warehouse_infra::WarehouseError;

/// Infrastructure or validation failure surfaced by a handler.
///
/// Running out of stock is not an error; handlers answer those with 400 and a
/// plain message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Warehouse(#[from] WarehouseError),
    #[error("background task failed: {0}")]
    Task(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Warehouse(e) => warehouse_error_to_response(e),
            ApiError::Task(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        }
    }
}

pub fn warehouse_error_to_response(err: WarehouseError) -> axum::response::Response {
    match err {
        WarehouseError::Import(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "import_failed", e.to_string())
        }
        WarehouseError::Mutation(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "mutation_failed", e.to_string())
        }
        e @ WarehouseError::Diverged { .. } => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "mutation_failed", e.to_string())
        }
        WarehouseError::Domain(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        e @ WarehouseError::LockPoisoned(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
