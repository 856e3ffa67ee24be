use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::upstream::UpstreamError;

/// Message returned to clients for any upstream failure. Detail stays in logs.
pub const UPSTREAM_FAILURE: &str = "failed to fetch product data";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("request body must be JSON (content-type: application/json)")]
    UnsupportedMediaType,

    #[error("upstream request failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn item_not_found(id: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!("item {} not found", id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(errors) => json!({ "errors": errors }),
            AppError::Upstream(err) => {
                warn!(error = %err, "Upstream product API call failed");
                json!({ "error": UPSTREAM_FAILURE })
            }
            AppError::Internal(err) => {
                error!(error = ?err, "Internal error");
                json!({ "error": "internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
