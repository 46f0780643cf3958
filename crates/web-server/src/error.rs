use acquisition::error::AcquisitionError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::CoreError;
use engine::EngineError;
use ranges::RangeError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Every failure is terminal for its request and yields a single
/// human-readable message; no partial results leave the server.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) | AppError::Range(_) => StatusCode::BAD_REQUEST,
            AppError::Engine(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Acquisition(err) => match err {
                AcquisitionError::NoData { .. } => StatusCode::NOT_FOUND,
                AcquisitionError::Provider { status: 404, .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            },
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
