use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mcpdex_core::DirectoryError;
use serde_json::json;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

const ENRICHMENT_FAILED: &str = "Failed to generate description";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug)]
pub enum AppError {
    Directory(DirectoryError),
    Body(JsonRejection),
}

impl From<DirectoryError> for AppError {
    fn from(error: DirectoryError) -> Self {
        AppError::Directory(error)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Body(rejection)
    }
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Directory(DirectoryError::InvalidArgument(message)) => {
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Directory(DirectoryError::NotFound(message)) => {
                (StatusCode::NOT_FOUND, message)
            }
            AppError::Directory(DirectoryError::Enrichment(source)) => {
                error!(error = %source, "Description generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ENRICHMENT_FAILED.to_string())
            }
            AppError::Directory(other) => {
                error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            AppError::Body(rejection) => (rejection.status(), rejection.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
