use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::db::StoreError;

pub const SUBMIT_FAILED: &str = "An error occurred. Please try again.";

#[derive(Debug)]
pub enum AppError {
    /// A required form field is missing or empty.
    Validation(String),
    /// The request body could not be decoded.
    BadRequest(String),
    /// Writing a submission failed.
    Persistence(StoreError),
    /// Reading submissions failed. Reported as plain text.
    Listing(StoreError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Persistence(err) => write!(f, "Persistence Error: {err}"),
            AppError::Listing(err) => write!(f, "Listing Error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Persistence(err) => {
                tracing::error!("Error saving form submission: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, SUBMIT_FAILED.to_string())
            }
            AppError::Listing(err) => {
                tracing::error!("Error fetching submissions: {err}");
                return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response();
            }
        };

        let body = json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}
