use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use chrono::Utc;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::models::Submission;
use crate::state::SharedState;
use crate::submission::pipeline;
use crate::submission::validate::{FIELDS_REQUIRED, FormPayload};

pub const SUBMITTED: &str = "Form submitted successfully!";
pub const SUBMITTED_WITH_SMS: &str = "Form submitted successfully and SMS notification sent!";

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let payload = decode_payload(&headers, &body)?;

    let result = pipeline::run(&state, payload, Utc::now()).await?;

    let message = if result.sms_sent {
        SUBMITTED_WITH_SMS
    } else {
        SUBMITTED
    };

    Ok(Json(json!({ "message": message })))
}

pub async fn display(State(state): State<SharedState>) -> Result<Json<Vec<Submission>>, AppError> {
    let submissions = state.store.list_all().await.map_err(AppError::Listing)?;
    Ok(Json(submissions))
}

/// A body that is absent, empty or not declared as JSON reads as an empty
/// form. A JSON body that is not an object carries no fields either.
fn decode_payload(headers: &HeaderMap, body: &[u8]) -> Result<FormPayload, AppError> {
    let is_json = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("json"));

    if !is_json || body.trim_ascii().is_empty() {
        return Ok(FormPayload::default());
    }

    match Json::<FormPayload>::from_bytes(body) {
        Ok(Json(payload)) => Ok(payload),
        Err(JsonRejection::JsonDataError(_)) => {
            Err(AppError::Validation(FIELDS_REQUIRED.to_string()))
        }
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}
