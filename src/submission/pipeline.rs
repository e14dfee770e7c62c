use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{NewSubmission, Submission};
use crate::notify::Sms;
use crate::state::AppState;

use super::timestamp;
use super::validate::{self, FormPayload};

pub struct PipelineResult {
    pub submission: Submission,
    pub sms_sent: bool,
}

/// Validate, persist, then alert. The alert is best-effort: once the
/// submission is stored the result is a success regardless of the send.
pub async fn run(
    state: &AppState,
    payload: FormPayload,
    now: DateTime<Utc>,
) -> Result<PipelineResult, AppError> {
    let form = validate::validate(payload).map_err(|msg| AppError::Validation(msg.to_string()))?;

    let new = NewSubmission {
        name: form.name,
        email_phone: form.email_phone,
        message: form.message,
        date_time: timestamp::format_display(now, state.config.display_offset),
    };

    let submission = state
        .store
        .create(new)
        .await
        .map_err(AppError::Persistence)?;

    tracing::info!(id = %submission.id, "Form submission stored");

    let sms_sent = notify(state, &submission).await;

    Ok(PipelineResult {
        submission,
        sms_sent,
    })
}

async fn notify(state: &AppState, submission: &Submission) -> bool {
    let Some((from, to)) = state.notifier.route() else {
        return false;
    };

    let sms = Sms::for_submission(to, from, &submission.name, &submission.message);
    match state.notifier.send(&sms).await {
        Ok(()) => {
            tracing::info!(id = %submission.id, "SMS notification sent");
            true
        }
        Err(e) => {
            tracing::warn!(id = %submission.id, "Failed to send SMS notification: {e}");
            false
        }
    }
}
