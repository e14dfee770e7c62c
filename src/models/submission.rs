use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored contact-form submission as returned by `GET /Display`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "emailPhone")]
    pub email_phone: String,
    pub message: String,
    #[serde(rename = "dateTime")]
    pub date_time: String,
}

/// A validated submission that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub name: String,
    pub email_phone: String,
    pub message: String,
    pub date_time: String,
}

impl NewSubmission {
    pub fn into_submission(self, id: Uuid) -> Submission {
        Submission {
            id,
            name: self.name,
            email_phone: self.email_phone,
            message: self.message,
            date_time: self.date_time,
        }
    }
}
