use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, SubmissionStore};
use crate::models::{NewSubmission, Submission};

/// Process-local store. Contents are lost on restart.
#[derive(Default, Clone)]
pub struct InMemorySubmissionStore {
    submissions: Arc<RwLock<Vec<Submission>>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.submissions.read().await.len()
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn create(&self, new: NewSubmission) -> Result<Submission, StoreError> {
        let submission = new.into_submission(Uuid::now_v7());
        self.submissions.write().await.push(submission.clone());
        Ok(submission)
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        Ok(self.submissions.read().await.clone())
    }
}
