pub mod memory;
pub mod postgres;
pub mod submissions;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, StoreKind};
use crate::models::{NewSubmission, Submission};

pub use memory::InMemorySubmissionStore;
pub use postgres::PgSubmissionStore;

#[derive(Debug)]
pub enum StoreError {
    /// No connection to the store was established at startup.
    Unavailable,
    Database(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "Store is not connected"),
            StoreError::Database(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Unavailable => None,
            StoreError::Database(err) => Some(err),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Durable, append-only storage for submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a submission and return it with its assigned id.
    async fn create(&self, new: NewSubmission) -> Result<Submission, StoreError>;

    /// Every stored submission in insertion order.
    async fn list_all(&self) -> Result<Vec<Submission>, StoreError>;

    /// Release the underlying connection. Called once at shutdown.
    async fn close(&self) {}
}

/// Stand-in used when the startup connect step did not complete.
pub struct DisconnectedStore;

#[async_trait]
impl SubmissionStore for DisconnectedStore {
    async fn create(&self, _new: NewSubmission) -> Result<Submission, StoreError> {
        Err(StoreError::Unavailable)
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        Err(StoreError::Unavailable)
    }
}

/// Pick the store for this process. A missing or unreachable database is
/// logged and replaced by [`DisconnectedStore`] so the server still starts.
pub async fn open(config: &Config) -> Arc<dyn SubmissionStore> {
    if config.store == StoreKind::Memory {
        tracing::warn!("Using in-memory store; submissions will not survive a restart");
        return Arc::new(InMemorySubmissionStore::new());
    }

    let Some(url) = config.database_url.as_deref() else {
        tracing::error!("DATABASE_URL is not set; submissions cannot be stored");
        return Arc::new(DisconnectedStore);
    };

    match postgres::connect(url).await {
        Ok(store) => {
            tracing::info!("Connected to database");
            Arc::new(store)
        }
        Err(e) => {
            tracing::error!("{e}");
            Arc::new(DisconnectedStore)
        }
    }
}
