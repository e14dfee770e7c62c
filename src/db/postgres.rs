use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{StoreError, SubmissionStore, submissions};
use crate::models::{NewSubmission, Submission};

#[derive(Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn create(&self, new: NewSubmission) -> Result<Submission, StoreError> {
        Ok(submissions::create(&self.pool, &new).await?)
    }

    async fn list_all(&self) -> Result<Vec<Submission>, StoreError> {
        Ok(submissions::list_all(&self.pool).await?)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

/// Open the pool and apply migrations.
pub async fn connect(database_url: &str) -> Result<PgSubmissionStore, String> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| format!("Failed to connect to database: {e}"))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| format!("Failed to run migrations: {e}"))?;

    tracing::info!("Migrations applied");

    Ok(PgSubmissionStore::new(pool))
}
