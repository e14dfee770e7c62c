use sqlx::PgPool;

use crate::models::{NewSubmission, Submission};

pub async fn create(pool: &PgPool, new: &NewSubmission) -> Result<Submission, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "INSERT INTO submissions (name, email_phone, message, date_time)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, email_phone, message, date_time",
    )
    .bind(&new.name)
    .bind(&new.email_phone)
    .bind(&new.message)
    .bind(&new.date_time)
    .fetch_one(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "SELECT id, name, email_phone, message, date_time FROM submissions
         ORDER BY seq ASC",
    )
    .fetch_all(pool)
    .await
}
