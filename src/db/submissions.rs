use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::Submission;

pub async fn create(
    pool: &SqlitePool,
    category: &str,
    text: &str,
) -> Result<Submission, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "INSERT INTO submissions (created_at, category, text)
         VALUES (?, ?, ?) RETURNING *",
    )
    .bind(Utc::now())
    .bind(category)
    .bind(text)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct ListFilters {
    pub category: String,
    pub text: String,
}

/// List submissions, optionally narrowed by category/text substring. Empty
/// filter strings match everything.
pub async fn list(
    pool: &SqlitePool,
    filters: &ListFilters,
) -> Result<Vec<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "SELECT id, created_at, category, text, version
         FROM submissions
         WHERE (category LIKE '%' || ?1 || '%' OR ?1 = '')
           AND (text LIKE '%' || ?2 || '%' OR ?2 = '')
         ORDER BY id ASC",
    )
    .bind(&filters.category)
    .bind(&filters.text)
    .fetch_all(pool)
    .await
}

/// Full update guarded by the row version. Returns the updated row, or None
/// when the version no longer matches (or the row is gone).
pub async fn update(
    pool: &SqlitePool,
    submission: &Submission,
) -> Result<Option<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "UPDATE submissions
         SET category = ?, text = ?, version = version + 1
         WHERE id = ? AND version = ?
         RETURNING *",
    )
    .bind(&submission.category)
    .bind(&submission.text)
    .bind(submission.id)
    .bind(submission.version)
    .fetch_optional(pool)
    .await
}

/// Returns the number of rows removed (0 when the id did not exist).
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM submissions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
