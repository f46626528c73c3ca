use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    token_hash: &str,
    scope: &str,
    expiry: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO tokens (hash, user_id, expiry, scope)
         VALUES (?, ?, ?, ?)",
    )
    .bind(token_hash)
    .bind(user_id)
    .bind(expiry)
    .bind(scope)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_all_for_user(
    pool: &SqlitePool,
    scope: &str,
    user_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM tokens WHERE scope = ? AND user_id = ?")
        .bind(scope)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
