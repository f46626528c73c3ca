use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::User;

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (created_at, name, email, password_hash, activated)
         VALUES (?, ?, ?, ?, 0) RETURNING *",
    )
    .bind(Utc::now())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Resolve the user holding an unexpired token with the given scope. The
/// caller passes the SHA-256 hash of the plaintext, never the plaintext.
pub async fn find_for_token(
    pool: &SqlitePool,
    scope: &str,
    token_hash: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT u.id, u.created_at, u.name, u.email, u.password_hash, u.activated, u.version
         FROM users u
         INNER JOIN tokens t ON t.user_id = u.id
         WHERE t.hash = ? AND t.scope = ? AND t.expiry > ?",
    )
    .bind(token_hash)
    .bind(scope)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

/// Full update guarded by the row version. Returns the updated row, or None
/// when the version no longer matches.
pub async fn update(pool: &SqlitePool, user: &User) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users
         SET name = ?, email = ?, password_hash = ?, activated = ?, version = version + 1
         WHERE id = ? AND version = ?
         RETURNING *",
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.activated)
    .bind(user.id)
    .bind(user.version)
    .fetch_optional(pool)
    .await
}
