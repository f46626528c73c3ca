use sqlx::SqlitePool;

pub async fn get_all_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT p.code
         FROM permissions p
         INNER JOIN users_permissions up ON up.permission_id = p.id
         WHERE up.user_id = ?",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn add_for_user(pool: &SqlitePool, user_id: i64, code: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users_permissions (user_id, permission_id)
         SELECT ?, id FROM permissions WHERE code = ?
         ON CONFLICT DO NOTHING",
    )
    .bind(user_id)
    .bind(code)
    .execute(pool)
    .await?;
    Ok(())
}
