/// Friendship repository
///
/// Friendship is symmetric; both directions are stored so the id-list read
/// stays a single indexed lookup.
use sqlx::{PgPool, Row};

/// Create a friendship pair. Re-adding an existing friend is a no-op.
pub async fn add(pool: &PgPool, user_id: i64, friend_id: i64) -> Result<(), sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO friendships (user_id, friend_id)
        VALUES ($1, $2), ($2, $1)
        ON CONFLICT (user_id, friend_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(friend_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        tracing::debug!(user_id, friend_id, "friendship already exists");
    }

    Ok(())
}

/// Remove a friendship pair in both directions
pub async fn remove(pool: &PgPool, user_id: i64, friend_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM friendships
        WHERE (user_id = $1 AND friend_id = $2) OR (user_id = $2 AND friend_id = $1)
        "#,
    )
    .bind(user_id)
    .bind(friend_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Friend ids for a user, ascending
pub async fn friend_ids(pool: &PgPool, user_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT friend_id FROM friendships WHERE user_id = $1 ORDER BY friend_id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| row.get::<i64, _>("friend_id"))
        .collect())
}
