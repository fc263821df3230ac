/// Like repository
///
/// The unique index on (post_id, user_id) makes `create` atomic: a duplicate
/// like hits the conflict clause and returns no row instead of racing a
/// separate existence check.
use crate::models::Like;
use sqlx::{PgPool, Row};

const LIKE_COLUMNS: &str = "id, user_id, liked_on, post_id";

/// Insert a like; returns None if (post, user) already has one
pub async fn create(
    pool: &PgPool,
    post_id: i64,
    user_id: i64,
) -> Result<Option<Like>, sqlx::Error> {
    sqlx::query_as::<_, Like>(&format!(
        r#"
        INSERT INTO likes (post_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (post_id, user_id) DO NOTHING
        RETURNING {LIKE_COLUMNS}
        "#
    ))
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Find a like by ID
pub async fn find_by_id(pool: &PgPool, like_id: i64) -> Result<Option<Like>, sqlx::Error> {
    sqlx::query_as::<_, Like>(&format!("SELECT {LIKE_COLUMNS} FROM likes WHERE id = $1"))
        .bind(like_id)
        .fetch_optional(pool)
        .await
}

/// Delete the like for (post, user)
pub async fn delete_by_post_and_user(
    pool: &PgPool,
    post_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// All likes on a post, newest first
pub async fn find_by_post(pool: &PgPool, post_id: i64) -> Result<Vec<Like>, sqlx::Error> {
    sqlx::query_as::<_, Like>(&format!(
        r#"
        SELECT {LIKE_COLUMNS} FROM likes
        WHERE post_id = $1
        ORDER BY liked_on DESC
        "#
    ))
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Like count for a post
pub async fn count_by_post(pool: &PgPool, post_id: i64) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Whether (post, user) has a like
pub async fn exists_by_post_and_user(
    pool: &PgPool,
    post_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE post_id = $1 AND user_id = $2) AS found",
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<bool, _>("found"))
}
