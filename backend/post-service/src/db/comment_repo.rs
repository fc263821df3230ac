/// Comment repository
use crate::models::Comment;
use sqlx::{PgPool, Row};

const COMMENT_COLUMNS: &str = "id, comment, commented_on, user_id, is_blocked, post_id";

/// Insert a new comment on a post
pub async fn create(
    pool: &PgPool,
    post_id: i64,
    user_id: i64,
    comment: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        r#"
        INSERT INTO comments (comment, user_id, post_id)
        VALUES ($1, $2, $3)
        RETURNING {COMMENT_COLUMNS}
        "#
    ))
    .bind(comment)
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await
}

/// Find a comment by ID
pub async fn find_by_id(pool: &PgPool, comment_id: i64) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
    ))
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}

/// Hard delete a comment
pub async fn delete(pool: &PgPool, comment_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// All comments on a post, newest first
pub async fn find_by_post(pool: &PgPool, post_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        r#"
        SELECT {COMMENT_COLUMNS} FROM comments
        WHERE post_id = $1
        ORDER BY commented_on DESC
        "#
    ))
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// Comment count for a post
pub async fn count_by_post(pool: &PgPool, post_id: i64) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Flip the block flag, returning the updated row if the comment exists
pub async fn set_blocked(
    pool: &PgPool,
    comment_id: i64,
    blocked: bool,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        r#"
        UPDATE comments SET is_blocked = $1 WHERE id = $2
        RETURNING {COMMENT_COLUMNS}
        "#
    ))
    .bind(blocked)
    .bind(comment_id)
    .fetch_optional(pool)
    .await
}
