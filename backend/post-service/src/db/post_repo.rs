/// Post repository
///
/// The filter queries mirror the service's decision table: each combination
/// of type and date predicate gets its own explicit statement, paired with a
/// count for the pagination envelope.
use crate::models::{Post, PostType};
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

const POST_COLUMNS: &str = "id, description, file_name, file_type, file_path, user_id, \
                            created_on, is_blocked, post_type, aspect_ratio";

/// Insert a new post
#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    description: &str,
    file_name: &str,
    file_type: &str,
    file_path: &str,
    user_id: i64,
    post_type: PostType,
    aspect_ratio: f64,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        INSERT INTO posts (description, file_name, file_type, file_path, user_id, post_type, aspect_ratio)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(description)
    .bind(file_name)
    .bind(file_type)
    .bind(file_path)
    .bind(user_id)
    .bind(post_type.as_str())
    .bind(aspect_ratio)
    .fetch_one(pool)
    .await
}

/// Find a post by ID
pub async fn find_by_id(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// Check whether a post exists
pub async fn exists_by_id(pool: &PgPool, post_id: i64) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1) AS found")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>("found"))
}

/// Hard delete; comments and likes go with the post via cascade
pub async fn delete(pool: &PgPool, post_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Update the description only
pub async fn update_description(
    pool: &PgPool,
    post_id: i64,
    description: &str,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        UPDATE posts SET description = $1 WHERE id = $2
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(description)
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Flip the block flag, touching nothing else
pub async fn set_blocked(
    pool: &PgPool,
    post_id: i64,
    blocked: bool,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        UPDATE posts SET is_blocked = $1 WHERE id = $2
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(blocked)
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Total post count
pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// One page of posts ordered by id
pub async fn list_page(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts ORDER BY id LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// A random page of posts for discovery surfaces
pub async fn random_page(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts ORDER BY RANDOM() LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Posts whose description contains the query, case-insensitive
pub async fn search_by_description(pool: &PgPool, query: &str) -> Result<Vec<Post>, sqlx::Error> {
    let pattern = format!("%{}%", query);

    sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE description ILIKE $1 ORDER BY id"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await
}

/// All posts by a user, newest first
pub async fn find_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1 ORDER BY created_on DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

// ============================================
// Filter queries (creation-time ascending)
// ============================================

/// Page of posts of one type
pub async fn find_by_type(
    pool: &PgPool,
    post_type: PostType,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS} FROM posts
        WHERE post_type = $1
        ORDER BY created_on ASC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(post_type.as_str())
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_by_type(pool: &PgPool, post_type: PostType) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts WHERE post_type = $1")
        .bind(post_type.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Page of posts created on one calendar day
pub async fn find_by_date(
    pool: &PgPool,
    day: NaiveDate,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS} FROM posts
        WHERE created_on::date = $1
        ORDER BY created_on ASC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(day)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_by_date(pool: &PgPool, day: NaiveDate) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM posts WHERE created_on::date = $1")
        .bind(day)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Page of posts created within an inclusive day range
pub async fn find_by_date_between(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS} FROM posts
        WHERE created_on::date >= $1 AND created_on::date <= $2
        ORDER BY created_on ASC
        LIMIT $3 OFFSET $4
        "#
    ))
    .bind(start)
    .bind(end)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_by_date_between(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS count FROM posts WHERE created_on::date >= $1 AND created_on::date <= $2",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Page of posts of one type created on one calendar day
pub async fn find_by_type_and_date(
    pool: &PgPool,
    post_type: PostType,
    day: NaiveDate,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS} FROM posts
        WHERE post_type = $1 AND created_on::date = $2
        ORDER BY created_on ASC
        LIMIT $3 OFFSET $4
        "#
    ))
    .bind(post_type.as_str())
    .bind(day)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_by_type_and_date(
    pool: &PgPool,
    post_type: PostType,
    day: NaiveDate,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS count FROM posts WHERE post_type = $1 AND created_on::date = $2",
    )
    .bind(post_type.as_str())
    .bind(day)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Page of posts of one type created within an inclusive day range
pub async fn find_by_type_and_date_between(
    pool: &PgPool,
    post_type: PostType,
    start: NaiveDate,
    end: NaiveDate,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(&format!(
        r#"
        SELECT {POST_COLUMNS} FROM posts
        WHERE post_type = $1 AND created_on::date >= $2 AND created_on::date <= $3
        ORDER BY created_on ASC
        LIMIT $4 OFFSET $5
        "#
    ))
    .bind(post_type.as_str())
    .bind(start)
    .bind(end)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_by_type_and_date_between(
    pool: &PgPool,
    post_type: PostType,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS count FROM posts WHERE post_type = $1 AND created_on::date >= $2 AND created_on::date <= $3",
    )
    .bind(post_type.as_str())
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}
