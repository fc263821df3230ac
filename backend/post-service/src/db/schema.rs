use sqlx::PgPool;
use tracing::info;

/// Ensure the post-side tables exist.
///
/// `user_id` columns are soft references into user-service's database; no
/// foreign key crosses the service boundary. The unique index on
/// (post_id, user_id) makes like creation race-free.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring post-service tables exist");

    sqlx::query(POSTS_TABLE).execute(pool).await?;
    sqlx::query(COMMENTS_TABLE).execute(pool).await?;
    sqlx::query(LIKES_TABLE).execute(pool).await?;

    Ok(())
}

const POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id BIGSERIAL PRIMARY KEY,
    description TEXT NOT NULL,
    file_name TEXT NOT NULL,
    file_type TEXT NOT NULL,
    file_path TEXT NOT NULL,
    user_id BIGINT NOT NULL,
    created_on TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    is_blocked BOOLEAN NOT NULL DEFAULT FALSE,
    post_type TEXT NOT NULL,
    aspect_ratio DOUBLE PRECISION NOT NULL
)
"#;

const COMMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id BIGSERIAL PRIMARY KEY,
    comment TEXT NOT NULL,
    commented_on TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    user_id BIGINT NOT NULL,
    is_blocked BOOLEAN NOT NULL DEFAULT FALSE,
    post_id BIGINT NOT NULL REFERENCES posts(id) ON DELETE CASCADE
)
"#;

const LIKES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS likes (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL,
    liked_on TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    post_id BIGINT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    UNIQUE (post_id, user_id)
)
"#;
