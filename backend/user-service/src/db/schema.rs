use sqlx::PgPool;
use tracing::info;

/// Ensure the user-side tables exist.
///
/// `users` is shared with auth-service; both services ensure it lazily at
/// startup so either can boot first on a fresh database.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring user-service tables exist");

    sqlx::query(USERS_TABLE).execute(pool).await?;
    sqlx::query(USER_IMAGES_TABLE).execute(pool).await?;
    sqlx::query(FRIENDSHIPS_TABLE).execute(pool).await?;
    sqlx::query(COMPLAINTS_TABLE).execute(pool).await?;

    Ok(())
}

const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'USER',
    is_blocked BOOLEAN NOT NULL DEFAULT FALSE,
    blocked_reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const USER_IMAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS user_images (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    image_type TEXT NOT NULL,
    file_name TEXT NOT NULL,
    file_type TEXT NOT NULL,
    file_path TEXT NOT NULL,
    uploaded_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (user_id, image_type)
)
"#;

const FRIENDSHIPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS friendships (
    user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    friend_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (user_id, friend_id)
)
"#;

const COMPLAINTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS complaints (
    id BIGSERIAL PRIMARY KEY,
    reporter_id BIGINT NOT NULL,
    reported_id BIGINT NOT NULL,
    reason TEXT NOT NULL,
    filed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;
