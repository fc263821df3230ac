use sqlx::PgPool;
use tracing::info;

/// Ensure the `users` table exists.
///
/// The table is shared with user-service; both services ensure it lazily at
/// startup so either can boot first on a fresh database.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring users table exists");
    sqlx::query(USERS_TABLE).execute(pool).await?;
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
