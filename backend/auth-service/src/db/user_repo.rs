/// User repository - credential-side queries against the shared `users` table
use crate::models::User;
use sqlx::{PgPool, Row};

/// Insert a new user with role USER
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    username: &str,
    name: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, username, name, password_hash, role)
        VALUES ($1, $2, $3, $4, 'USER')
        RETURNING id, email, username, name, password_hash, role, is_blocked, blocked_reason,
                  created_at, updated_at
        "#,
    )
    .bind(email.to_lowercase())
    .bind(username)
    .bind(name)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

/// Find a user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, username, name, password_hash, role, is_blocked, blocked_reason,
               created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email.to_lowercase())
    .fetch_optional(pool)
    .await
}

/// Check whether an email is already registered
pub async fn exists_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS taken")
        .bind(email.to_lowercase())
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>("taken"))
}

/// Check whether a username is already registered
pub async fn exists_by_username(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1) AS taken")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>("taken"))
}
