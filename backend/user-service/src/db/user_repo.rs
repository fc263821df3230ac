/// User repository - profile-side queries against the shared `users` table
use crate::models::{Role, User};
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;

const USER_COLUMNS: &str = "id, email, username, name, password_hash, role, is_blocked, \
                            blocked_reason, created_at, updated_at";

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Check whether a user exists
pub async fn exists_by_id(pool: &PgPool, user_id: i64) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1) AS found")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>("found"))
}

/// Total user count
pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Whether another user already holds this email
pub async fn email_taken_by_other(
    pool: &PgPool,
    email: &str,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2) AS taken",
    )
    .bind(email.to_lowercase())
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<bool, _>("taken"))
}

/// Whether another user already holds this username
pub async fn username_taken_by_other(
    pool: &PgPool,
    username: &str,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND id <> $2) AS taken",
    )
    .bind(username)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<bool, _>("taken"))
}

/// Update profile fields, returning the updated row if the user exists
pub async fn update_profile(
    pool: &PgPool,
    user_id: i64,
    email: &str,
    username: &str,
    name: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET email = $1, username = $2, name = $3, updated_at = NOW()
        WHERE id = $4
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(email.to_lowercase())
    .bind(username)
    .bind(name)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Block a user, recording the reason
pub async fn block(pool: &PgPool, user_id: i64, reason: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET is_blocked = TRUE, blocked_reason = $1, updated_at = NOW() WHERE id = $2",
    )
    .bind(reason)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Unblock a user and clear the recorded reason
pub async fn unblock(pool: &PgPool, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET is_blocked = FALSE, blocked_reason = NULL, updated_at = NOW() WHERE id = $1",
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// One page of users ordered by id, optionally filtered by role
pub async fn list_page(
    pool: &PgPool,
    role: Option<Role>,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    match role {
        Some(role) => {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY id LIMIT $2 OFFSET $3"
            ))
            .bind(role.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
        }
    }
}

/// Count matching rows for [`list_page`]
pub async fn count_listed(pool: &PgPool, role: Option<Role>) -> Result<i64, sqlx::Error> {
    let row = match role {
        Some(role) => {
            sqlx::query("SELECT COUNT(*) AS count FROM users WHERE role = $1")
                .bind(role.as_str())
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query("SELECT COUNT(*) AS count FROM users")
                .fetch_one(pool)
                .await?
        }
    };

    Ok(row.get::<i64, _>("count"))
}

/// Users whose username or display name contains the query, case-insensitive
pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<User>, sqlx::Error> {
    let pattern = format!("%{}%", query);

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE username ILIKE $1 OR name ILIKE $1
        ORDER BY id
        "#
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await
}

/// Registrations per calendar day over an inclusive date range
pub async fn count_registrations_by_day(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BTreeMap<String, i64>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT created_at::date AS day, COUNT(*) AS count
        FROM users
        WHERE created_at::date >= $1 AND created_at::date <= $2
        GROUP BY day
        ORDER BY day
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    let counts = rows
        .into_iter()
        .map(|row| {
            let day: NaiveDate = row.get("day");
            let count: i64 = row.get("count");
            (day.to_string(), count)
        })
        .collect();

    Ok(counts)
}
