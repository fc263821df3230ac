/// Complaint (user report) repository
use crate::models::Complaint;
use sqlx::{PgPool, Row};

/// File a new complaint
pub async fn create(
    pool: &PgPool,
    reporter_id: i64,
    reported_id: i64,
    reason: &str,
) -> Result<Complaint, sqlx::Error> {
    sqlx::query_as::<_, Complaint>(
        r#"
        INSERT INTO complaints (reporter_id, reported_id, reason)
        VALUES ($1, $2, $3)
        RETURNING id, reporter_id, reported_id, reason, filed_at
        "#,
    )
    .bind(reporter_id)
    .bind(reported_id)
    .bind(reason)
    .fetch_one(pool)
    .await
}

/// One page of complaints, newest first
pub async fn list_page(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Complaint>, sqlx::Error> {
    sqlx::query_as::<_, Complaint>(
        r#"
        SELECT id, reporter_id, reported_id, reason, filed_at
        FROM complaints
        ORDER BY filed_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Total complaint count
pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM complaints")
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}
