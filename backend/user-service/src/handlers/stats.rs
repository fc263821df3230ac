/// Registration statistics handler
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::user_repo;
use crate::error::Result;
use crate::services::stats::{resolve_range, StatsPeriod};

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub filter_by: String,
}

/// Registrations per day since the start of the requested period
pub async fn registration_stats(
    pool: web::Data<PgPool>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse> {
    let period = StatsPeriod::parse(&query.filter_by)?;
    let (start, end) = resolve_range(period, Utc::now().date_naive())?;

    let counts = user_repo::count_registrations_by_day(pool.get_ref(), start, end).await?;

    Ok(HttpResponse::Ok().json(counts))
}
