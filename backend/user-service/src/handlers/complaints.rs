/// Complaint (user report) handlers
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::db::{complaint_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{ComplaintDto, ComplaintRequest};
use waggle_common::{Page, PageRequest};

/// File a complaint against a user
pub async fn file_complaint(
    pool: web::Data<PgPool>,
    payload: web::Json<ComplaintRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    if !user_repo::exists_by_id(pool.get_ref(), payload.reported_id).await? {
        return Err(AppError::BadRequest(format!(
            "reported user {} does not exist",
            payload.reported_id
        )));
    }

    let complaint = complaint_repo::create(
        pool.get_ref(),
        payload.reporter_id,
        payload.reported_id,
        &payload.reason,
    )
    .await?;

    tracing::info!(
        reporter_id = payload.reporter_id,
        reported_id = payload.reported_id,
        "complaint filed"
    );

    Ok(HttpResponse::Created().json(ComplaintDto::from(complaint)))
}

/// Paginated complaint listing, newest first
pub async fn list_complaints(
    pool: web::Data<PgPool>,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse> {
    page.validate().map_err(AppError::BadRequest)?;

    let complaints =
        complaint_repo::list_page(pool.get_ref(), page.page_size, page.offset()).await?;
    let total = complaint_repo::count(pool.get_ref()).await?;

    let envelope =
        Page::new(complaints, page.page_no, page.page_size, total).map(ComplaintDto::from);

    Ok(HttpResponse::Ok().json(envelope))
}
