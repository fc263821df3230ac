/// Comment handlers
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;

use crate::clients::UserDirectory;
use crate::error::Result;
use crate::kafka::EventProducer;
use crate::models::CommentRequest;
use crate::services::CommentService;

fn comment_service(
    pool: &web::Data<PgPool>,
    users: &web::Data<Arc<dyn UserDirectory>>,
    notifier: &web::Data<EventProducer>,
) -> CommentService {
    CommentService::with_notifier(
        pool.get_ref().clone(),
        users.get_ref().clone(),
        notifier.get_ref().clone(),
    )
}

/// Create a comment and notify the post owner
pub async fn create_comment(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let comment = comment_service(&pool, &users, &notifier)
        .create_comment(&req)
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Get a comment by ID
pub async fn get_comment(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let comment = comment_service(&pool, &users, &notifier)
        .get_comment(*comment_id)
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Hard delete a comment
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    comment_service(&pool, &users, &notifier)
        .delete_comment(*comment_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// All comments on a post, newest first
pub async fn comments_for_post(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let comments = comment_service(&pool, &users, &notifier)
        .comments_for_post(*post_id)
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Comment count for a post
pub async fn comment_count(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let count = comment_service(&pool, &users, &notifier)
        .comment_count(*post_id)
        .await?;

    Ok(HttpResponse::Ok().json(count))
}

/// Block a comment
pub async fn block_comment(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let comment = comment_service(&pool, &users, &notifier)
        .set_blocked(*comment_id, true)
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// Unblock a comment
pub async fn unblock_comment(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    comment_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let comment = comment_service(&pool, &users, &notifier)
        .set_blocked(*comment_id, false)
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}
