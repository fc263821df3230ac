/// Like handlers
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;

use crate::clients::UserDirectory;
use crate::error::Result;
use crate::kafka::EventProducer;
use crate::models::LikeRequest;
use crate::services::LikeService;

fn like_service(
    pool: &web::Data<PgPool>,
    users: &web::Data<Arc<dyn UserDirectory>>,
    notifier: &web::Data<EventProducer>,
) -> LikeService {
    LikeService::with_notifier(
        pool.get_ref().clone(),
        users.get_ref().clone(),
        notifier.get_ref().clone(),
    )
}

/// Like a post; a duplicate like is a no-op returning a null body
pub async fn create_like(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    match like_service(&pool, &users, &notifier).create_like(&req).await? {
        Some(like) => Ok(HttpResponse::Created().json(like)),
        None => Ok(HttpResponse::Ok().json(serde_json::Value::Null)),
    }
}

/// Get a like by ID
pub async fn get_like(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    like_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let like = like_service(&pool, &users, &notifier)
        .get_like(*like_id)
        .await?;

    Ok(HttpResponse::Ok().json(like))
}

/// Remove the like for (post, user)
pub async fn delete_like(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    like_service(&pool, &users, &notifier).delete_like(&req).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// All likes on a post, newest first
pub async fn likes_for_post(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let likes = like_service(&pool, &users, &notifier)
        .likes_for_post(*post_id)
        .await?;

    Ok(HttpResponse::Ok().json(likes))
}

/// Like count for a post
pub async fn like_count(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let count = like_service(&pool, &users, &notifier)
        .like_count(*post_id)
        .await?;

    Ok(HttpResponse::Ok().json(count))
}

/// Whether the user has liked the post
pub async fn is_user_liked(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    notifier: web::Data<EventProducer>,
    req: web::Query<LikeRequest>,
) -> Result<HttpResponse> {
    let liked = like_service(&pool, &users, &notifier)
        .is_user_liked(&req)
        .await?;

    Ok(HttpResponse::Ok().json(liked))
}
