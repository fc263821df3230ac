/// Friendship handlers
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::{friend_repo, user_repo};
use crate::error::{AppError, Result};

/// Add a friend (idempotent)
pub async fn add_friend(
    pool: web::Data<PgPool>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (user_id, friend_id) = path.into_inner();

    if user_id == friend_id {
        return Err(AppError::BadRequest(
            "cannot add yourself as a friend".to_string(),
        ));
    }
    for id in [user_id, friend_id] {
        if !user_repo::exists_by_id(pool.get_ref(), id).await? {
            return Err(AppError::NotFound(format!("no user with id {id}")));
        }
    }

    friend_repo::add(pool.get_ref(), user_id, friend_id).await?;

    Ok(HttpResponse::Created().finish())
}

/// Remove a friend
pub async fn remove_friend(
    pool: web::Data<PgPool>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (user_id, friend_id) = path.into_inner();

    let removed = friend_repo::remove(pool.get_ref(), user_id, friend_id).await?;
    if !removed {
        return Err(AppError::NotFound(format!(
            "no friendship between {user_id} and {friend_id}"
        )));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Friend-id list consumed by post-service
pub async fn friend_ids(pool: web::Data<PgPool>, user_id: web::Path<i64>) -> Result<HttpResponse> {
    let user_id = user_id.into_inner();

    if !user_repo::exists_by_id(pool.get_ref(), user_id).await? {
        return Err(AppError::NotFound(format!("no user with id {user_id}")));
    }

    let ids = friend_repo::friend_ids(pool.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(ids))
}
