/// User profile handlers
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::{Role, UpdateUserRequest, UserDto};
use waggle_common::{Page, PageRequest};

/// Get a user profile by id
pub async fn get_user(pool: web::Data<PgPool>, user_id: web::Path<i64>) -> Result<HttpResponse> {
    let user = user_repo::find_by_id(pool.get_ref(), *user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no user with id {}", user_id)))?;

    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

/// Update profile fields
///
/// Email/username collisions with another user are rejected before the
/// update; the unique constraints stay authoritative under concurrency.
pub async fn update_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i64>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;
    let user_id = user_id.into_inner();

    if user_repo::email_taken_by_other(pool.get_ref(), &payload.email, user_id).await? {
        return Err(AppError::Validation(format!(
            "email {} belongs to another user",
            payload.email
        )));
    }
    if user_repo::username_taken_by_other(pool.get_ref(), &payload.username, user_id).await? {
        return Err(AppError::Validation(format!(
            "username {} belongs to another user",
            payload.username
        )));
    }

    let user = user_repo::update_profile(
        pool.get_ref(),
        user_id,
        &payload.email,
        &payload.username,
        &payload.name,
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("no user with id {user_id}")))?;

    Ok(HttpResponse::Created().json(UserDto::from(user)))
}

/// Existence probe consumed by post-service
pub async fn user_exists(pool: web::Data<PgPool>, user_id: web::Path<i64>) -> Result<HttpResponse> {
    let exists = user_repo::exists_by_id(pool.get_ref(), *user_id).await?;
    Ok(HttpResponse::Ok().json(exists))
}

/// Total user count
pub async fn user_count(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let count = user_repo::count(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(count))
}

#[derive(Debug, Deserialize)]
pub struct BlockQuery {
    pub reason: String,
}

/// Block a user, recording the reason
pub async fn block_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i64>,
    query: web::Query<BlockQuery>,
) -> Result<HttpResponse> {
    let blocked = user_repo::block(pool.get_ref(), *user_id, &query.reason).await?;
    if !blocked {
        return Err(AppError::NotFound(format!("no user with id {}", user_id)));
    }

    Ok(HttpResponse::Ok().finish())
}

/// Unblock a user
pub async fn unblock_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let unblocked = user_repo::unblock(pool.get_ref(), *user_id).await?;
    if !unblocked {
        return Err(AppError::NotFound(format!("no user with id {}", user_id)));
    }

    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub page_no: i64,
    pub page_size: i64,
    pub role: Option<String>,
}

/// Paginated user listing ordered by id, optionally filtered by role
pub async fn list_users(
    pool: web::Data<PgPool>,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse> {
    let page = PageRequest {
        page_no: query.page_no,
        page_size: query.page_size,
    };
    page.validate().map_err(AppError::BadRequest)?;

    let role = query.role.as_deref().map(Role::parse).transpose()?;

    let users = user_repo::list_page(pool.get_ref(), role, page.page_size, page.offset()).await?;
    let total = user_repo::count_listed(pool.get_ref(), role).await?;

    let envelope = Page::new(users, page.page_no, page.page_size, total).map(UserDto::from);

    Ok(HttpResponse::Ok().json(envelope))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// Search users by username or display name
pub async fn search_users(
    pool: web::Data<PgPool>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let users = user_repo::search(pool.get_ref(), &query.query).await?;
    let dtos: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();

    Ok(HttpResponse::Ok().json(dtos))
}
