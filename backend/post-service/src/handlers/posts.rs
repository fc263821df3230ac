/// Post handlers
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt as _;
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;

use crate::clients::UserDirectory;
use crate::error::{AppError, Result};
use crate::models::{CreatePostRequest, PostFilterRequest, UpdatePostRequest};
use crate::services::{FileUpload, MediaStore, PostService};
use waggle_common::PageRequest;

fn post_service(
    pool: &web::Data<PgPool>,
    users: &web::Data<Arc<dyn UserDirectory>>,
    store: &web::Data<MediaStore>,
) -> PostService {
    PostService::new(
        pool.get_ref().clone(),
        users.get_ref().clone(),
        store.get_ref().clone(),
    )
}

/// Create a post with media (multipart fields: `file`, `meta`)
pub async fn create_post(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let mut file_bytes = Vec::new();
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut meta_raw = String::new();

    while let Some(field) = payload.next().await {
        let mut field =
            field.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;

        let field_name = field.name().to_string();
        match field_name.as_str() {
            "file" => {
                file_name = field
                    .content_disposition()
                    .get_filename()
                    .map(|s| s.to_string());
                content_type = Some(field.content_type().to_string());

                while let Some(chunk) = field.next().await {
                    let data = chunk
                        .map_err(|e| AppError::BadRequest(format!("File read error: {}", e)))?;
                    file_bytes.extend_from_slice(&data);
                }
            }
            "meta" => {
                while let Some(chunk) = field.next().await {
                    let data = chunk
                        .map_err(|e| AppError::BadRequest(format!("Meta read error: {}", e)))?;
                    meta_raw.push_str(&String::from_utf8_lossy(&data));
                }
            }
            _ => {}
        }
    }

    if file_bytes.is_empty() {
        return Err(AppError::BadRequest("no file data provided".to_string()));
    }
    let meta: CreatePostRequest = serde_json::from_str(&meta_raw)
        .map_err(|e| AppError::BadRequest(format!("invalid meta payload: {e}")))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("file field is missing a filename".to_string()))?;

    let upload = FileUpload {
        file_name,
        content_type: content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
        bytes: file_bytes,
    };

    let post = post_service(&pool, &users, &store)
        .create_post(Some(upload), &meta)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Create a text-only post (JSON body)
pub async fn create_text_post(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let post = post_service(&pool, &users, &store)
        .create_post(None, &req)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID
pub async fn get_post(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let post = post_service(&pool, &users, &store).get_post(*post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Download the stored media file of a post
pub async fn get_post_file(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let (file_type, bytes) = post_service(&pool, &users, &store)
        .get_post_file(*post_id)
        .await?;

    Ok(HttpResponse::Ok().content_type(file_type).body(bytes))
}

/// Paginated listing ordered by id
pub async fn list_posts(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse> {
    let envelope = post_service(&pool, &users, &store).list(*page).await?;
    Ok(HttpResponse::Ok().json(envelope))
}

/// A random page of posts for discovery surfaces
pub async fn random_posts(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    page: web::Query<PageRequest>,
) -> Result<HttpResponse> {
    let posts = post_service(&pool, &users, &store).random(*page).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Total post count
pub async fn post_count(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
) -> Result<HttpResponse> {
    let count = post_service(&pool, &users, &store).count().await?;
    Ok(HttpResponse::Ok().json(count))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// Search posts by description
pub async fn search_posts(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let posts = post_service(&pool, &users, &store)
        .search(&query.query)
        .await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// All posts of one user, newest first
pub async fn user_posts(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let posts = post_service(&pool, &users, &store)
        .user_posts(*user_id)
        .await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Posts of the user's friends (feed assembly not implemented; empty list)
pub async fn friends_posts(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let posts = post_service(&pool, &users, &store)
        .posts_for_friends(*user_id)
        .await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Filtered, paginated listing per the date/type decision table
pub async fn filter_posts(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    req: web::Json<PostFilterRequest>,
) -> Result<HttpResponse> {
    let envelope = post_service(&pool, &users, &store).filter(&req).await?;
    Ok(HttpResponse::Ok().json(envelope))
}

/// Update the description of a post
pub async fn update_post(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    post_id: web::Path<i64>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let post = post_service(&pool, &users, &store)
        .update_description(*post_id, &req)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Block a post
pub async fn block_post(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let post = post_service(&pool, &users, &store)
        .set_blocked(*post_id, true)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Unblock a post
pub async fn unblock_post(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let post = post_service(&pool, &users, &store)
        .set_blocked(*post_id, false)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Hard delete a post
pub async fn delete_post(
    pool: web::Data<PgPool>,
    users: web::Data<Arc<dyn UserDirectory>>,
    store: web::Data<MediaStore>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    post_service(&pool, &users, &store).delete(*post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
