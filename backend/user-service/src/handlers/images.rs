/// Profile image handlers
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt as _;
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::{image_repo, user_repo};
use crate::error::{AppError, Result};
use crate::models::{ImageDto, ImageType};
use crate::services::MediaStore;

/// Upload or replace a profile image (multipart fields: `image`, `type`)
pub async fn upload_image(
    pool: web::Data<PgPool>,
    store: web::Data<MediaStore>,
    user_id: web::Path<i64>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let user_id = user_id.into_inner();

    if !user_repo::exists_by_id(pool.get_ref(), user_id).await? {
        return Err(AppError::NotFound(format!("no user with id {user_id}")));
    }

    let mut image_bytes = Vec::new();
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut type_field = String::new();

    while let Some(field) = payload.next().await {
        let mut field =
            field.map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?;

        let field_name = field.name().to_string();
        match field_name.as_str() {
            "image" => {
                file_name = field
                    .content_disposition()
                    .get_filename()
                    .map(|s| s.to_string());
                content_type = Some(field.content_type().to_string());

                while let Some(chunk) = field.next().await {
                    let data = chunk
                        .map_err(|e| AppError::BadRequest(format!("Image read error: {}", e)))?;
                    image_bytes.extend_from_slice(&data);
                }
            }
            "type" => {
                while let Some(chunk) = field.next().await {
                    let data = chunk
                        .map_err(|e| AppError::BadRequest(format!("Type read error: {}", e)))?;
                    type_field.push_str(&String::from_utf8_lossy(&data));
                }
            }
            _ => {}
        }
    }

    if image_bytes.is_empty() {
        return Err(AppError::BadRequest("no image data provided".to_string()));
    }
    let image_type = ImageType::parse(type_field.trim())?;
    let file_name = file_name.ok_or_else(|| {
        AppError::BadRequest("image field is missing a filename".to_string())
    })?;
    let content_type =
        content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    let path = store.save(&file_name, &image_bytes).await?;

    let image = image_repo::upsert(
        pool.get_ref(),
        user_id,
        image_type,
        &file_name,
        &content_type,
        &path.to_string_lossy(),
    )
    .await?;

    tracing::info!(user_id, image_type = image_type.as_str(), "stored profile image");

    Ok(HttpResponse::Ok().json(ImageDto::from(image)))
}

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    #[serde(rename = "type")]
    pub image_type: String,
}

/// Fetch the stored image record for (user, type)
pub async fn get_image(
    pool: web::Data<PgPool>,
    user_id: web::Path<i64>,
    query: web::Query<ImageQuery>,
) -> Result<HttpResponse> {
    let user_id = user_id.into_inner();
    let image_type = ImageType::parse(&query.image_type)?;

    if !user_repo::exists_by_id(pool.get_ref(), user_id).await? {
        return Err(AppError::NotFound(format!("no user with id {user_id}")));
    }

    let image = image_repo::find_by_user_and_type(pool.get_ref(), user_id, image_type)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "no {} image for user {user_id}",
                image_type.as_str()
            ))
        })?;

    Ok(HttpResponse::Ok().json(ImageDto::from(image)))
}
