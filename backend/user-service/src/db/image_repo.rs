/// Profile image repository
use crate::models::{Image, ImageType};
use sqlx::PgPool;

/// Insert or replace the stored image for (user, type)
pub async fn upsert(
    pool: &PgPool,
    user_id: i64,
    image_type: ImageType,
    file_name: &str,
    file_type: &str,
    file_path: &str,
) -> Result<Image, sqlx::Error> {
    sqlx::query_as::<_, Image>(
        r#"
        INSERT INTO user_images (user_id, image_type, file_name, file_type, file_path)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, image_type) DO UPDATE
        SET file_name = EXCLUDED.file_name,
            file_type = EXCLUDED.file_type,
            file_path = EXCLUDED.file_path,
            uploaded_at = NOW()
        RETURNING id, user_id, image_type, file_name, file_type, file_path, uploaded_at
        "#,
    )
    .bind(user_id)
    .bind(image_type.as_str())
    .bind(file_name)
    .bind(file_type)
    .bind(file_path)
    .fetch_one(pool)
    .await
}

/// Stored image for (user, type), if any
pub async fn find_by_user_and_type(
    pool: &PgPool,
    user_id: i64,
    image_type: ImageType,
) -> Result<Option<Image>, sqlx::Error> {
    sqlx::query_as::<_, Image>(
        r#"
        SELECT id, user_id, image_type, file_name, file_type, file_path, uploaded_at
        FROM user_images
        WHERE user_id = $1 AND image_type = $2
        "#,
    )
    .bind(user_id)
    .bind(image_type.as_str())
    .fetch_optional(pool)
    .await
}
