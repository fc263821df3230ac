/// Data models for the user service
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Row in the shared `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub is_blocked: bool,
    pub blocked_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile view; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: String,
    pub role: String,
    pub is_blocked: bool,
    pub blocked_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            name: user.name,
            role: user.role,
            is_blocked: user.is_blocked,
            blocked_reason: user.blocked_reason,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Known user roles; listing can filter on these
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.to_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(AppError::BadRequest(format!("unknown role: {other}"))),
        }
    }
}

/// Kind of profile image; one stored image per (user, kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Avatar,
    Cover,
}

impl ImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Avatar => "AVATAR",
            ImageType::Cover => "COVER",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.to_uppercase().as_str() {
            "AVATAR" => Ok(ImageType::Avatar),
            "COVER" => Ok(ImageType::Cover),
            other => Err(AppError::BadRequest(format!("unknown image type: {other}"))),
        }
    }
}

/// Row in `user_images`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Image {
    pub id: i64,
    pub user_id: i64,
    pub image_type: String,
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDto {
    pub id: i64,
    pub user_id: i64,
    pub image_type: String,
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Image> for ImageDto {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            user_id: image.user_id,
            image_type: image.image_type,
            file_name: image.file_name,
            file_type: image.file_type,
            file_path: image.file_path,
            uploaded_at: image.uploaded_at,
        }
    }
}

/// Row in `complaints`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Complaint {
    pub id: i64,
    pub reporter_id: i64,
    pub reported_id: i64,
    pub reason: String,
    pub filed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintDto {
    pub id: i64,
    pub reporter_id: i64,
    pub reported_id: i64,
    pub reason: String,
    pub filed_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintDto {
    fn from(complaint: Complaint) -> Self {
        Self {
            id: complaint.id,
            reporter_id: complaint.reporter_id,
            reported_id: complaint.reported_id,
            reason: complaint.reason,
            filed_at: complaint.filed_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ComplaintRequest {
    pub reporter_id: i64,
    pub reported_id: i64,
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse("USER").unwrap(), Role::User);
        assert!(Role::parse("superuser").is_err());
    }

    #[test]
    fn image_type_parse_rejects_unknown() {
        assert_eq!(ImageType::parse("avatar").unwrap(), ImageType::Avatar);
        assert_eq!(ImageType::parse("Cover").unwrap(), ImageType::Cover);
        assert!(ImageType::parse("banner").is_err());
    }
}
