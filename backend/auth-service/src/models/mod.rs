/// Data models for the auth service
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

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
    pub created_at: DateTime<Utc>,
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
            created_at: user.created_at,
        }
    }
}

/// Credential record handed to an external authenticator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsDto {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub is_blocked: bool,
}

impl From<User> for CredentialsDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            is_blocked: user.is_blocked,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub email: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub email_taken: bool,
    pub username_taken: bool,
}
