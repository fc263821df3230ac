/// Registration and credential-lookup handlers
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::{AvailabilityQuery, AvailabilityResponse, CredentialsDto, RegisterRequest, UserDto};
use crate::security::password;

/// Register a new user
///
/// Duplicate email or username is rejected up front; the unique constraints
/// on the table remain the last line of defense under concurrent signups.
pub async fn register(
    pool: web::Data<PgPool>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    payload.validate()?;

    if user_repo::exists_by_email(pool.get_ref(), &payload.email).await? {
        return Err(AppError::Conflict(format!(
            "email {} is already registered",
            payload.email
        )));
    }
    if user_repo::exists_by_username(pool.get_ref(), &payload.username).await? {
        return Err(AppError::Conflict(format!(
            "username {} is already taken",
            payload.username
        )));
    }

    let password_hash = password::hash_password(&payload.password)?;

    let user = user_repo::create_user(
        pool.get_ref(),
        &payload.email,
        &payload.username,
        &payload.name,
        &password_hash,
    )
    .await?;

    tracing::info!(user_id = user.id, "registered new user");

    Ok(HttpResponse::Created().json(UserDto::from(user)))
}

/// Credential record for an external authenticator, looked up by email
pub async fn get_credentials(
    pool: web::Data<PgPool>,
    email: web::Path<String>,
) -> Result<HttpResponse> {
    let user = user_repo::find_by_email(pool.get_ref(), &email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no user with email {}", email)))?;

    Ok(HttpResponse::Ok().json(CredentialsDto::from(user)))
}

/// Uniqueness probe used by signup forms
pub async fn availability(
    pool: web::Data<PgPool>,
    query: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse> {
    if query.email.is_none() && query.username.is_none() {
        return Err(AppError::Validation(
            "at least one of email or username is required".to_string(),
        ));
    }

    let email_taken = match &query.email {
        Some(email) => user_repo::exists_by_email(pool.get_ref(), email).await?,
        None => false,
    };
    let username_taken = match &query.username {
        Some(username) => user_repo::exists_by_username(pool.get_ref(), username).await?,
        None => false,
    };

    Ok(HttpResponse::Ok().json(AvailabilityResponse {
        email_taken,
        username_taken,
    }))
}
