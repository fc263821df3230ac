/// User-service client
///
/// Post-service never reads the users table directly; existence checks and
/// friend lookups go through user-service's REST surface.
use async_trait::async_trait;
use std::time::Duration;
use waggle_common::{ServiceClient, ServiceError};

/// The slice of user-service that post-service depends on
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, user_id: i64) -> Result<bool, ServiceError>;
    async fn friend_ids(&self, user_id: i64) -> Result<Vec<i64>, ServiceError>;
}

/// HTTP implementation backed by [`ServiceClient`]
pub struct UserServiceClient {
    inner: ServiceClient,
}

impl UserServiceClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        retry_attempts: u32,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            inner: ServiceClient::new(base_url, timeout, retry_attempts)?,
        })
    }
}

#[async_trait]
impl UserDirectory for UserServiceClient {
    async fn user_exists(&self, user_id: i64) -> Result<bool, ServiceError> {
        self.inner
            .get_json(&format!("/api/v1/users/{user_id}/exists"))
            .await
    }

    async fn friend_ids(&self, user_id: i64) -> Result<Vec<i64>, ServiceError> {
        self.inner
            .get_json(&format!("/api/v1/users/{user_id}/friends/ids"))
            .await
    }
}
