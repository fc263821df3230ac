//! Shared fixtures for post-service integration tests

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::Arc;
use waggle_common::ServiceError;

use post_service::clients::UserDirectory;

/// In-memory stand-in for user-service
pub struct MockUserDirectory {
    users: HashSet<i64>,
    friends: Vec<i64>,
}

impl MockUserDirectory {
    pub fn with_users(users: &[i64]) -> Arc<dyn UserDirectory> {
        Arc::new(Self {
            users: users.iter().copied().collect(),
            friends: Vec::new(),
        })
    }

    pub fn with_friends(users: &[i64], friends: &[i64]) -> Arc<dyn UserDirectory> {
        Arc::new(Self {
            users: users.iter().copied().collect(),
            friends: friends.to_vec(),
        })
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn user_exists(&self, user_id: i64) -> Result<bool, ServiceError> {
        Ok(self.users.contains(&user_id))
    }

    async fn friend_ids(&self, _user_id: i64) -> Result<Vec<i64>, ServiceError> {
        Ok(self.friends.clone())
    }
}

/// Pool against DATABASE_URL with the schema ensured, or None to skip the
/// test on machines without a database.
pub async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return None;
        }
    };

    let pool = waggle_common::db::connect_pool(&url, 5).await.ok()?;
    post_service::db::ensure_schema(&pool).await.ok()?;
    Some(pool)
}
