/// Like service
use sqlx::PgPool;
use std::sync::Arc;

use crate::clients::UserDirectory;
use crate::db::{like_repo, post_repo};
use crate::error::{AppError, Result};
use crate::kafka::EventProducer;
use crate::models::{LikeDto, LikeRequest};
use waggle_common::NotificationEvent;

pub struct LikeService {
    pool: PgPool,
    users: Arc<dyn UserDirectory>,
    notifier: Option<EventProducer>,
}

impl LikeService {
    pub fn new(pool: PgPool, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            pool,
            users,
            notifier: None,
        }
    }

    pub fn with_notifier(
        pool: PgPool,
        users: Arc<dyn UserDirectory>,
        notifier: EventProducer,
    ) -> Self {
        Self {
            pool,
            users,
            notifier: Some(notifier),
        }
    }

    /// Create a like and notify the post owner.
    ///
    /// A duplicate (post, user) like is a no-op: the conflict clause swallows
    /// the insert and the caller gets `None`. As with comments, the row is
    /// committed before the publish; a publish failure fails the request but
    /// keeps the like.
    pub async fn create_like(&self, req: &LikeRequest) -> Result<Option<LikeDto>> {
        if !self.users.user_exists(req.user_id).await? {
            return Err(AppError::BadRequest(format!(
                "invalid user id {}",
                req.user_id
            )));
        }

        let post = post_repo::find_by_id(&self.pool, req.post_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("invalid post id {}", req.post_id)))?;

        let Some(like) = like_repo::create(&self.pool, post.id, req.user_id).await? else {
            tracing::debug!(
                post_id = post.id,
                user_id = req.user_id,
                "duplicate like ignored"
            );
            return Ok(None);
        };

        if let Some(notifier) = &self.notifier {
            let event = NotificationEvent::like(like.user_id, post.user_id, post.id);
            if let Err(e) = notifier.publish(&event).await {
                tracing::error!(
                    like_id = like.id,
                    error = %e,
                    "failed to publish like notification"
                );
                return Err(e);
            }
        }

        Ok(Some(like.into()))
    }

    pub async fn get_like(&self, like_id: i64) -> Result<LikeDto> {
        let like = like_repo::find_by_id(&self.pool, like_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no like with id {like_id}")))?;

        Ok(like.into())
    }

    /// Remove the like for (post, user)
    pub async fn delete_like(&self, req: &LikeRequest) -> Result<()> {
        self.ensure_post_exists(req.post_id).await?;

        if !like_repo::delete_by_post_and_user(&self.pool, req.post_id, req.user_id).await? {
            return Err(AppError::NotFound(format!(
                "no like on post {} by user {}",
                req.post_id, req.user_id
            )));
        }

        Ok(())
    }

    /// All likes on a post, newest first
    pub async fn likes_for_post(&self, post_id: i64) -> Result<Vec<LikeDto>> {
        self.ensure_post_exists(post_id).await?;

        let likes = like_repo::find_by_post(&self.pool, post_id).await?;
        Ok(likes.into_iter().map(LikeDto::from).collect())
    }

    pub async fn like_count(&self, post_id: i64) -> Result<i64> {
        self.ensure_post_exists(post_id).await?;
        Ok(like_repo::count_by_post(&self.pool, post_id).await?)
    }

    /// Whether the user has liked the post; validates both ids like creation
    pub async fn is_user_liked(&self, req: &LikeRequest) -> Result<bool> {
        if !self.users.user_exists(req.user_id).await? {
            return Err(AppError::BadRequest(format!(
                "invalid user id {}",
                req.user_id
            )));
        }
        if !post_repo::exists_by_id(&self.pool, req.post_id).await? {
            return Err(AppError::BadRequest(format!(
                "invalid post id {}",
                req.post_id
            )));
        }

        Ok(like_repo::exists_by_post_and_user(&self.pool, req.post_id, req.user_id).await?)
    }

    async fn ensure_post_exists(&self, post_id: i64) -> Result<()> {
        if post_repo::exists_by_id(&self.pool, post_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("no post with id {post_id}")))
        }
    }
}
