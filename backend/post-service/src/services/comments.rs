/// Comment service
use sqlx::PgPool;
use std::sync::Arc;

use crate::clients::UserDirectory;
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::kafka::EventProducer;
use crate::models::{CommentDto, CommentRequest};
use waggle_common::NotificationEvent;

pub struct CommentService {
    pool: PgPool,
    users: Arc<dyn UserDirectory>,
    notifier: Option<EventProducer>,
}

impl CommentService {
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

    /// Create a comment and notify the post owner.
    ///
    /// The comment row is committed before the publish; a publish failure
    /// leaves the row in place and fails the request.
    pub async fn create_comment(&self, req: &CommentRequest) -> Result<CommentDto> {
        if !self.users.user_exists(req.user_id).await? {
            return Err(AppError::BadRequest(format!(
                "invalid user id {}",
                req.user_id
            )));
        }

        let post = post_repo::find_by_id(&self.pool, req.post_id)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("invalid post id {}", req.post_id)))?;

        let comment = comment_repo::create(&self.pool, post.id, req.user_id, &req.comment).await?;

        if let Some(notifier) = &self.notifier {
            let event =
                NotificationEvent::comment(comment.user_id, post.user_id, post.id, comment.id);
            if let Err(e) = notifier.publish(&event).await {
                tracing::error!(
                    comment_id = comment.id,
                    error = %e,
                    "failed to publish comment notification"
                );
                return Err(e);
            }
        }

        Ok(comment.into())
    }

    pub async fn get_comment(&self, comment_id: i64) -> Result<CommentDto> {
        let comment = comment_repo::find_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no comment with id {comment_id}")))?;

        Ok(comment.into())
    }

    pub async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        if !comment_repo::delete(&self.pool, comment_id).await? {
            return Err(AppError::NotFound(format!(
                "no comment with id {comment_id}"
            )));
        }

        Ok(())
    }

    /// All comments on a post, newest first
    pub async fn comments_for_post(&self, post_id: i64) -> Result<Vec<CommentDto>> {
        self.ensure_post_exists(post_id).await?;

        let comments = comment_repo::find_by_post(&self.pool, post_id).await?;
        Ok(comments.into_iter().map(CommentDto::from).collect())
    }

    pub async fn comment_count(&self, post_id: i64) -> Result<i64> {
        self.ensure_post_exists(post_id).await?;
        Ok(comment_repo::count_by_post(&self.pool, post_id).await?)
    }

    pub async fn set_blocked(&self, comment_id: i64, blocked: bool) -> Result<CommentDto> {
        let comment = comment_repo::set_blocked(&self.pool, comment_id, blocked)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no comment with id {comment_id}")))?;

        Ok(comment.into())
    }

    async fn ensure_post_exists(&self, post_id: i64) -> Result<()> {
        if post_repo::exists_by_id(&self.pool, post_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("no post with id {post_id}")))
        }
    }
}
