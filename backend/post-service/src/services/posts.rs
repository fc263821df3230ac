/// Post service - creation, retrieval, filtering, and management
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;

use crate::clients::UserDirectory;
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::models::{CreatePostRequest, PostDto, PostFilterRequest, UpdatePostRequest, NO_MEDIA};
use crate::services::filter::{resolve_dates, ResolvedDates};
use crate::services::storage::MediaStore;
use waggle_common::{Page, PageRequest};

/// An uploaded media file, fully buffered from the multipart stream
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct PostService {
    pool: PgPool,
    users: Arc<dyn UserDirectory>,
    store: MediaStore,
}

impl PostService {
    pub fn new(pool: PgPool, users: Arc<dyn UserDirectory>, store: MediaStore) -> Self {
        Self { pool, users, store }
    }

    async fn ensure_valid_user(&self, user_id: i64) -> Result<()> {
        if self.users.user_exists(user_id).await? {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!("invalid user id {user_id}")))
        }
    }

    /// Create a post, persisting the media file first when one is attached
    pub async fn create_post(
        &self,
        upload: Option<FileUpload>,
        req: &CreatePostRequest,
    ) -> Result<PostDto> {
        self.ensure_valid_user(req.user_id).await?;

        let (file_name, file_type, file_path) = match upload {
            Some(upload) => {
                let path = self.store.save(&upload.file_name, &upload.bytes).await?;
                (
                    upload.file_name,
                    upload.content_type,
                    path.to_string_lossy().into_owned(),
                )
            }
            None => (
                NO_MEDIA.to_string(),
                NO_MEDIA.to_string(),
                NO_MEDIA.to_string(),
            ),
        };

        let post = post_repo::create(
            &self.pool,
            &req.description,
            &file_name,
            &file_type,
            &file_path,
            req.user_id,
            req.post_type,
            req.aspect_ratio,
        )
        .await?;

        tracing::info!(post_id = post.id, user_id = post.user_id, "created post");

        Ok(post.into())
    }

    pub async fn get_post(&self, post_id: i64) -> Result<PostDto> {
        let post = post_repo::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no post with id {post_id}")))?;

        Ok(post.into())
    }

    /// Raw media bytes plus the stored content type
    pub async fn get_post_file(&self, post_id: i64) -> Result<(String, Vec<u8>)> {
        let post = post_repo::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no post with id {post_id}")))?;

        if post.file_path == NO_MEDIA {
            return Err(AppError::BadRequest(format!(
                "post {post_id} has no media attached"
            )));
        }

        let bytes = tokio::fs::read(&post.file_path).await?;
        Ok((post.file_type, bytes))
    }

    /// Posts of the user's friends.
    ///
    /// Feed assembly from the fetched friend ids is not implemented; callers
    /// always receive an empty list, but the user validation and the
    /// friend-id lookup still run so upstream failures surface.
    pub async fn posts_for_friends(&self, user_id: i64) -> Result<Vec<PostDto>> {
        self.ensure_valid_user(user_id).await?;

        let friend_ids = self.users.friend_ids(user_id).await?;
        tracing::debug!(user_id, friends = friend_ids.len(), "fetched friend ids");

        Ok(Vec::new())
    }

    /// All posts of one user, newest first
    pub async fn user_posts(&self, user_id: i64) -> Result<Vec<PostDto>> {
        self.ensure_valid_user(user_id).await?;

        let posts = post_repo::find_by_user(&self.pool, user_id).await?;
        Ok(posts.into_iter().map(PostDto::from).collect())
    }

    /// Paginated listing ordered by id
    pub async fn list(&self, page: PageRequest) -> Result<Page<PostDto>> {
        page.validate().map_err(AppError::BadRequest)?;

        let posts = post_repo::list_page(&self.pool, page.page_size, page.offset()).await?;
        let total = post_repo::count(&self.pool).await?;

        Ok(Page::new(posts, page.page_no, page.page_size, total).map(PostDto::from))
    }

    /// A random page of posts
    pub async fn random(&self, page: PageRequest) -> Result<Vec<PostDto>> {
        page.validate().map_err(AppError::BadRequest)?;

        let posts = post_repo::random_page(&self.pool, page.page_size, page.offset()).await?;
        Ok(posts.into_iter().map(PostDto::from).collect())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<PostDto>> {
        let posts = post_repo::search_by_description(&self.pool, query).await?;
        Ok(posts.into_iter().map(PostDto::from).collect())
    }

    pub async fn count(&self) -> Result<i64> {
        Ok(post_repo::count(&self.pool).await?)
    }

    pub async fn update_description(
        &self,
        post_id: i64,
        req: &UpdatePostRequest,
    ) -> Result<PostDto> {
        let post = post_repo::update_description(&self.pool, post_id, &req.description)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no post with id {post_id}")))?;

        Ok(post.into())
    }

    pub async fn set_blocked(&self, post_id: i64, blocked: bool) -> Result<PostDto> {
        let post = post_repo::set_blocked(&self.pool, post_id, blocked)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no post with id {post_id}")))?;

        Ok(post.into())
    }

    /// Hard delete; the media file stays on disk
    pub async fn delete(&self, post_id: i64) -> Result<()> {
        if !post_repo::delete(&self.pool, post_id).await? {
            return Err(AppError::NotFound(format!("no post with id {post_id}")));
        }

        Ok(())
    }

    /// Filtered, paginated listing per the date/type decision table
    pub async fn filter(&self, req: &PostFilterRequest) -> Result<Page<PostDto>> {
        let page = PageRequest {
            page_no: req.page_no,
            page_size: req.page_size,
        };
        page.validate().map_err(AppError::BadRequest)?;

        let dates = resolve_dates(
            req.date_filter,
            req.start_date,
            req.end_date,
            Utc::now().date_naive(),
        )?;
        let post_type = req.post_type.post_type();

        let (limit, offset) = (page.page_size, page.offset());

        let (posts, total) = match (post_type, dates) {
            // Unfiltered listing keeps its id ordering.
            (None, None) => (
                post_repo::list_page(&self.pool, limit, offset).await?,
                post_repo::count(&self.pool).await?,
            ),
            (Some(post_type), None) => (
                post_repo::find_by_type(&self.pool, post_type, limit, offset).await?,
                post_repo::count_by_type(&self.pool, post_type).await?,
            ),
            (None, Some(ResolvedDates::Exact(day))) => (
                post_repo::find_by_date(&self.pool, day, limit, offset).await?,
                post_repo::count_by_date(&self.pool, day).await?,
            ),
            (None, Some(ResolvedDates::Between(start, end))) => (
                post_repo::find_by_date_between(&self.pool, start, end, limit, offset).await?,
                post_repo::count_by_date_between(&self.pool, start, end).await?,
            ),
            (Some(post_type), Some(ResolvedDates::Exact(day))) => (
                post_repo::find_by_type_and_date(&self.pool, post_type, day, limit, offset)
                    .await?,
                post_repo::count_by_type_and_date(&self.pool, post_type, day).await?,
            ),
            (Some(post_type), Some(ResolvedDates::Between(start, end))) => (
                post_repo::find_by_type_and_date_between(
                    &self.pool, post_type, start, end, limit, offset,
                )
                .await?,
                post_repo::count_by_type_and_date_between(&self.pool, post_type, start, end)
                    .await?,
            ),
        };

        Ok(Page::new(posts, page.page_no, page.page_size, total).map(PostDto::from))
    }
}
