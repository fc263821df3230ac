/// Data models for the post service
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder stored in the file columns of text-only posts
pub const NO_MEDIA: &str = "NO-MEDIA";

/// Kind of content a post carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostType {
    Text,
    Image,
    Video,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Text => "TEXT",
            PostType::Image => "IMAGE",
            PostType::Video => "VIDEO",
        }
    }
}

/// Row in `posts`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub description: String,
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    pub user_id: i64,
    pub created_on: DateTime<Utc>,
    pub is_blocked: bool,
    pub post_type: String,
    pub aspect_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub description: String,
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    pub user_id: i64,
    pub created_on: DateTime<Utc>,
    pub is_blocked: bool,
    pub post_type: String,
    pub aspect_ratio: f64,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            description: post.description,
            file_name: post.file_name,
            file_type: post.file_type,
            file_path: post.file_path,
            user_id: post.user_id,
            created_on: post.created_on,
            is_blocked: post.is_blocked,
            post_type: post.post_type,
            aspect_ratio: post.aspect_ratio,
        }
    }
}

/// Metadata accompanying a post creation (JSON body, or the `meta` part of
/// the multipart upload)
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub description: String,
    pub user_id: i64,
    pub post_type: PostType,
    pub aspect_ratio: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub description: String,
}

/// Row in `comments`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub comment: String,
    pub commented_on: DateTime<Utc>,
    pub user_id: i64,
    pub is_blocked: bool,
    pub post_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDto {
    pub id: i64,
    pub comment: String,
    pub commented_on: DateTime<Utc>,
    pub user_id: i64,
    pub is_blocked: bool,
    pub post_id: i64,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            comment: comment.comment,
            commented_on: comment.commented_on,
            user_id: comment.user_id,
            is_blocked: comment.is_blocked,
            post_id: comment.post_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub post_id: i64,
    pub user_id: i64,
    pub comment: String,
}

/// Row in `likes`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub liked_on: DateTime<Utc>,
    pub post_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeDto {
    pub id: i64,
    pub user_id: i64,
    pub liked_on: DateTime<Utc>,
    pub post_id: i64,
}

impl From<Like> for LikeDto {
    fn from(like: Like) -> Self {
        Self {
            id: like.id,
            user_id: like.user_id,
            liked_on: like.liked_on,
            post_id: like.post_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LikeRequest {
    pub post_id: i64,
    pub user_id: i64,
}

/// Date predicate of the post filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateFilter {
    All,
    Today,
    Range,
}

/// Type predicate of the post filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostTypeFilter {
    All,
    Text,
    Image,
    Video,
}

impl PostTypeFilter {
    /// The concrete post type this filter selects, if any
    pub fn post_type(&self) -> Option<PostType> {
        match self {
            PostTypeFilter::All => None,
            PostTypeFilter::Text => Some(PostType::Text),
            PostTypeFilter::Image => Some(PostType::Image),
            PostTypeFilter::Video => Some(PostType::Video),
        }
    }
}

/// Body of `POST /api/v1/posts/filter`
#[derive(Debug, Clone, Deserialize)]
pub struct PostFilterRequest {
    pub date_filter: DateFilter,
    pub post_type: PostTypeFilter,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page_no: i64,
    pub page_size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_enums_use_screaming_case() {
        let filter: PostFilterRequest = serde_json::from_str(
            r#"{
                "date_filter": "TODAY",
                "post_type": "IMAGE",
                "start_date": null,
                "end_date": null,
                "page_no": 0,
                "page_size": 10
            }"#,
        )
        .unwrap();
        assert_eq!(filter.date_filter, DateFilter::Today);
        assert_eq!(filter.post_type, PostTypeFilter::Image);
    }

    #[test]
    fn type_filter_maps_to_post_type() {
        assert_eq!(PostTypeFilter::All.post_type(), None);
        assert_eq!(PostTypeFilter::Text.post_type(), Some(PostType::Text));
        assert_eq!(PostTypeFilter::Image.post_type(), Some(PostType::Image));
        assert_eq!(PostTypeFilter::Video.post_type(), Some(PostType::Video));
    }

    #[test]
    fn post_type_serializes_to_upper_case() {
        assert_eq!(serde_json::to_string(&PostType::Text).unwrap(), "\"TEXT\"");
        assert_eq!(PostType::Video.as_str(), "VIDEO");
    }
}
