/// HTTP handlers for the post service
pub mod comments;
pub mod likes;
pub mod posts;
