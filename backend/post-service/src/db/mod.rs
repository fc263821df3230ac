/// Database access layer for the post service
pub mod comment_repo;
pub mod like_repo;
pub mod post_repo;
pub mod schema;

pub use schema::ensure_schema;
