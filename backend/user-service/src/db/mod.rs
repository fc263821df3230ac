/// Database access layer for the user service
pub mod complaint_repo;
pub mod friend_repo;
pub mod image_repo;
pub mod schema;
pub mod user_repo;

pub use schema::ensure_schema;
