/// Database access layer for the auth service
pub mod schema;
pub mod user_repo;

pub use schema::ensure_schema;
