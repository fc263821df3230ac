pub mod auth;

pub use auth::{availability, get_credentials, register};
