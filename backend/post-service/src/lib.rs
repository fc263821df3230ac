//! Post Service
//!
//! Posts, comments, and likes for the Waggle platform. Validates acting
//! users against user-service over HTTP and publishes like/comment
//! notifications to the Kafka `notification` topic. Uploaded media lands on
//! the local filesystem under the configured media root.

pub mod clients;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod kafka;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
