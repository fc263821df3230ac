//! Auth Service
//!
//! Owns user registration and credential lookup for the Waggle platform.
//! Token issuance is handled by the perimeter, not here; this service is the
//! single writer of credential rows in the shared `users` table.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod security;

pub use config::Config;
pub use error::{AppError, Result};
