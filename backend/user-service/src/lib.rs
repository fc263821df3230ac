//! User Service
//!
//! Profiles, role-filtered listings, search, block/unblock, profile images,
//! friendships, complaints, and registration statistics for the Waggle
//! platform. Post-service consults this service for user existence and
//! friend-id lookups.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
