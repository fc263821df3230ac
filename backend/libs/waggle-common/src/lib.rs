//! Shared building blocks for the Waggle services
//!
//! Carries the pieces every service needs but none owns: the pagination
//! envelope returned by listing endpoints, the notification event published
//! to Kafka, Postgres pool construction, and the inter-service HTTP client.

pub mod db;
pub mod events;
pub mod http;
pub mod pagination;

pub use events::{NotificationEvent, NotificationType};
pub use http::{ServiceClient, ServiceError};
pub use pagination::{Page, PageRequest};
