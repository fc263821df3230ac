/// Clients for synchronous calls to other services
pub mod user_client;

pub use user_client::{UserDirectory, UserServiceClient};
