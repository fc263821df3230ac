/// HTTP handlers for the user service
pub mod complaints;
pub mod friends;
pub mod images;
pub mod stats;
pub mod users;
