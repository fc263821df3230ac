/// Business logic for the post service
pub mod comments;
pub mod filter;
pub mod likes;
pub mod posts;
pub mod storage;

pub use comments::CommentService;
pub use likes::LikeService;
pub use posts::{FileUpload, PostService};
pub use storage::MediaStore;
