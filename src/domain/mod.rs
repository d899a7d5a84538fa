pub mod error;
pub mod feed;
pub mod source;

pub use error::{ApiError, ErrorEntry};
pub use feed::Feed;
pub use source::Source;
