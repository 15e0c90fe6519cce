pub mod digest;
pub mod error;
pub mod model;
pub mod service;

pub use error::FeedServiceError;
pub use model::{FeedEntry, FeedLine, NewFeedEntry};
pub use service::{FeedService, FeedServiceApi};
