use async_trait::async_trait;
use std::sync::Arc;

use super::error::FeedServiceError;
use crate::domain::feed::{FeedLine, NewFeedEntry};
use crate::infrastructure::repositories::EntryRepository;

pub struct FeedService {
    entry_repo: Arc<EntryRepository>,
}

impl FeedService {
    pub fn new(entry_repo: Arc<EntryRepository>) -> Self {
        Self { entry_repo }
    }
}

#[async_trait]
pub trait FeedServiceApi: Send + Sync {
    /// Record one accepted answer. A duplicate of an already stored entry
    /// is rejected with `DuplicateEntry`, never overwritten.
    async fn record_entry(&self, entry: NewFeedEntry) -> Result<(), FeedServiceError>;

    /// All stored lines for one (feed author, feed date), in insertion
    /// order. An empty feed and a missing feed both come back as an empty
    /// vec.
    async fn fetch_feed(
        &self,
        feed_author: &str,
        feed_date: &str,
    ) -> Result<Vec<FeedLine>, FeedServiceError>;
}

#[async_trait]
impl FeedServiceApi for FeedService {
    async fn record_entry(&self, entry: NewFeedEntry) -> Result<(), FeedServiceError> {
        self.entry_repo
            .record(&entry)
            .await
            .map_err(FeedServiceError::from)
    }

    async fn fetch_feed(
        &self,
        feed_author: &str,
        feed_date: &str,
    ) -> Result<Vec<FeedLine>, FeedServiceError> {
        self.entry_repo
            .fetch_feed(feed_author, feed_date)
            .await
            .map_err(FeedServiceError::from)
    }
}
