use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored answer row, exactly as it sits in the history table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedEntry {
    pub submission_id: String,
    pub submission_url: String,
    pub submission_text: String,
    pub submitter_name: String,
    pub comment_id: String,
    pub commenter_name: String,
    pub comment_url: String,
    pub feed_author: String,
    pub feed_date: String,
    /// Assigned by the store at insert (`DATETIME('now')`).
    pub date_of_addition: NaiveDateTime,
}

/// A new answer entry, before the store assigns its insertion timestamp.
///
/// The feed date is an opaque key chosen by the requester; it is not
/// validated as a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedEntry {
    pub submission_id: String,
    pub submission_url: String,
    pub submission_text: String,
    pub submitter_name: String,
    pub comment_id: String,
    pub commenter_name: String,
    pub comment_url: String,
    pub feed_author: String,
    pub feed_date: String,
}

/// The slice of a stored entry the digest renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FeedLine {
    pub submission_text: String,
    pub submission_url: String,
    pub commenter_name: String,
}
