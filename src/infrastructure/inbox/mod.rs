//! The platform boundary: where messages come from and how replies leave.

use async_trait::async_trait;

use crate::error::AppResult;

/// A notification from the bot account's inbox, flattened to the fields
/// the bot reads.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Platform fullname, used for mark-as-read.
    pub id: String,
    pub author: String,
    pub body: String,
    /// Present when the message originated as a comment.
    pub comment: Option<CommentContext>,
}

/// Everything an add-entry command needs from the comment it arrived on.
#[derive(Debug, Clone)]
pub struct CommentContext {
    pub submission_id: String,
    pub submission_url: String,
    pub submission_title: String,
    pub submitter_name: String,
    /// The parent comment is the answer being curated.
    pub parent_comment_id: String,
    pub parent_author: String,
    pub parent_permalink: String,
    /// Permalink with surrounding context, linked from the accepted reply.
    pub context: String,
}

#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Next batch of unread messages. `None` when the stream has ended.
    async fn next_batch(&self) -> AppResult<Option<Vec<InboundMessage>>>;

    /// Tell the source a processed batch no longer needs delivering.
    /// Called once per batch, after processing.
    async fn mark_read(&self, ids: &[String]) -> AppResult<()>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Fire-and-forget private message; no delivery confirmation.
    async fn send_private_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> AppResult<()>;
}
