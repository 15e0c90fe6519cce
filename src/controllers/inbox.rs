use std::sync::Arc;

use crate::controllers::replies;
use crate::domain::feed::{digest, FeedServiceApi, FeedServiceError, NewFeedEntry};
use crate::error::AppResult;
use crate::infrastructure::inbox::{InboundMessage, MessageSource, Notifier};

/// What an inbound message asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    AddEntry { feed_date: String },
    FeedRequest { feed_date: String },
    Help,
}

/// Classifies inbox messages and dispatches them to the feed service.
pub struct InboxController {
    feed_service: Arc<dyn FeedServiceApi>,
    notifier: Arc<dyn Notifier>,
    mention: String,
    slash_mention: String,
}

impl InboxController {
    pub fn new(
        feed_service: Arc<dyn FeedServiceApi>,
        notifier: Arc<dyn Notifier>,
        bot_username: &str,
    ) -> Self {
        Self {
            feed_service,
            notifier,
            mention: format!("u/{bot_username}"),
            slash_mention: format!("/u/{bot_username}"),
        }
    }

    /// Drain the source until its stream ends. Each message of a batch is
    /// fully handled before the next; the batch is marked read once, after
    /// processing.
    pub async fn run(&self, source: &dyn MessageSource) -> AppResult<()> {
        while let Some(batch) = source.next_batch().await? {
            let ids: Vec<String> = batch.iter().map(|m| m.id.clone()).collect();
            for message in &batch {
                self.handle_message(message).await?;
            }
            source.mark_read(&ids).await?;
        }
        Ok(())
    }

    pub async fn handle_message(&self, message: &InboundMessage) -> AppResult<()> {
        match classify(&message.body, &self.mention, &self.slash_mention) {
            Some(Command::AddEntry { feed_date }) => self.add_entry(message, &feed_date).await,
            Some(Command::FeedRequest { feed_date }) => self.send_feed(message, &feed_date).await,
            Some(Command::Help) => self.send_help(message).await,
            None => Ok(()),
        }
    }

    async fn add_entry(&self, message: &InboundMessage, feed_date: &str) -> AppResult<()> {
        let Some(comment) = &message.comment else {
            tracing::warn!(
                author = %message.author,
                "add-entry mention did not originate from a comment, skipping"
            );
            return Ok(());
        };

        let entry = NewFeedEntry {
            submission_id: comment.submission_id.clone(),
            submission_url: comment.submission_url.clone(),
            submission_text: comment.submission_title.clone(),
            submitter_name: comment.submitter_name.clone(),
            comment_id: comment.parent_comment_id.clone(),
            commenter_name: comment.parent_author.clone(),
            comment_url: comment.parent_permalink.clone(),
            feed_author: message.author.clone(),
            feed_date: feed_date.to_string(),
        };

        match self.feed_service.record_entry(entry).await {
            Ok(()) => {}
            Err(FeedServiceError::DuplicateEntry) => {
                // At most one entry per distinct submission; the sender
                // still gets the acknowledgement.
                tracing::warn!(
                    author = %message.author,
                    feed_date,
                    "entry already recorded, not stored again"
                );
            }
            Err(e) => return Err(e.into()),
        }

        let reply = replies::entry_accepted(
            &comment.parent_author,
            &comment.submission_title,
            &comment.context,
            feed_date,
        );
        self.notifier
            .send_private_message(&message.author, &reply.subject, &reply.body)
            .await
    }

    async fn send_feed(&self, message: &InboundMessage, feed_date: &str) -> AppResult<()> {
        let lines = self.feed_service.fetch_feed(&message.author, feed_date).await?;

        // An empty feed and an unknown feed are indistinguishable here.
        let reply = if lines.is_empty() {
            replies::feed_not_found(feed_date)
        } else {
            replies::feed_found(feed_date, &digest::render(&lines))
        };

        self.notifier
            .send_private_message(&message.author, &reply.subject, &reply.body)
            .await
    }

    async fn send_help(&self, message: &InboundMessage) -> AppResult<()> {
        let reply = replies::help();
        self.notifier
            .send_private_message(&message.author, &reply.subject, &reply.body)
            .await
    }
}

/// Classify a message body against the command grammar.
///
/// Help is matched before mentions: the help invocation contains the
/// mention token and must not be mistaken for an add-entry command. A
/// command with a missing date token is logged and dropped rather than
/// answered or crashed on.
fn classify(body: &str, mention: &str, slash_mention: &str) -> Option<Command> {
    if body == format!("{mention} HELP!") || body == format!("{slash_mention} HELP!") {
        return Some(Command::Help);
    }

    let tokens: Vec<&str> = body.split_whitespace().collect();

    if tokens.iter().any(|t| *t == mention || *t == slash_mention) {
        let Some(feed_date) = tokens.get(1) else {
            tracing::warn!("mention without a date token, ignoring");
            return None;
        };
        return Some(Command::AddEntry {
            feed_date: feed_date.to_string(),
        });
    }

    if body.starts_with("Feed: ") {
        let Some(feed_date) = tokens.get(1) else {
            tracing::warn!("feed request without a date token, ignoring");
            return None;
        };
        return Some(Command::FeedRequest {
            feed_date: feed_date.to_string(),
        });
    }

    None
}
