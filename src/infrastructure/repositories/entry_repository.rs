use crate::domain::feed::{FeedLine, NewFeedEntry};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

/// Durable record of accepted answer entries, keyed by
/// (feed author, feed date). Append-only: no update or delete exists.
pub struct EntryRepository {
    pool: Arc<DbPool>,
}

impl EntryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Insert one entry. A row matching an already stored entry on every
    /// content column violates the dedup index and maps to
    /// `AppError::DuplicateEntry`.
    pub async fn record(&self, entry: &NewFeedEntry) -> AppResult<()> {
        let pool = self.pool.as_ref();

        sqlx::query(
            r#"
            INSERT INTO history (
                submission_id, submission_url, submission_text, submitter_name,
                comment_id, commenter_name, comment_url,
                feed_author, feed_date, date_of_addition
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, DATETIME('now'))
            "#,
        )
        .bind(&entry.submission_id)
        .bind(&entry.submission_url)
        .bind(&entry.submission_text)
        .bind(&entry.submitter_name)
        .bind(&entry.comment_id)
        .bind(&entry.commenter_name)
        .bind(&entry.comment_url)
        .bind(&entry.feed_author)
        .bind(&entry.feed_date)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateEntry;
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }

    /// All lines for one (feed author, feed date), in insertion order.
    pub async fn fetch_feed(&self, feed_author: &str, feed_date: &str) -> AppResult<Vec<FeedLine>> {
        let pool = self.pool.as_ref();
        let lines = sqlx::query_as::<_, FeedLine>(
            r#"
            SELECT submission_text, submission_url, commenter_name
            FROM history
            WHERE feed_author = ? AND feed_date = ?
            ORDER BY rowid
            "#,
        )
        .bind(feed_author)
        .bind(feed_date)
        .fetch_all(pool)
        .await?;

        Ok(lines)
    }
}
