use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;

pub type DbPool = Pool<Sqlite>;

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // Duplicate suppression relies on atomic check-and-insert, so writes
    // must stay serialized; one connection is plenty for a sequential bot.
    SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

pub async fn check_connection(pool: &DbPool) -> Result<bool, sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map(|_| true)
}

const CREATE_HISTORY_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS history (
        submission_id       TEXT    NOT NULL,
        submission_url      TEXT    NOT NULL,
        submission_text     TEXT    NOT NULL,
        submitter_name      TEXT    NOT NULL,
        comment_id          TEXT    NOT NULL,
        commenter_name      TEXT    NOT NULL,
        comment_url         TEXT    NOT NULL,
        feed_author         TEXT    NOT NULL,
        feed_date           TEXT    NOT NULL,
        date_of_addition    TEXT    NOT NULL
    )
"#;

// Dedup key: every content column, i.e. the full row shape minus the
// store-assigned timestamp.
const CREATE_DEDUP_INDEX: &str = r#"
    CREATE UNIQUE INDEX IF NOT EXISTS history_dedup_idx ON history (
        submission_id,
        submission_url,
        submission_text,
        submitter_name,
        comment_id,
        commenter_name,
        comment_url,
        feed_author,
        feed_date
    )
"#;

/// Create the history table and its dedup index. Safe to call on every startup.
pub async fn init_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_HISTORY_TABLE).execute(pool).await?;
    sqlx::query(CREATE_DEDUP_INDEX).execute(pool).await?;
    Ok(())
}
