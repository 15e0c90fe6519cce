use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use curator_bot::controllers::inbox::InboxController;
use curator_bot::domain::feed::FeedService;
use curator_bot::infrastructure::config::{Config, Credentials, LogFormat};
use curator_bot::infrastructure::db::{check_connection, create_pool, init_schema};
use curator_bot::infrastructure::reddit::RedditClient;
use curator_bot::infrastructure::repositories::EntryRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting CuratorBot as u/{}", config.bot_username);

    let credentials = Credentials::from_file(&config.credentials_file)?;

    // Open the store and make sure the schema exists
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    check_connection(&pool).await?;
    init_schema(&pool).await?;
    tracing::info!("History table ready");

    let pool = Arc::new(pool);

    // Wire repositories, services and the inbox controller
    let entry_repo = Arc::new(EntryRepository::new(pool.clone()));
    let feed_service = Arc::new(FeedService::new(entry_repo));

    let reddit = Arc::new(RedditClient::new(
        credentials,
        config.user_agent.clone(),
        Duration::from_secs(config.poll_interval_secs),
    ));

    let controller = InboxController::new(feed_service, reddit.clone(), &config.bot_username);

    tracing::info!("Watching the inbox");
    controller.run(reddit.as_ref()).await?;

    tracing::info!("Inbox stream ended, shutting down");
    pool.close().await;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "curator_bot=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "curator_bot=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
