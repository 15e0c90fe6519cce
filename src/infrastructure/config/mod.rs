use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub credentials_file: String,
    pub bot_username: String,
    pub user_agent: String,
    pub poll_interval_secs: u64,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://feed.db".to_string()),
            credentials_file: env::var("CREDENTIALS_FILE")
                .unwrap_or_else(|_| "envvars".to_string()),
            bot_username: env::var("BOT_USERNAME")
                .unwrap_or_else(|_| "-CuratorBot-".to_string()),
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| "-CuratorBot- (by u/AB1908)".to_string()),
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
        };

        Ok(config)
    }
}

/// Reddit account secrets, read from a line-delimited file:
/// client id, client secret, username, password.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "could not read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_lines(&raw)
    }

    fn from_lines(raw: &str) -> AppResult<Self> {
        let mut lines = raw.lines();
        let mut next = |name: &str| {
            lines
                .next()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .ok_or_else(|| AppError::Config(format!("credentials file is missing {}", name)))
        };

        Ok(Credentials {
            client_id: next("client id")?,
            client_secret: next("client secret")?,
            username: next("username")?,
            password: next("password")?,
        })
    }
}
