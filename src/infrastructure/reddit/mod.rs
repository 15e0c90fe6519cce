use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::infrastructure::config::Credentials;
use crate::infrastructure::inbox::{CommentContext, InboundMessage, MessageSource, Notifier};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_API_URL: &str = "https://oauth.reddit.com";

#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct Listing<T> {
    data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
struct ListingData<T> {
    children: Vec<Thing<T>>,
}

#[derive(Debug, Deserialize)]
struct Thing<T> {
    kind: String,
    data: T,
}

#[derive(Debug, Deserialize)]
struct MessageData {
    name: String,
    author: Option<String>,
    body: String,
    parent_id: Option<String>,
    link_id: Option<String>,
    context: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentData {
    author: Option<String>,
    permalink: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmissionData {
    id: String,
    url: String,
    title: String,
    author: Option<String>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Authenticated Reddit API client. Implements both sides of the platform
/// boundary: the unread-inbox source and the private-message notifier.
pub struct RedditClient {
    credentials: Credentials,
    user_agent: String,
    poll_interval: Duration,
    http_client: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl RedditClient {
    pub fn new(credentials: Credentials, user_agent: String, poll_interval: Duration) -> Self {
        Self {
            credentials,
            user_agent,
            poll_interval,
            http_client: reqwest::Client::new(),
            token: Mutex::new(None),
        }
    }

    /// OAuth2 password grant for a script-type app. The token is cached
    /// until shortly before it expires.
    async fn access_token(&self) -> AppResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let params = [
            ("grant_type", "password"),
            ("username", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
        ];

        let response = self
            .http_client
            .post(TOKEN_URL)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .header("User-Agent", &self.user_agent)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Reddit token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Reddit token request returned {}",
                response.status()
            )));
        }

        let token: AccessToken = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("could not parse Reddit token: {e}")))?;

        let value = token.access_token.clone();
        *cached = Some(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in.saturating_sub(60)),
        });

        Ok(value)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let token = self.access_token().await?;
        let response = self
            .http_client
            .get(format!("{OAUTH_API_URL}{path}"))
            .query(query)
            .bearer_auth(&token)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Reddit request to {path} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Reddit returned {} for {path}",
                response.status()
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::ExternalService(format!("could not parse Reddit response from {path}: {e}"))
        })
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> AppResult<()> {
        let token = self.access_token().await?;
        let response = self
            .http_client
            .post(format!("{OAUTH_API_URL}{path}"))
            .bearer_auth(&token)
            .header("User-Agent", &self.user_agent)
            .form(form)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Reddit request to {path} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Reddit returned {} for {path}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Look up a single thing (comment or submission) by fullname.
    async fn info_one<T: DeserializeOwned>(&self, fullname: &str) -> AppResult<Option<T>> {
        let mut listing: Listing<T> = self.get_json("/api/info", &[("id", fullname)]).await?;
        Ok(listing.data.children.pop().map(|child| child.data))
    }

    /// Resolve the submission and parent comment a mention arrived on.
    /// Returns None when either lookup comes back empty (deleted content).
    async fn resolve_comment_context(
        &self,
        message: &MessageData,
    ) -> AppResult<Option<CommentContext>> {
        let (Some(parent_id), Some(link_id)) = (&message.parent_id, &message.link_id) else {
            return Ok(None);
        };

        let Some(parent) = self.info_one::<CommentData>(parent_id).await? else {
            return Ok(None);
        };
        let Some(submission) = self.info_one::<SubmissionData>(link_id).await? else {
            return Ok(None);
        };

        Ok(Some(CommentContext {
            submission_id: submission.id,
            submission_url: submission.url,
            submission_title: submission.title,
            submitter_name: submission.author.unwrap_or_else(|| "[deleted]".to_string()),
            parent_comment_id: strip_type_prefix(parent_id).to_string(),
            parent_author: parent.author.unwrap_or_else(|| "[deleted]".to_string()),
            parent_permalink: parent.permalink.unwrap_or_default(),
            context: message.context.clone().unwrap_or_default(),
        }))
    }
}

/// Fullnames are `tN_id`; the bare id follows the first underscore.
fn strip_type_prefix(fullname: &str) -> &str {
    fullname
        .split_once('_')
        .map(|(_, id)| id)
        .unwrap_or(fullname)
}

#[async_trait]
impl MessageSource for RedditClient {
    async fn next_batch(&self) -> AppResult<Option<Vec<InboundMessage>>> {
        loop {
            let listing: Listing<MessageData> = self.get_json("/message/unread", &[]).await?;

            let mut batch = Vec::with_capacity(listing.data.children.len());
            for child in listing.data.children {
                let comment = if child.kind == "t1" {
                    self.resolve_comment_context(&child.data).await?
                } else {
                    None
                };
                let Some(author) = child.data.author else {
                    tracing::warn!(id = %child.data.name, "unread message has no author, skipping");
                    continue;
                };
                batch.push(InboundMessage {
                    id: child.data.name,
                    author,
                    body: child.data.body,
                    comment,
                });
            }

            if !batch.is_empty() {
                return Ok(Some(batch));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn mark_read(&self, ids: &[String]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let joined = ids.join(",");
        self.post_form("/api/read_message", &[("id", joined.as_str())])
            .await
    }
}

#[async_trait]
impl Notifier for RedditClient {
    async fn send_private_message(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> AppResult<()> {
        self.post_form(
            "/api/compose",
            &[
                ("api_type", "json"),
                ("to", recipient),
                ("subject", subject),
                ("text", body),
            ],
        )
        .await
    }
}
