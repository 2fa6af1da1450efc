use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::wire::{self, Listing, TokenResponse};
use super::{
    ForumError,
    ForumPost,
    MAX_LISTING_LIMIT,
    PostDetail,
    flatten_comments,
    parse_post_id,
};

pub const DEFAULT_USER_AGENT: &str = "StocksAnalyzer/0.1 MCP";
pub const DEFAULT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
pub const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Tokens are refreshed this long before Reddit expires them.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Connection settings for the Reddit API.
#[derive(Debug, Clone)]
pub struct ForumConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub user_agent: String,
    pub token_url: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl ForumConfig {
    #[must_use]
    pub fn new(client_id: Option<String>, client_secret: Option<String>) -> Self {
        Self {
            client_id,
            client_secret,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        let id = self.client_id.as_deref().filter(|value| !value.trim().is_empty())?;
        let secret = self
            .client_secret
            .as_deref()
            .filter(|value| !value.trim().is_empty())?;
        Some((id, secret))
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Reddit API client with an in-process access token cache.
#[derive(Debug)]
pub struct RedditClient {
    http: reqwest::Client,
    config: ForumConfig,
    token_cache: Mutex<Option<CachedToken>>,
}

impl RedditClient {
    /// Builds the HTTP client. Missing credentials are reported per fetch.
    ///
    /// # Errors
    /// Returns `ForumError::Http` if the HTTP client cannot be built.
    pub fn new(config: ForumConfig) -> Result<Self, ForumError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            config,
            token_cache: Mutex::new(None),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ForumConfig {
        &self.config
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.config.credentials().is_some()
    }

    /// Fetches the current hot posts of a subreddit.
    ///
    /// # Errors
    /// Returns `ForumError` if credentials are missing, the request fails, or
    /// the listing cannot be decoded.
    pub async fn fetch_subreddit_posts(
        &self,
        subreddit: &str,
        limit: usize,
    ) -> Result<Vec<ForumPost>, ForumError> {
        let token = self.access_token().await?;
        let limit = limit.clamp(1, MAX_LISTING_LIMIT).to_string();
        let path = format!("/r/{subreddit}/hot");
        let listing: Listing = self
            .get_json(&token, &path, &[("limit", limit.as_str()), ("raw_json", "1")], None)
            .await?;
        let posts = wire::posts_from_listing(listing)?;
        for post in &posts {
            info!(title = %post.title, author = %post.author, "fetched post");
        }
        Ok(posts)
    }

    /// Fetches one post by id or link, with its top comments flattened
    /// depth-first and capped at `comment_limit`.
    ///
    /// # Errors
    /// Returns `ForumError` if credentials are missing, the reference is not a
    /// valid post link, the post does not exist, or the request fails.
    pub async fn fetch_post(
        &self,
        post_ref: &str,
        comment_limit: usize,
    ) -> Result<PostDetail, ForumError> {
        let token = self.access_token().await?;
        let post_id = parse_post_id(post_ref)?;
        let limit = comment_limit.to_string();
        let path = format!("/comments/{post_id}");
        let listings: Vec<Listing> = self
            .get_json(
                &token,
                &path,
                &[("sort", "top"), ("limit", limit.as_str()), ("raw_json", "1")],
                Some(&post_id),
            )
            .await?;
        let (link, forest) = wire::post_with_comments(&post_id, listings)?;
        let comments = flatten_comments(forest, comment_limit);
        let detail = PostDetail::from_parts(link, comments);
        info!(
            title = %detail.post.title,
            comments = detail.comments.len(),
            "fetched post with comments"
        );
        Ok(detail)
    }

    async fn access_token(&self) -> Result<String, ForumError> {
        let (client_id, client_secret) = self
            .config
            .credentials()
            .ok_or(ForumError::MissingCredentials)?;

        let mut guard = self.token_cache.lock().await;
        if let Some(cached) = guard.as_ref()
            && Instant::now() < cached.refresh_at
        {
            return Ok(cached.token.clone());
        }

        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let response = check_status(response, None).await?;
        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        debug!(expires_in = token.expires_in, "issued reddit access token");

        *guard = Some(CachedToken {
            token: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, &str)],
        post_id: Option<&str>,
    ) -> Result<T, ForumError> {
        let url = format!("{}{path}", self.config.api_base);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            *self.token_cache.lock().await = None;
        }
        let response = check_status(response, post_id).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| ForumError::Decode(err.to_string()))
    }
}

async fn check_status(
    response: reqwest::Response,
    post_id: Option<&str>,
) -> Result<reqwest::Response, ForumError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND
        && let Some(post_id) = post_id
    {
        return Err(ForumError::NotFound(post_id.to_string()));
    }
    let message = response
        .text()
        .await
        .ok()
        .filter(|body| !body.trim().is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    Err(ForumError::Status {
        status: status.as_u16(),
        message,
    })
}
