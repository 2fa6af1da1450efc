//! Forum client.
//!
//! Fetches hot posts and single posts with their comment trees from the Reddit
//! API using the application-only OAuth flow.

mod client;
mod comments;
mod wire;

use std::{error::Error, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use client::{
    DEFAULT_API_BASE,
    DEFAULT_TOKEN_URL,
    DEFAULT_USER_AGENT,
    ForumConfig,
    RedditClient,
};
pub use comments::flatten_comments;

pub const DEFAULT_SUBREDDIT: &str = "stocks";
pub const DEFAULT_POST_LIMIT: usize = 10;
pub const DEFAULT_COMMENT_LIMIT: usize = 50;
/// Largest page the listing endpoints serve.
pub const MAX_LISTING_LIMIT: usize = 100;

#[derive(Debug)]
pub enum ForumError {
    MissingCredentials,
    InvalidPostUrl(String),
    NotFound(String),
    Http(reqwest::Error),
    Status { status: u16, message: String },
    Decode(String),
}

impl fmt::Display for ForumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => {
                write!(f, "Failed to create Reddit client. Check your credentials.")
            }
            Self::InvalidPostUrl(_) => write!(f, "Invalid Reddit URL format"),
            Self::NotFound(post_id) => write!(f, "post not found: {post_id}"),
            Self::Http(err) => write!(f, "{err}"),
            Self::Status { status, message } => write!(f, "reddit returned {status}: {message}"),
            Self::Decode(message) => write!(f, "unexpected response: {message}"),
        }
    }
}

impl Error for ForumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ForumError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl ForumError {
    /// Message shown to the agent for a failed listing fetch.
    #[must_use]
    pub fn posts_message(&self) -> String {
        match self {
            Self::MissingCredentials => self.to_string(),
            _ => format!("Failed to fetch posts: {self}"),
        }
    }

    /// Message shown to the agent for a failed single-post fetch.
    #[must_use]
    pub fn post_message(&self) -> String {
        match self {
            Self::MissingCredentials | Self::InvalidPostUrl(_) => self.to_string(),
            _ => format!("Failed to fetch post: {self}"),
        }
    }
}

/// A post as returned by a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForumPost {
    pub title: String,
    pub content: String,
    pub url: String,
    pub author: String,
    pub created_utc: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A post with engagement metrics and its flattened comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: ForumPost,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: u64,
    pub subreddit: String,
    pub comments: Vec<ForumComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForumComment {
    pub id: String,
    pub author: String,
    pub body: String,
    pub score: i64,
    pub created_utc: f64,
    pub parent_id: String,
}

/// A comment with its direct replies.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub comment: ForumComment,
    pub replies: Vec<Self>,
}

/// Resolves a post reference to a post id.
///
/// A bare id is returned unchanged. A value starting with `http` must contain
/// a `comments` path segment followed by the id.
///
/// # Errors
/// Returns `ForumError::InvalidPostUrl` for links without a `comments/<id>` pair.
pub fn parse_post_id(post_ref: &str) -> Result<String, ForumError> {
    let post_ref = post_ref.trim();
    if !post_ref.starts_with("http") {
        return Ok(post_ref.to_string());
    }
    let mut parts = post_ref.split('/').skip_while(|part| *part != "comments");
    match (parts.next(), parts.next()) {
        (Some(_), Some(id)) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ForumError::InvalidPostUrl(post_ref.to_string())),
    }
}
