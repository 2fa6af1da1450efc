//! Control plane shared by the MCP tools.
//!
//! Owns the forum client, renderer and display, and exposes the three
//! operations the tools need: list posts, fetch one post, create a plot.

use std::path::PathBuf;
use std::sync::Arc;
use std::{error::Error, fmt};

use sentiplot_model::{RawRecord, ValidationErrors, validate_batch};
use serde::{Deserialize, Serialize};

use crate::display::{DisplayError, PlotDisplay};
use crate::forum::{
    DEFAULT_COMMENT_LIMIT,
    DEFAULT_POST_LIMIT,
    DEFAULT_SUBREDDIT,
    ForumError,
    ForumPost,
    PostDetail,
    RedditClient,
};
use crate::render::{PlotDocument, PlotRenderer, RenderError};

/// Name of the record batch in validation error paths.
pub const PLOT_DATA_FIELD: &str = "data";

#[derive(Debug)]
pub enum ControlError {
    Validation(ValidationErrors),
    Render(RenderError),
    Display(DisplayError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid plot data: {err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::Display(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControlError {}

impl From<ValidationErrors> for ControlError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(err)
    }
}

impl From<RenderError> for ControlError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}

impl From<DisplayError> for ControlError {
    fn from(err: DisplayError) -> Self {
        Self::Display(err)
    }
}

/// Defaults applied when a tool call leaves fetch parameters out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDefaults {
    pub subreddit: String,
    pub post_limit: usize,
    pub comment_limit: usize,
}

impl Default for FetchDefaults {
    fn default() -> Self {
        Self {
            subreddit: DEFAULT_SUBREDDIT.to_string(),
            post_limit: DEFAULT_POST_LIMIT,
            comment_limit: DEFAULT_COMMENT_LIMIT,
        }
    }
}

/// Outcome of a successful `create_plot`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlotReport {
    pub path: PathBuf,
    pub datasets: usize,
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SentiplotControlPlane {
    forum: Arc<RedditClient>,
    renderer: Arc<PlotRenderer>,
    display: Arc<PlotDisplay>,
    defaults: FetchDefaults,
}

impl SentiplotControlPlane {
    #[must_use]
    pub fn new(forum: RedditClient, renderer: PlotRenderer, display: PlotDisplay) -> Self {
        Self {
            forum: Arc::new(forum),
            renderer: Arc::new(renderer),
            display: Arc::new(display),
            defaults: FetchDefaults::default(),
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: FetchDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub const fn defaults(&self) -> &FetchDefaults {
        &self.defaults
    }

    #[must_use]
    pub fn forum(&self) -> &RedditClient {
        &self.forum
    }

    #[must_use]
    pub fn renderer(&self) -> &PlotRenderer {
        &self.renderer
    }

    /// Lists hot posts, falling back to the configured subreddit and limit.
    ///
    /// # Errors
    /// Returns `ForumError` from the forum client.
    pub async fn fetch_posts(
        &self,
        subreddit: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<ForumPost>, ForumError> {
        let subreddit = subreddit
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.defaults.subreddit);
        let limit = limit.unwrap_or(self.defaults.post_limit);
        self.forum.fetch_subreddit_posts(subreddit, limit).await
    }

    /// Fetches one post by id or link with up to the configured number of comments.
    ///
    /// # Errors
    /// Returns `ForumError` from the forum client.
    pub async fn fetch_post(&self, post_ref: &str) -> Result<PostDetail, ForumError> {
        self.forum
            .fetch_post(post_ref, self.defaults.comment_limit)
            .await
    }

    /// Validates the whole batch and renders it. Nothing is rendered if any
    /// record is invalid.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` with every violation, or
    /// `ControlError::Render` if document assembly fails.
    pub fn render_plot(&self, raws: Vec<RawRecord>) -> Result<(PlotDocument, Vec<String>), ControlError> {
        let records = validate_batch(PLOT_DATA_FIELD, raws)?;
        let document = self.renderer.render(&records)?;
        let symbols = records
            .iter()
            .map(|record| record.symbol().to_string())
            .collect();
        Ok((document, symbols))
    }

    /// Validates, renders, writes and opens a plot.
    ///
    /// # Errors
    /// Returns `ControlError` for validation, render or display failures.
    pub async fn create_plot(&self, raws: Vec<RawRecord>) -> Result<PlotReport, ControlError> {
        let (document, symbols) = self.render_plot(raws)?;
        let path = self.display.show(&document).await?;
        Ok(PlotReport {
            path,
            datasets: document.dataset_count(),
            symbols,
        })
    }
}
