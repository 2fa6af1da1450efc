use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::SentiplotMcp;
use crate::helpers;

/// Parameters for listing hot posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct FetchPostsParams {
    /// Subreddit name without the `r/` prefix. Defaults to the configured subreddit.
    pub subreddit: Option<String>,
    /// Number of posts to fetch (1-100). Defaults to the configured limit.
    pub limit: Option<usize>,
}

/// Parameters for fetching a single post.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FetchPostParams {
    /// The Reddit post id (e.g. '1a2b3c4') or a full Reddit post link.
    pub post_id: String,
}

#[tool_router(router = tool_router_forum, vis = "pub")]
impl SentiplotMcp {
    #[tool(
        description = "Fetches the latest hot posts from the r/Stocks subreddit with title, content, url and author."
    )]
    async fn fetch_stocks_subreddit_posts(
        &self,
        Parameters(params): Parameters<FetchPostsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let payload = match self
            .control()
            .fetch_posts(params.subreddit.as_deref(), params.limit)
            .await
        {
            Ok(posts) => json!({ "posts": posts }),
            Err(err) => {
                error!(error = %err, "failed to fetch posts");
                helpers::error_payload(err.posts_message())
            }
        };
        Ok(CallToolResult::success(vec![Content::json(payload)?]))
    }

    #[tool(
        description = "Fetches a single Reddit post by id or URL, including score, upvote ratio, comment count, subreddit and top comments."
    )]
    async fn fetch_single_reddit_post(
        &self,
        Parameters(params): Parameters<FetchPostParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let payload = match self.control().fetch_post(&params.post_id).await {
            Ok(post) => json!({ "post": post }),
            Err(err) => {
                error!(error = %err, post_id = %params.post_id, "failed to fetch post");
                helpers::error_payload(err.post_message())
            }
        };
        Ok(CallToolResult::success(vec![Content::json(payload)?]))
    }
}
