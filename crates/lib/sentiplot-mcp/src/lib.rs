//! MCP server implementation for sentiplot.
//!
//! This crate wires the control plane into rmcp tool handlers and exposes the
//! fetch, plan and plot tools plus the workflow prompt.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use rmcp::handler::server::router::prompt::PromptRouter;
use rmcp::{
    ErrorData,
    RoleServer,
    ServerHandler,
    handler::server::tool::ToolRouter,
    prompt,
    prompt_handler,
    prompt_router,
    service::RequestContext,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{
    CallToolResult,
    Content,
    GetPromptRequestParams,
    GetPromptResult,
    ListPromptsResult,
    PaginatedRequestParams,
    PromptMessage,
    PromptMessageRole,
    ServerCapabilities,
    ServerInfo,
};
use sentiplot_core::control::SentiplotControlPlane;

pub use tools::forum::{FetchPostParams, FetchPostsParams};
pub use tools::plot::{CreatePlotParams, PlotLinkParams, PlotPointParams};

const SERVER_INSTRUCTIONS: &str = r"sentiplot provides MCP tools for turning r/Stocks discussions into an interactive sentiment plot.

Workflow:
1. Call `make_stocks_plot_plan` first and follow the plan it returns.
2. Fetch the current hot posts with `fetch_stocks_subreddit_posts` (optional `subreddit`, `limit`).
3. Fetch promising posts in full with `fetch_single_reddit_post` (`post_id` is an id or a full Reddit link).
4. Score each stock and call `create_plot` with one record per stock.

Notes:
- `symbol` must look like `Apple Inc. (AAPL)`: a name, a space, and a 1-5 letter uppercase ticker in parentheses.
- `sentiment` is within [-1.0, 1.0] and `presence` within [0.0, 1.0].
- `summary` is plain text of at most 2000 characters; `links` are `{url, title}` pairs with absolute http(s) urls.
- Invalid records reject the whole batch and every violation is reported.
- Fetch failures come back as an `error` field in the result instead of tool errors.
- Use `help` for the command list. `health` returns `ok`.";

const PLOT_PROMPT: &str = "Please create a sentiment plot for the r/Stocks subreddit posts. \
Start by creating a plan by calling 'make_stocks_plot_plan' before you create the plot.";

/// MCP server wrapper around the control plane and tool routers.
#[derive(Clone)]
pub struct SentiplotMcp {
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
    control: Arc<SentiplotControlPlane>,
}

impl SentiplotMcp {
    /// Creates a new server using a control plane by value.
    #[must_use]
    pub fn new(control: SentiplotControlPlane) -> Self {
        Self::with_control(Arc::new(control))
    }

    /// Creates a new server using a shared control plane handle.
    #[must_use]
    pub fn with_control(control: Arc<SentiplotControlPlane>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_plan()
            + Self::tool_router_forum()
            + Self::tool_router_plot()
            + Self::tool_router_context();
        Self {
            tool_router,
            prompt_router: Self::prompt_router(),
            control,
        }
    }

    pub(crate) fn control(&self) -> &SentiplotControlPlane {
        &self.control
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl SentiplotMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[prompt_router]
impl SentiplotMcp {
    #[prompt(
        name = "make_r_stocks_plot",
        description = "Get a prompt to create a plot with the r/Stocks data."
    )]
    async fn make_r_stocks_plot(&self) -> Result<Vec<PromptMessage>, ErrorData> {
        Ok(vec![PromptMessage::new_text(PromptMessageRole::User, PLOT_PROMPT)])
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for SentiplotMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }
}
