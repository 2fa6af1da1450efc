use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::SentiplotMcp;

/// Payload listing the MCP commands.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List MCP commands and what they are for.".to_string(),
                "make_stocks_plot_plan - Returns the step-by-step plan for building a sentiment plot."
                    .to_string(),
                "fetch_stocks_subreddit_posts - Fetch hot posts (optional subreddit and limit)."
                    .to_string(),
                "fetch_single_reddit_post - Fetch one post with engagement metrics and top comments."
                    .to_string(),
                "create_plot - Validate stock records, render the plot and open it for the user."
                    .to_string(),
                "health - Returns ok.".to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl SentiplotMcp {
    #[tool(description = "List the MCP commands to get context with how this MCP server works.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}
