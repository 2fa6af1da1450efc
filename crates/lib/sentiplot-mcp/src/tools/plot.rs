use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use sentiplot_model::{RawLink, RawRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::SentiplotMcp;
use crate::helpers;

/// Link to a post where the stock was mentioned.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PlotLinkParams {
    /// Absolute http(s) link to the post.
    pub url: String,
    /// Original post title, 1 to 200 characters.
    pub title: String,
}

/// One stock to plot.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PlotPointParams {
    /// Company name with the ticker in parentheses, e.g. 'Apple Inc. (AAPL)'.
    /// The ticker is 1 to 5 uppercase letters.
    pub symbol: String,
    /// Sentiment in [-1.0, 1.0]. 1.0 is very positive, 0.0 neutral, -1.0 very negative.
    pub sentiment: f64,
    /// Share of voice in [0.0, 1.0]. 1.0 means the stock appears in nearly every post.
    pub presence: f64,
    /// Reasoning behind the sentiment and presence values, at most 2000 characters.
    pub summary: String,
    /// Posts where the stock was mentioned.
    #[serde(default)]
    pub links: Vec<PlotLinkParams>,
}

/// Parameters for creating a plot.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreatePlotParams {
    /// One record per stock, plotted in this order.
    pub data: Vec<PlotPointParams>,
}

impl From<PlotLinkParams> for RawLink {
    fn from(link: PlotLinkParams) -> Self {
        Self {
            url: link.url,
            title: link.title,
        }
    }
}

impl From<PlotPointParams> for RawRecord {
    fn from(point: PlotPointParams) -> Self {
        Self {
            symbol: point.symbol,
            sentiment: point.sentiment,
            presence: point.presence,
            summary: point.summary,
            links: point.links.into_iter().map(RawLink::from).collect(),
        }
    }
}

#[tool_router(router = tool_router_plot, vis = "pub")]
impl SentiplotMcp {
    #[tool(
        description = "Shows a sentiment/presence plot of the given stocks to the user and returns the written file path. Always call make_stocks_plot_plan before this tool."
    )]
    async fn create_plot(
        &self,
        Parameters(params): Parameters<CreatePlotParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let raws = params.data.into_iter().map(RawRecord::from).collect();
        let report = self
            .control()
            .create_plot(raws)
            .await
            .map_err(helpers::map_control_err)?;
        info!(path = %report.path.display(), datasets = report.datasets, "plot created");
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }
}
