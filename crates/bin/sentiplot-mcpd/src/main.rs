//! Daemon entry point for the sentiplot MCP server.
//!
//! Loads configuration from the environment, builds the control plane, and
//! serves the MCP protocol over stdio or streamable HTTP.

mod config;
mod control;

use std::sync::Arc;

use sentiplot_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::SentiplotConfig;
use crate::control::build_control_plane;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    // stdout carries the stdio transport
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = SentiplotConfig::from_args()?;
    let control = Arc::new(build_control_plane(&config)?);

    if config.enable_stdio {
        tracing::info!("serving MCP over stdio");
        serve_stdio(control).await
    } else {
        serve_streamable_http(control, McpHttpServerConfig::new(config.mcp_http_addr)).await
    }
}
