//! MCP tool modules.
//!
//! Tools are grouped by domain: the analysis plan, forum fetches, plot
//! creation, and contextual help.

pub mod forum;
pub mod plot;
mod context;
mod plan;
