//! Core services for sentiplot.
//!
//! This crate renders validated analysis records into a standalone scatter
//! plot document, materializes that document for local viewing, and fetches
//! posts and comment trees from the forum API. The control plane ties the
//! pieces together for the MCP layer.

pub mod control;
pub mod display;
pub mod forum;
pub mod render;
