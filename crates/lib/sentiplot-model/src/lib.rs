//! Validated record model for sentiplot.
//!
//! This crate defines the shape of one analyzable unit (a stock symbol with its
//! sentiment, presence, summary and supporting links), the explicit validation
//! that admits raw caller input into that shape, and the chart dataset
//! descriptors the renderer derives from validated records.

pub mod models;
pub mod schema;
pub mod validate;

pub use models::*;
pub use validate::{Constraint, ValidationError, ValidationErrors, validate_batch};
