//! # Village Planner Tools
//!
//! Command-line tooling around the planning core:
//! - Scenario loading (start village, goal, planner config)
//! - Plan and replay reports
//! - Data validators

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod report;
pub mod scenario;
pub mod validate;

pub use error::{ToolError, ToolResult};
