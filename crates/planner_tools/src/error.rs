//! Error type for the command-line tools.

use std::path::PathBuf;

use planner_core::PlannerError;
use thiserror::Error;

/// Result alias using [`ToolError`].
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Errors raised while loading inputs or running the planner.
#[derive(Error, Debug)]
pub enum ToolError {
    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A scenario file is not valid RON.
    #[error("Failed to parse scenario {}: {source}", path.display())]
    ScenarioParse {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: ron::error::SpannedError,
    },

    /// The planning core rejected the input or found no plan.
    #[error(transparent)]
    Planner(#[from] PlannerError),

    /// A report could not be serialized.
    #[error("Failed to write JSON report: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation found problems.
    #[error("{} validation error(s):\n  {}", .0.len(), .0.join("\n  "))]
    Invalid(Vec<String>),
}

impl ToolError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Planner(err) if err.is_transient() => 2,
            Self::Invalid(_) => 3,
            _ => 1,
        }
    }
}
