//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::resources::Resources;

/// Tunables shared by the action generator, simulator and solver.
///
/// # Example RON
///
/// ```ron
/// PlannerConfig(
///     recruitment_batch_size: 10,
///     max_building_queue_depth: 2,
///     headquarters: "main",
///     max_expansions: Some(50000),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Units per generated recruit action.
    pub recruitment_batch_size: u32,

    /// Concurrent construction jobs before builds are blocked.
    ///
    /// Two matches the observed game; confirm against the target world's
    /// rules (premium accounts get more slots).
    pub max_building_queue_depth: usize,

    /// Concurrent jobs per recruit building before recruits are blocked.
    pub max_recruit_queue_depth: usize,

    /// Building whose level scales construction time.
    pub headquarters: String,

    /// Hourly income every village has before any producing building.
    pub base_production: Resources,

    /// Expansion budget for one search, `None` for unlimited.
    pub max_expansions: Option<usize>,
}

impl PlannerConfig {
    /// Default construction queue depth.
    pub const DEFAULT_MAX_BUILDING_QUEUE_DEPTH: usize = 2;

    /// Default expansion budget.
    pub const DEFAULT_MAX_EXPANSIONS: usize = 200_000;

    /// Parse a configuration from RON text. Missing fields keep their defaults.
    pub fn from_ron_str(ron: &str, source_name: &str) -> Result<Self> {
        ron::from_str(ron).map_err(|e| PlannerError::DataParse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Set the recruitment batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.recruitment_batch_size = batch_size;
        self
    }

    /// Set the expansion budget.
    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: Option<usize>) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            recruitment_batch_size: 10,
            max_building_queue_depth: Self::DEFAULT_MAX_BUILDING_QUEUE_DEPTH,
            max_recruit_queue_depth: Self::DEFAULT_MAX_BUILDING_QUEUE_DEPTH,
            headquarters: "main".to_string(),
            base_production: Resources::uniform(5),
            max_expansions: Some(Self::DEFAULT_MAX_EXPANSIONS),
        }
    }
}
