//! Scenario loading.
//!
//! A scenario pairs a start village with a goal and the planner settings
//! to search with. The `simulate` command also reads a fixed action list
//! from it.

use std::path::Path;

use planner_core::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};

/// One planning problem.
///
/// # Example RON
///
/// ```ron
/// Scenario(
///     name: "First barracks",
///     start: (
///         resources: (wood: 500, stone: 500, iron: 500),
///         building_levels: {"main": 1, "wood": 1},
///     ),
///     goal: (building_levels: {"barracks": 1}),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Village snapshot to plan from.
    pub start: GameState,
    /// Levels to reach. Keys left out carry no requirement.
    pub goal: GameState,
    /// Planner settings.
    #[serde(default)]
    pub config: PlannerConfig,
    /// Recompute the start income from building levels before planning.
    #[serde(default = "default_derive_income")]
    pub derive_income: bool,
    /// Fixed action list for replay.
    #[serde(default)]
    pub actions: Vec<Action>,
}

const fn default_derive_income() -> bool {
    true
}

impl Scenario {
    /// Load a scenario from a RON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> ToolResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ToolError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ToolError::ScenarioParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The start state the planner should see.
    ///
    /// With `derive_income` set, income is recomputed from the start
    /// building levels so the first edge and later edges agree.
    #[must_use]
    pub fn prepared_start(&self, data: &GameData) -> GameState {
        let mut start = self.start.clone();
        if self.derive_income {
            start.resource_income =
                VillageSimulator::new(data, &self.config).compute_income(&start.building_levels);
        }
        start
    }

    /// Goal and replay entries that reference ids missing from `data`.
    #[must_use]
    pub fn unknown_references(&self, data: &GameData) -> Vec<String> {
        let mut errors = Vec::new();
        let levels = self
            .start
            .building_levels
            .keys()
            .chain(self.goal.building_levels.keys());
        for building in levels {
            if !data.buildings.contains_key(building) {
                errors.push(format!(
                    "Scenario '{}' references unknown building '{building}'",
                    self.name
                ));
            }
        }
        let units = self
            .goal
            .troop_levels
            .keys()
            .chain(self.goal.research_levels.keys());
        for unit in units {
            if !data.units.contains_key(unit) && !data.research.contains_key(unit) {
                errors.push(format!(
                    "Scenario '{}' references unknown unit '{unit}'",
                    self.name
                ));
            }
        }
        for action in &self.actions {
            if let Err(err) = action.cost(data) {
                errors.push(format!("Scenario '{}' action '{action}': {err}", self.name));
            }
        }
        errors
    }
}
