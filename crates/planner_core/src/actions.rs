//! The actions a plan is made of.
//!
//! Every action kind shares one contract: a description (via `Display`),
//! a resource cost read from the static tables, and an execution hook
//! that hands the action to whoever talks to the live game.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::GameData;
use crate::error::Result;
use crate::resources::Resources;

/// A discrete change-of-state operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Upgrade a building to `level`.
    Build {
        /// Building id.
        building: String,
        /// Level after the upgrade.
        level: u32,
    },
    /// Recruit `amount` units.
    Recruit {
        /// Unit id.
        unit: String,
        /// Number of units in the batch.
        amount: u32,
    },
    /// Research a unit to tier `level`.
    Research {
        /// Unit id.
        unit: String,
        /// Research tier after completion.
        level: u32,
    },
}

/// Applies actions to a live village.
///
/// Implemented outside the core by whatever owns the game session. The
/// planner itself never calls this.
pub trait VillageExecutor {
    /// Error returned by the live game.
    type Error;

    /// Queue a building upgrade.
    fn build(&mut self, building: &str, level: u32) -> std::result::Result<(), Self::Error>;

    /// Queue a recruitment batch.
    fn recruit(&mut self, unit: &str, amount: u32) -> std::result::Result<(), Self::Error>;

    /// Start a research.
    fn research(&mut self, unit: &str, level: u32) -> std::result::Result<(), Self::Error>;
}

impl Action {
    /// Create a build action.
    #[must_use]
    pub fn build(building: impl Into<String>, level: u32) -> Self {
        Self::Build {
            building: building.into(),
            level,
        }
    }

    /// Create a recruit action.
    #[must_use]
    pub fn recruit(unit: impl Into<String>, amount: u32) -> Self {
        Self::Recruit {
            unit: unit.into(),
            amount,
        }
    }

    /// Create a research action.
    #[must_use]
    pub fn research(unit: impl Into<String>, level: u32) -> Self {
        Self::Research {
            unit: unit.into(),
            level,
        }
    }

    /// Resource cost of this action, population included.
    ///
    /// # Errors
    ///
    /// Returns a data-integrity error if the static tables have no entry
    /// for this building level, unit, or research tier.
    pub fn cost(&self, data: &GameData) -> Result<Resources> {
        match self {
            Self::Build { building, level } => Ok(data.building_upgrade(building, *level)?.cost),
            Self::Recruit { unit, amount } => Ok(data.unit(unit)?.batch_cost(*amount)),
            Self::Research { unit, level } => Ok(data.research_upgrade(unit, *level)?.cost),
        }
    }

    /// Hand this action to a live-game executor.
    pub fn execute<E: VillageExecutor>(
        &self,
        executor: &mut E,
    ) -> std::result::Result<(), E::Error> {
        match self {
            Self::Build { building, level } => executor.build(building, *level),
            Self::Recruit { unit, amount } => executor.recruit(unit, *amount),
            Self::Research { unit, level } => executor.research(unit, *level),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build { building, level } => write!(f, "Build {building} to level {level}"),
            Self::Recruit { unit, amount } => write!(f, "Recruit {amount} {unit}"),
            Self::Research { unit, level } => write!(f, "Research {unit} to level {level}"),
        }
    }
}
