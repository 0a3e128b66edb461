//! The complete static data set consumed by the planner.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{BuildingData, BuildingUpgrade, ResearchData, ResearchUpgrade, UnitData};
use crate::error::{PlannerError, Result};

/// Required building levels, keyed by building id.
pub type Prerequisites = BTreeMap<String, u32>;

/// All static tables for one game world.
///
/// Loaded once and read-only while planning. Every map is ordered so that
/// iteration, and therefore action generation, is deterministic.
///
/// # Example RON
///
/// ```ron
/// GameData(
///     buildings: {
///         "main": (max_level: 30, upgrades: [
///             (level: 1, cost: (wood: 90, stone: 80, iron: 70, population: 5), build_time: 90),
///         ]),
///     },
///     units: {},
///     research: {},
///     building_prerequisites: {"barracks": {"main": 3}},
///     research_prerequisites: {},
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameData {
    /// Upgrade tables by building id.
    pub buildings: BTreeMap<String, BuildingData>,

    /// Recruitment data by unit id.
    pub units: BTreeMap<String, UnitData>,

    /// Research tables by unit id.
    pub research: BTreeMap<String, ResearchData>,

    /// Building levels required before a building may be upgraded.
    pub building_prerequisites: BTreeMap<String, Prerequisites>,

    /// Building levels required before a unit may be researched.
    pub research_prerequisites: BTreeMap<String, Prerequisites>,
}

impl GameData {
    /// Parse game data from RON text.
    ///
    /// `source_name` labels the input in error messages.
    pub fn from_ron_str(ron: &str, source_name: &str) -> Result<Self> {
        ron::from_str(ron).map_err(|e| PlannerError::DataParse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Upgrade entry for a building level.
    pub fn building_upgrade(&self, building: &str, level: u32) -> Result<&BuildingUpgrade> {
        self.buildings
            .get(building)
            .and_then(|data| data.upgrade(level))
            .ok_or_else(|| PlannerError::MissingBuildingData {
                building: building.to_string(),
                level,
            })
    }

    /// Recruitment data for a unit.
    pub fn unit(&self, unit: &str) -> Result<&UnitData> {
        self.units
            .get(unit)
            .ok_or_else(|| PlannerError::MissingUnitData(unit.to_string()))
    }

    /// Research entry for a unit tier.
    pub fn research_upgrade(&self, unit: &str, level: u32) -> Result<&ResearchUpgrade> {
        self.research
            .get(unit)
            .and_then(|data| data.upgrade(level))
            .ok_or_else(|| PlannerError::MissingResearchData {
                unit: unit.to_string(),
                level,
            })
    }

    /// Highest level of a building, if the building has a table.
    #[must_use]
    pub fn max_building_level(&self, building: &str) -> Option<u32> {
        self.buildings.get(building).map(|data| data.max_level)
    }

    /// Prerequisites for upgrading a building, if any are listed.
    #[must_use]
    pub fn building_prerequisites_of(&self, building: &str) -> Option<&Prerequisites> {
        self.building_prerequisites.get(building)
    }

    /// Prerequisites for researching a unit, if any are listed.
    #[must_use]
    pub fn research_prerequisites_of(&self, unit: &str) -> Option<&Prerequisites> {
        self.research_prerequisites.get(unit)
    }

    /// Validate table integrity.
    ///
    /// Returns a list of validation errors. An empty list means every
    /// level the planner can reach has an entry and every reference
    /// points at a known building.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (id, building) in &self.buildings {
            for level in 1..=building.max_level {
                if building.upgrade(level).is_none() {
                    errors.push(format!("Building '{id}' has no upgrade entry for level {level}"));
                }
            }
            for upgrade in &building.upgrades {
                if upgrade.level == 0 || upgrade.level > building.max_level {
                    errors.push(format!(
                        "Building '{id}' has upgrade level {} outside 1..={}",
                        upgrade.level, building.max_level
                    ));
                }
            }
        }

        for (id, research) in &self.research {
            for level in 1..=research.max_level {
                if research.upgrade(level).is_none() {
                    errors.push(format!("Research '{id}' has no entry for level {level}"));
                }
            }
        }

        for (id, unit) in &self.units {
            match unit.recruit_building() {
                Some(building) if !self.buildings.contains_key(building) => {
                    errors.push(format!(
                        "Unit '{id}' is recruited at unknown building '{building}'"
                    ));
                }
                Some(_) => {}
                None => errors.push(format!("Unit '{id}' has no recruit building")),
            }
        }

        let prerequisite_sets = [
            ("Building", &self.building_prerequisites),
            ("Research", &self.research_prerequisites),
        ];
        for (kind, map) in prerequisite_sets {
            for (id, prerequisites) in map {
                for (required, level) in prerequisites {
                    match self.max_building_level(required) {
                        None => errors.push(format!(
                            "{kind} '{id}' requires unknown building '{required}'"
                        )),
                        Some(max) if *level > max => errors.push(format!(
                            "{kind} '{id}' requires '{required}' level {level}, above its max {max}"
                        )),
                        Some(_) => {}
                    }
                }
            }
        }

        errors
    }
}
