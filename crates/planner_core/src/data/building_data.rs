//! Building upgrade tables.

use serde::{Deserialize, Serialize};

use crate::resources::Resources;

/// One level of a building's upgrade table.
///
/// # Example RON
///
/// ```ron
/// BuildingUpgrade(
///     level: 2,
///     cost: (wood: 63, stone: 77, iron: 50, population: 1),
///     production: (wood: 35),
///     build_time: 1045,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingUpgrade {
    /// Level this entry upgrades to.
    pub level: u32,

    /// Resources paid for the upgrade; `population` is the extra population used.
    #[serde(default, alias = "resources")]
    pub cost: Resources,

    /// Hourly production at this level. Zero for non-producing buildings.
    #[serde(default)]
    pub production: Resources,

    /// Base construction time in seconds, before headquarters scaling.
    pub build_time: u32,
}

/// Static data for one building type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildingData {
    /// Highest level this building can reach.
    pub max_level: u32,

    /// Upgrade entries, one per level.
    #[serde(default)]
    pub upgrades: Vec<BuildingUpgrade>,
}

impl BuildingData {
    /// Get the upgrade entry for a level.
    #[must_use]
    pub fn upgrade(&self, level: u32) -> Option<&BuildingUpgrade> {
        self.upgrades.iter().find(|u| u.level == level)
    }

    /// Hourly production at a level. Zero if the level has no entry.
    #[must_use]
    pub fn production_at(&self, level: u32) -> Resources {
        self.upgrade(level)
            .map_or(Resources::ZERO, |upgrade| upgrade.production)
    }
}
