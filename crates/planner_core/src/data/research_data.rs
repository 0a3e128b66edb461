//! Unit research tables.

use serde::{Deserialize, Serialize};

use crate::resources::Resources;

/// One tier of a unit's research table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchUpgrade {
    /// Research tier this entry unlocks.
    pub level: u32,

    /// Resources paid for the research.
    #[serde(default, alias = "resources")]
    pub cost: Resources,

    /// Research time in seconds.
    pub research_time: u32,
}

/// Static research data for one unit type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResearchData {
    /// Highest research tier.
    pub max_level: u32,

    /// Research entries, one per tier.
    #[serde(default)]
    pub upgrades: Vec<ResearchUpgrade>,
}

impl ResearchData {
    /// Get the research entry for a tier.
    #[must_use]
    pub fn upgrade(&self, level: u32) -> Option<&ResearchUpgrade> {
        self.upgrades.iter().find(|u| u.level == level)
    }
}
