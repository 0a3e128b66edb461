//! Unit recruitment data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::resources::Resources;

/// Static recruitment data for one unit type.
///
/// # Example RON
///
/// ```ron
/// UnitData(
///     cost: (wood: 50, stone: 30, iron: 10, population: 1),
///     build_time: 136,
///     recruited_at: Some("barracks"),
///     prerequisites: {"barracks": 1},
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitData {
    /// Cost of a single unit; `population` is the population one unit uses.
    #[serde(default, alias = "resources")]
    pub cost: Resources,

    /// Training time of a single unit in seconds.
    #[serde(default)]
    pub build_time: u32,

    /// Building whose recruit queue trains this unit.
    ///
    /// Falls back to the first building prerequisite when absent.
    #[serde(default)]
    pub recruited_at: Option<String>,

    /// Building levels required before the unit can be recruited.
    #[serde(default)]
    pub prerequisites: BTreeMap<String, u32>,

    /// Highest recruitable count, zero for unlimited.
    #[serde(default)]
    pub max_level: u32,
}

impl UnitData {
    /// Building whose recruit queue trains this unit, if known.
    #[must_use]
    pub fn recruit_building(&self) -> Option<&str> {
        self.recruited_at
            .as_deref()
            .or_else(|| self.prerequisites.keys().next().map(String::as_str))
    }

    /// Units a batch of `batch` may add on top of `current` without
    /// passing `max_level`. Zero once the cap is reached.
    #[must_use]
    pub fn recruitable(&self, current: u32, batch: u32) -> u32 {
        if self.max_level == 0 {
            batch
        } else {
            batch.min(self.max_level.saturating_sub(current))
        }
    }

    /// Cost of recruiting `amount` units, population included.
    #[must_use]
    pub const fn batch_cost(&self, amount: u32) -> Resources {
        self.cost.scaled(amount as i64)
    }

    /// Serial training time of `amount` units in seconds.
    #[must_use]
    pub const fn batch_time(&self, amount: u32) -> u64 {
        self.build_time as u64 * amount as u64
    }
}
