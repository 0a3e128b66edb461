//! Prerequisite-driven plan skeletons.
//!
//! Unlike the solver this does no pricing: it lists the builds a unit's
//! prerequisites demand, lowest level first, and ends with a single
//! recruit. Useful for previewing what unlocking a unit involves.

use crate::actions::Action;
use crate::data::GameData;
use crate::error::Result;
use crate::state::LevelMap;

/// Builds the unlock path for a unit.
#[derive(Debug, Clone, Copy)]
pub struct PlanGenerator<'a> {
    data: &'a GameData,
}

impl<'a> PlanGenerator<'a> {
    /// Create a generator over static data.
    #[must_use]
    pub const fn new(data: &'a GameData) -> Self {
        Self { data }
    }

    /// Actions that take `levels` to the unit's prerequisites, then recruit one.
    ///
    /// Builds are emitted one level at a time in ascending level order, with
    /// buildings in id order within a level, so every build is legal when
    /// its turn comes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PlannerError::MissingUnitData`] for an unknown unit.
    pub fn plan_for_unit(&self, unit: &str, levels: &LevelMap) -> Result<Vec<Action>> {
        let prerequisites = &self.data.unit(unit)?.prerequisites;
        let highest = prerequisites.values().copied().max().unwrap_or(0);

        let mut plan = Vec::new();
        for level in 1..=highest {
            for (building, target) in prerequisites {
                let current = levels.get(building).copied().unwrap_or(0);
                if level <= *target && level > current {
                    plan.push(Action::build(building.clone(), level));
                }
            }
        }
        plan.push(Action::recruit(unit, 1));
        Ok(plan)
    }
}
