//! Legal-action enumeration.
//!
//! The generator answers "what could the village start next?" from levels
//! and prerequisites alone. It never checks affordability or queue space;
//! the simulator prices those as waiting time.

use crate::actions::Action;
use crate::config::PlannerConfig;
use crate::data::GameData;
use crate::state::GameState;

/// Enumerates the actions legal at a state.
#[derive(Debug, Clone, Copy)]
pub struct ActionGenerator<'a> {
    data: &'a GameData,
    config: &'a PlannerConfig,
}

impl<'a> ActionGenerator<'a> {
    /// Create a generator over static data and planner configuration.
    #[must_use]
    pub const fn new(data: &'a GameData, config: &'a PlannerConfig) -> Self {
        Self { data, config }
    }

    /// All actions legal at `state`, in deterministic order.
    ///
    /// Builds first (building id order), then recruits, then research.
    #[must_use]
    pub fn generate(&self, state: &GameState) -> Vec<Action> {
        let mut actions = Vec::new();
        self.push_build_actions(state, &mut actions);
        self.push_recruit_actions(state, &mut actions);
        self.push_research_actions(state, &mut actions);
        actions
    }

    fn push_build_actions(&self, state: &GameState, actions: &mut Vec<Action>) {
        for (building, data) in &self.data.buildings {
            let level = state.building_level(building);
            if level >= data.max_level {
                continue;
            }
            let unlocked = self
                .data
                .building_prerequisites_of(building)
                .map_or(true, |prerequisites| state.meets(prerequisites));
            if unlocked {
                actions.push(Action::build(building.clone(), level + 1));
            }
        }
    }

    fn push_recruit_actions(&self, state: &GameState, actions: &mut Vec<Action>) {
        if self.config.recruitment_batch_size == 0 {
            return;
        }
        for (unit, data) in &self.data.units {
            if state.research_level(unit) == 0 {
                continue;
            }
            let amount =
                data.recruitable(state.troop_count(unit), self.config.recruitment_batch_size);
            if amount > 0 {
                actions.push(Action::recruit(unit.clone(), amount));
            }
        }
    }

    fn push_research_actions(&self, state: &GameState, actions: &mut Vec<Action>) {
        for (unit, data) in &self.data.research {
            let level = state.research_level(unit);
            if level >= data.max_level {
                continue;
            }
            let unlocked = self
                .data
                .research_prerequisites_of(unit)
                .map_or(true, |prerequisites| state.meets(prerequisites));
            if unlocked {
                actions.push(Action::research(unit.clone(), level + 1));
            }
        }
    }
}
