//! Test fixtures and helpers.
//!
//! The sample world is the `data/game_data.ron` file shipped with the
//! repository, so fixtures and the command-line tool plan against the
//! same tables.

use planner_core::prelude::*;

/// The shipped sample world, as RON text.
pub const GAME_DATA_RON: &str = include_str!("../../../data/game_data.ron");

/// Parse the shipped sample world.
///
/// # Panics
///
/// Panics if the shipped data file does not parse.
#[must_use]
pub fn sample_game_data() -> GameData {
    match GameData::from_ron_str(GAME_DATA_RON, "data/game_data.ron") {
        Ok(data) => data,
        Err(err) => panic!("sample game data is broken: {err}"),
    }
}

/// Default planner configuration.
#[must_use]
pub fn sample_config() -> PlannerConfig {
    PlannerConfig::default()
}

/// A fresh village: every starting building at level 1, 500 of each
/// resource, income derived from the levels.
#[must_use]
pub fn starter_village(data: &GameData, config: &PlannerConfig) -> GameState {
    let mut state = GameState::new().with_resources(Resources::uniform(500));
    for building in ["main", "wood", "stone", "iron", "farm", "storage"] {
        state = state.with_building(building, 1);
    }
    state.resource_income =
        VillageSimulator::new(data, config).compute_income(&state.building_levels);
    state
}

/// A village with a barracks ready to research spears.
#[must_use]
pub fn barracks_village(data: &GameData, config: &PlannerConfig) -> GameState {
    let mut state = starter_village(data, config)
        .with_building("main", 3)
        .with_building("barracks", 1);
    state.resource_income =
        VillageSimulator::new(data, config).compute_income(&state.building_levels);
    state
}

/// Goal: a level 1 barracks.
#[must_use]
pub fn barracks_goal() -> GameState {
    GameState::new().with_building("barracks", 1)
}

/// Goal: spears researched.
#[must_use]
pub fn spear_research_goal() -> GameState {
    GameState::new().with_research("spear", 1)
}

/// Goal: a small economy push.
#[must_use]
pub fn economy_goal() -> GameState {
    GameState::new()
        .with_building("wood", 3)
        .with_building("stone", 3)
        .with_building("iron", 2)
}
