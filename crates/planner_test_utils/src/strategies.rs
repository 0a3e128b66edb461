//! Proptest strategies for planner property tests.
//!
//! These strategies generate random but reproducible villages and goals
//! over the building and unit ids of the sample world.

use proptest::prelude::*;

use planner_core::prelude::*;

/// Building ids present in the sample world.
pub static BUILDINGS: [&str; 8] = [
    "barracks", "farm", "iron", "main", "smith", "stone", "storage", "wood",
];

/// Unit ids present in the sample world.
pub static UNITS: [&str; 3] = ["axe", "spear", "sword"];

/// Generate a resource stock, possibly in deficit.
pub fn arb_resources() -> impl Strategy<Value = Resources> {
    (-1_000i64..10_000, -1_000i64..10_000, -1_000i64..10_000, 0i64..500)
        .prop_map(|(wood, stone, iron, population)| Resources::new(wood, stone, iron, population))
}

/// Generate an hourly income, including zero and negative rates.
pub fn arb_income() -> impl Strategy<Value = Resources> {
    (-50i64..5_000, -50i64..5_000, -50i64..5_000)
        .prop_map(|(wood, stone, iron)| Resources::new(wood, stone, iron, 0))
}

/// Generate a wait in whole seconds, up to a week.
pub fn arb_elapsed() -> impl Strategy<Value = Fixed> {
    (0i64..604_800).prop_map(seconds)
}

/// Generate a level map over `ids`, including explicit zeros.
pub fn arb_level_map(
    ids: &'static [&'static str],
    max_level: u32,
) -> impl Strategy<Value = LevelMap> {
    proptest::collection::vec((proptest::sample::select(ids), 0..=max_level), 0..ids.len())
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(id, level)| (id.to_string(), level))
                .collect()
        })
}

/// Generate a village with empty queues.
pub fn arb_game_state() -> impl Strategy<Value = GameState> {
    (
        arb_resources(),
        arb_income(),
        arb_level_map(&BUILDINGS, 10),
        arb_level_map(&UNITS, 200),
        arb_level_map(&UNITS, 1),
    )
        .prop_map(|(resources, resource_income, building_levels, troop_levels, research_levels)| {
            GameState {
                resources,
                resource_income,
                building_levels,
                troop_levels,
                research_levels,
                ..GameState::default()
            }
        })
}

/// Generate a goal naming a few buildings and research levels.
pub fn arb_goal() -> impl Strategy<Value = GameState> {
    (arb_level_map(&BUILDINGS, 10), arb_level_map(&UNITS, 1)).prop_map(
        |(building_levels, research_levels)| GameState {
            building_levels,
            research_levels,
            ..GameState::default()
        },
    )
}

/// Generate an action over the sample world's ids.
pub fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (proptest::sample::select(&BUILDINGS[..]), 1u32..=10)
            .prop_map(|(building, level)| Action::build(building, level)),
        (proptest::sample::select(&UNITS[..]), 1u32..=20)
            .prop_map(|(unit, amount)| Action::recruit(unit, amount)),
        proptest::sample::select(&UNITS[..]).prop_map(|unit| Action::research(unit, 1)),
    ]
}
