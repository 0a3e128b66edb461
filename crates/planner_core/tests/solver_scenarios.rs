//! End-to-end planning scenarios against the sample world.

use planner_core::data::UnitData;
use planner_core::prelude::*;
use planner_test_utils::fixtures::{
    barracks_goal, barracks_village, economy_goal, sample_config, sample_game_data,
    spear_research_goal, starter_village,
};
use planner_test_utils::init_test_tracing;

#[test]
fn barracks_needs_headquarters_first() {
    init_test_tracing();
    let data = sample_game_data();
    let config = sample_config();
    let solver = AStarSolver::new(&data, &config);
    let start = starter_village(&data, &config);

    let plan = solver.find_optimal_plan(&start, &barracks_goal()).unwrap();

    let main2 = plan.actions.iter().position(|a| *a == Action::build("main", 2));
    let main3 = plan.actions.iter().position(|a| *a == Action::build("main", 3));
    let barracks = plan.actions.iter().position(|a| *a == Action::build("barracks", 1));
    assert!(main2.is_some(), "{:?}", plan.actions);
    assert!(main2 < main3 && main3 < barracks, "{:?}", plan.actions);
    assert_eq!(plan.actions.last(), Some(&Action::build("barracks", 1)));
}

#[test]
fn plan_cost_matches_replay() {
    init_test_tracing();
    let data = sample_game_data();
    let config = sample_config();
    let solver = AStarSolver::new(&data, &config);
    let start = starter_village(&data, &config);

    let plan = solver.find_optimal_plan(&start, &barracks_goal()).unwrap();
    let replay = solver.simulator().simulate_plan(&start, &plan.actions).unwrap();

    assert_eq!(replay.time_cost, plan.total_seconds);
    assert!(replay.state.satisfies(&barracks_goal()));
}

#[test]
fn research_unlock_is_first_step() {
    init_test_tracing();
    let data = sample_game_data();
    let config = sample_config();
    let solver = AStarSolver::new(&data, &config);
    let start = barracks_village(&data, &config);

    let plan = solver.find_optimal_plan(&start, &spear_research_goal()).unwrap();
    assert_eq!(plan.first_action(), Some(&Action::research("spear", 1)));
    assert_eq!(plan.actions.len(), 1);
}

#[test]
fn goal_already_met_needs_nothing() {
    let data = sample_game_data();
    let config = sample_config();
    let solver = AStarSolver::new(&data, &config);
    let start = barracks_village(&data, &config);

    let plan = solver.find_optimal_plan(&start, &barracks_goal()).unwrap();
    assert!(plan.is_empty());
    assert_eq!(plan.total_seconds, Fixed::ZERO);
}

#[test]
fn economy_goal_is_reached() {
    init_test_tracing();
    let data = sample_game_data();
    let config = sample_config();
    let solver = AStarSolver::new(&data, &config);
    let start = starter_village(&data, &config);

    let plan = solver.find_optimal_plan(&start, &economy_goal()).unwrap();
    let replay = solver.simulator().simulate_plan(&start, &plan.actions).unwrap();
    assert!(replay.state.satisfies(&economy_goal()));
    assert!(plan.actions.iter().all(|a| matches!(a, Action::Build { .. })));
}

#[test]
fn unknown_building_goal_reports_transient_failure() {
    let data = sample_game_data();
    let config = sample_config().with_max_expansions(Some(500));
    let solver = AStarSolver::new(&data, &config);
    let start = starter_village(&data, &config);
    let goal = GameState::new().with_building("wall", 1);

    let err = solver.find_optimal_plan(&start, &goal).unwrap_err();
    assert_eq!(err, PlannerError::SearchBudgetExhausted { expanded: 500 });
    assert!(err.is_transient());
}

#[test]
fn full_build_queue_blocks_builds_not_research() {
    let data = sample_game_data();
    let config = sample_config();
    let solver = AStarSolver::new(&data, &config);
    let mut start = starter_village(&data, &config);
    start.building_queue = vec![
        QueueEntry::new("wood", 2, seconds(3600)),
        QueueEntry::new("stone", 2, seconds(3600)),
    ];

    // The queue is full right now, but research does not queue.
    let mut ready = barracks_village(&data, &config);
    ready.building_queue = start.building_queue.clone();
    let plan = solver.find_optimal_plan(&ready, &spear_research_goal()).unwrap();
    assert_eq!(plan.actions, vec![Action::research("spear", 1)]);

    // A build is blocked from a full queue, so no plan starts with one.
    let sim = solver.simulator();
    let blocked = sim
        .calculate_next_state(&start, &Action::build("main", 2))
        .unwrap();
    assert!(blocked.is_blocked());
}

#[test]
fn noble_unlock_path() {
    let mut data = sample_game_data();
    data.units.insert(
        "adelsgeschlecht".into(),
        UnitData {
            prerequisites: Prerequisites::from([
                ("adelshof".to_string(), 1),
                ("schmiede".to_string(), 20),
            ]),
            ..Default::default()
        },
    );
    let levels = LevelMap::from([("adelshof".to_string(), 0), ("schmiede".to_string(), 18)]);

    let plan = PlanGenerator::new(&data)
        .plan_for_unit("adelsgeschlecht", &levels)
        .unwrap();
    assert_eq!(
        plan,
        vec![
            Action::build("adelshof", 1),
            Action::build("schmiede", 19),
            Action::build("schmiede", 20),
            Action::recruit("adelsgeschlecht", 1),
        ]
    );
}
