//! A* search over village states.
//!
//! Nodes are village snapshots, edges are actions priced in seconds by the
//! [`VillageSimulator`], and the heuristic is the slowest single jump to a
//! goal level. Search nodes live in an arena and point at their parent by
//! index; the arena is dropped when the search returns.
//!
//! States are deduplicated by [`GameState::canonical_hash`], which ignores
//! resources and queues. The first path to reach a set of levels wins even
//! if a later path would arrive there richer.

use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::action_generator::ActionGenerator;
use crate::actions::Action;
use crate::config::PlannerConfig;
use crate::data::GameData;
use crate::error::{PlannerError, Result};
use crate::math::{add_time, is_infinite, Fixed};
use crate::priority_queue::PriorityQueue;
use crate::simulator::VillageSimulator;
use crate::state::GameState;

/// Bounds on a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after expanding this many states.
    pub max_expansions: Option<usize>,
    /// Stop once this instant has passed.
    pub deadline: Option<Instant>,
}

impl SearchLimits {
    /// No limits at all.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_expansions: None,
            deadline: None,
        }
    }

    /// The configured expansion budget, no deadline.
    #[must_use]
    pub const fn from_config(config: &PlannerConfig) -> Self {
        Self {
            max_expansions: config.max_expansions,
            deadline: None,
        }
    }

    /// Set the expansion budget.
    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Set the wall-clock deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Actions in execution order. Empty when the start already meets the goal.
    pub actions: Vec<Action>,
    /// Simulated seconds until the last action completes.
    pub total_seconds: Fixed,
    /// States expanded while searching.
    pub expanded: usize,
}

impl Plan {
    /// The action to execute now, if any.
    #[must_use]
    pub fn first_action(&self) -> Option<&Action> {
        self.actions.first()
    }

    /// Returns true if there is nothing left to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// A node in the search arena.
#[derive(Debug)]
struct SearchNode {
    state: GameState,
    action: Option<Action>,
    parent: Option<usize>,
    g: Fixed,
}

/// Optimal-time planner.
#[derive(Debug, Clone, Copy)]
pub struct AStarSolver<'a> {
    config: &'a PlannerConfig,
    generator: ActionGenerator<'a>,
    simulator: VillageSimulator<'a>,
}

impl<'a> AStarSolver<'a> {
    /// Create a solver over static data and planner configuration.
    #[must_use]
    pub const fn new(data: &'a GameData, config: &'a PlannerConfig) -> Self {
        Self {
            config,
            generator: ActionGenerator::new(data, config),
            simulator: VillageSimulator::new(data, config),
        }
    }

    /// The simulator used to price edges.
    #[must_use]
    pub const fn simulator(&self) -> &VillageSimulator<'a> {
        &self.simulator
    }

    /// Find the fastest action sequence from `start` to a state meeting `goal`.
    ///
    /// Uses the configured expansion budget and no deadline.
    ///
    /// # Errors
    ///
    /// [`PlannerError::NoPlanFound`] if the goal is unreachable, or
    /// [`PlannerError::SearchBudgetExhausted`] if the budget runs out.
    pub fn find_optimal_plan(&self, start: &GameState, goal: &GameState) -> Result<Plan> {
        self.find_optimal_plan_with_limits(start, goal, SearchLimits::from_config(self.config))
    }

    /// Find the fastest action sequence under explicit limits.
    ///
    /// Actions whose static data is missing are skipped, as are edges that
    /// cannot complete in finite time.
    ///
    /// # Errors
    ///
    /// [`PlannerError::NoPlanFound`] when the open set empties,
    /// [`PlannerError::SearchBudgetExhausted`] or
    /// [`PlannerError::DeadlineExceeded`] when a limit stops the search.
    pub fn find_optimal_plan_with_limits(
        &self,
        start: &GameState,
        goal: &GameState,
        limits: SearchLimits,
    ) -> Result<Plan> {
        let mut arena = vec![SearchNode {
            state: start.clone(),
            action: None,
            parent: None,
            g: Fixed::ZERO,
        }];
        let mut open = PriorityQueue::new();
        open.push(self.heuristic(start, goal), 0_usize);
        let mut closed: HashSet<String> = HashSet::new();
        let mut expanded = 0_usize;

        while let Some((f, index)) = open.pop() {
            let node = &arena[index];
            if node.state.satisfies(goal) {
                let plan = Self::reconstruct(&arena, index, expanded);
                #[cfg(feature = "debug-validation")]
                debug_assert_eq!(
                    self.simulator
                        .simulate_plan(start, &plan.actions)
                        .map(|replay| replay.time_cost)
                        .ok(),
                    Some(plan.total_seconds),
                    "plan cost diverges from replay"
                );
                debug!(
                    actions = plan.actions.len(),
                    expanded,
                    cost_seconds = %plan.total_seconds,
                    "Plan found"
                );
                return Ok(plan);
            }

            let hash = node.state.canonical_hash();
            if closed.contains(&hash) {
                continue;
            }

            if limits.max_expansions.is_some_and(|max| expanded >= max) {
                warn!(expanded, "Search budget exhausted");
                return Err(PlannerError::SearchBudgetExhausted { expanded });
            }
            if limits.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                warn!(expanded, "Planning deadline exceeded");
                return Err(PlannerError::DeadlineExceeded { expanded });
            }

            trace!(hash = %hash, g = %node.g, f = %f, "Expanding");
            expanded += 1;
            let children = self.expand(node, index, goal, &closed);
            closed.insert(hash);

            for (priority, child) in children {
                open.push(priority, arena.len());
                arena.push(child);
            }
        }

        debug!(expanded, "Open set exhausted");
        Err(PlannerError::NoPlanFound { expanded })
    }

    /// Estimated seconds from `state` to `goal`.
    ///
    /// The maximum over every deficit of the time needed to afford jumping
    /// straight to the goal level (or, for troops, the whole missing batch).
    /// Deficits without static data contribute nothing. Never negative.
    #[must_use]
    pub fn heuristic(&self, state: &GameState, goal: &GameState) -> Fixed {
        let buildings = goal
            .building_levels
            .iter()
            .filter(|(building, level)| state.building_level(building) < **level)
            .map(|(building, level)| Action::build(building.clone(), *level));
        let troops = goal
            .troop_levels
            .iter()
            .filter(|(unit, count)| state.troop_count(unit) < **count)
            .map(|(unit, count)| Action::recruit(unit.clone(), count - state.troop_count(unit)));
        let research = goal
            .research_levels
            .iter()
            .filter(|(unit, level)| state.research_level(unit) < **level)
            .map(|(unit, level)| Action::research(unit.clone(), *level));

        buildings
            .chain(troops)
            .chain(research)
            .filter_map(|jump| self.simulator.action_time_to_afford(state, &jump).ok())
            .fold(Fixed::ZERO, Fixed::max)
    }

    /// Price every legal action from `node`, returning the children worth queuing.
    fn expand(
        &self,
        node: &SearchNode,
        index: usize,
        goal: &GameState,
        closed: &HashSet<String>,
    ) -> Vec<(Fixed, SearchNode)> {
        let mut children = Vec::new();
        for action in self.generator.generate(&node.state) {
            let transition = match self.simulator.calculate_next_state(&node.state, &action) {
                Ok(transition) => transition,
                Err(err) => {
                    trace!(%action, error = %err, "Skipping action");
                    continue;
                }
            };
            let g = add_time(node.g, transition.time_cost);
            if is_infinite(g) {
                continue;
            }
            if closed.contains(&transition.state.canonical_hash()) {
                continue;
            }
            let f = add_time(g, self.heuristic(&transition.state, goal));
            children.push((
                f,
                SearchNode {
                    state: transition.state,
                    action: Some(action),
                    parent: Some(index),
                    g,
                },
            ));
        }
        children
    }

    fn reconstruct(arena: &[SearchNode], goal_index: usize, expanded: usize) -> Plan {
        let mut actions = Vec::new();
        let mut cursor = Some(goal_index);
        while let Some(index) = cursor {
            let node = &arena[index];
            if let Some(action) = &node.action {
                actions.push(action.clone());
            }
            cursor = node.parent;
        }
        actions.reverse();
        Plan {
            actions,
            total_seconds: arena[goal_index].g,
            expanded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BuildingData, BuildingUpgrade, ResearchData, ResearchUpgrade, UnitData};
    use crate::math::seconds;
    use crate::resources::Resources;

    fn building(cost: Resources, production: i64, build_time: u32) -> BuildingData {
        BuildingData {
            max_level: 1,
            upgrades: vec![BuildingUpgrade {
                level: 1,
                cost,
                production: Resources::new(production, 0, 0, 0),
                build_time,
            }],
        }
    }

    /// A cheap producer and an expensive non-producer, both one level deep.
    fn two_building_data() -> GameData {
        let mut data = GameData::default();
        data.buildings
            .insert("wood".into(), building(Resources::new(50, 60, 40, 5), 30, 100));
        data.buildings.insert(
            "barracks".into(),
            building(Resources::new(200, 170, 90, 7), 0, 1000),
        );
        data
    }

    fn base_state() -> GameState {
        GameState::new()
            .with_resources(Resources::uniform(100))
            .with_income(Resources::uniform(5))
    }

    #[test]
    fn test_goal_already_met_is_empty_plan() {
        let data = two_building_data();
        let config = PlannerConfig::default();
        let solver = AStarSolver::new(&data, &config);
        let start = base_state().with_building("wood", 1);
        let goal = GameState::new().with_building("wood", 1);

        let plan = solver.find_optimal_plan(&start, &goal).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.first_action(), None);
        assert_eq!(plan.total_seconds, Fixed::ZERO);
        assert_eq!(plan.expanded, 0);
    }

    #[test]
    fn test_goal_already_met_ignores_expired_deadline() {
        let data = two_building_data();
        let config = PlannerConfig::default();
        let solver = AStarSolver::new(&data, &config);
        let limits = SearchLimits::unlimited().with_deadline(Instant::now());
        let plan = solver
            .find_optimal_plan_with_limits(&base_state(), &GameState::new(), limits)
            .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_research_unlock() {
        let mut data = GameData::default();
        data.research.insert(
            "spear".into(),
            ResearchData {
                max_level: 1,
                upgrades: vec![ResearchUpgrade {
                    level: 1,
                    cost: Resources::new(100, 0, 0, 0),
                    research_time: 600,
                }],
            },
        );
        let config = PlannerConfig::default();
        let solver = AStarSolver::new(&data, &config);
        let start = GameState::new().with_income(Resources::uniform(100));
        let goal = GameState::new().with_research("spear", 1);

        let plan = solver.find_optimal_plan(&start, &goal).unwrap();
        assert_eq!(plan.actions, vec![Action::research("spear", 1)]);
        // One hour to afford, ten minutes to research.
        assert_eq!(plan.total_seconds, seconds(3600 + 600));
    }

    #[test]
    fn test_recruits_stop_at_unit_cap() {
        let mut data = GameData::default();
        data.units.insert(
            "spear".into(),
            UnitData {
                cost: Resources::new(1, 0, 0, 1),
                build_time: 10,
                max_level: 25,
                ..Default::default()
            },
        );
        let config = PlannerConfig::default().with_batch_size(10);
        let solver = AStarSolver::new(&data, &config);
        let start = GameState::new()
            .with_research("spear", 1)
            .with_resources(Resources::uniform(1000))
            .with_income(Resources::uniform(3600));

        let plan = solver
            .find_optimal_plan(&start, &GameState::new().with_troops("spear", 25))
            .unwrap();
        assert_eq!(
            plan.actions,
            vec![
                Action::recruit("spear", 10),
                Action::recruit("spear", 10),
                Action::recruit("spear", 5),
            ]
        );
        assert_eq!(plan.total_seconds, seconds(250));

        let err = solver
            .find_optimal_plan(&start, &GameState::new().with_troops("spear", 30))
            .unwrap_err();
        assert_eq!(err, PlannerError::NoPlanFound { expanded: 4 });
    }

    #[test]
    fn test_cheap_producer_built_first() {
        let data = two_building_data();
        let config = PlannerConfig::default();
        let solver = AStarSolver::new(&data, &config);
        let goal = GameState::new()
            .with_building("wood", 1)
            .with_building("barracks", 1);

        let plan = solver.find_optimal_plan(&base_state(), &goal).unwrap();
        assert_eq!(plan.first_action(), Some(&Action::build("wood", 1)));
        assert_eq!(
            plan.actions,
            vec![Action::build("wood", 1), Action::build("barracks", 1)]
        );
        // Wood: 100 s. Barracks: 130 stone at 5/h is 93600 s, then 1000 s.
        assert_eq!(plan.total_seconds, seconds(100 + 93_600 + 1000));
    }

    #[test]
    fn test_plan_time_matches_replay() {
        let data = two_building_data();
        let config = PlannerConfig::default();
        let solver = AStarSolver::new(&data, &config);
        let goal = GameState::new()
            .with_building("wood", 1)
            .with_building("barracks", 1);

        let plan = solver.find_optimal_plan(&base_state(), &goal).unwrap();
        let replay = solver
            .simulator()
            .simulate_plan(&base_state(), &plan.actions)
            .unwrap();
        assert_eq!(replay.time_cost, plan.total_seconds);
        assert!(replay.state.satisfies(&goal));
    }

    #[test]
    fn test_unreachable_goal() {
        let data = two_building_data();
        let config = PlannerConfig::default();
        let solver = AStarSolver::new(&data, &config);
        let goal = GameState::new().with_building("wall", 1);

        let err = solver.find_optimal_plan(&base_state(), &goal).unwrap_err();
        assert!(matches!(err, PlannerError::NoPlanFound { .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn test_saturated_queue_never_selected() {
        let data = two_building_data();
        let config = PlannerConfig {
            max_building_queue_depth: 0,
            ..PlannerConfig::default()
        };
        let solver = AStarSolver::new(&data, &config);
        let goal = GameState::new().with_building("wood", 1);

        let err = solver.find_optimal_plan(&base_state(), &goal).unwrap_err();
        assert_eq!(err, PlannerError::NoPlanFound { expanded: 1 });
    }

    #[test]
    fn test_missing_upgrade_data_is_skipped() {
        let mut data = two_building_data();
        // Level 2 is advertised but has no table entry.
        data.buildings.insert(
            "main".into(),
            BuildingData {
                max_level: 2,
                upgrades: Vec::new(),
            },
        );
        let config = PlannerConfig::default();
        let solver = AStarSolver::new(&data, &config);
        let goal = GameState::new().with_building("wood", 1);

        let plan = solver.find_optimal_plan(&base_state(), &goal).unwrap();
        assert_eq!(plan.actions, vec![Action::build("wood", 1)]);
    }

    #[test]
    fn test_expansion_budget() {
        let data = two_building_data();
        let config = PlannerConfig::default();
        let solver = AStarSolver::new(&data, &config);
        let goal = GameState::new()
            .with_building("wood", 1)
            .with_building("barracks", 1);

        let limits = SearchLimits::unlimited().with_max_expansions(1);
        let err = solver
            .find_optimal_plan_with_limits(&base_state(), &goal, limits)
            .unwrap_err();
        assert_eq!(err, PlannerError::SearchBudgetExhausted { expanded: 1 });
    }

    #[test]
    fn test_expired_deadline() {
        let data = two_building_data();
        let config = PlannerConfig::default();
        let solver = AStarSolver::new(&data, &config);
        let goal = GameState::new().with_building("wood", 1);

        let limits = SearchLimits::unlimited().with_deadline(Instant::now());
        let err = solver
            .find_optimal_plan_with_limits(&base_state(), &goal, limits)
            .unwrap_err();
        assert_eq!(err, PlannerError::DeadlineExceeded { expanded: 0 });
    }

    #[test]
    fn test_heuristic() {
        let data = two_building_data();
        let config = PlannerConfig::default();
        let solver = AStarSolver::new(&data, &config);
        let goal = GameState::new()
            .with_building("wood", 1)
            .with_building("barracks", 1)
            .with_building("wall", 3);

        // Barracks binds: 100 wood missing at 5/h. Wall has no data.
        assert_eq!(solver.heuristic(&base_state(), &goal), seconds(72_000));
        assert_eq!(
            solver.heuristic(&base_state(), &GameState::new()),
            Fixed::ZERO
        );
    }
}
