//! Deterministic cost and time simulation of a single action.
//!
//! Given a state and an action, the simulator answers two questions: how
//! many seconds pass before the action is finished, and what the village
//! looks like afterwards. The model:
//!
//! 1. A full queue prices the action at [`INFINITE_TIME`].
//! 2. Time-to-afford is the slowest resource to accrue the missing amount.
//! 3. Resources accrue (and queues drain) over the wait.
//! 4. The cost is paid, the level bumped, and a queue job appended.
//! 5. Resources accrue (and queues drain) over the activity duration.
//! 6. A build recomputes income from the new building levels.
//!
//! Affordability is never an error. Only missing static data is.

use crate::actions::Action;
use crate::config::PlannerConfig;
use crate::data::GameData;
use crate::error::Result;
use crate::math::{
    add_time, build_time_factor, is_infinite, seconds, time_to_accrue, Fixed, INFINITE_TIME,
};
use crate::resources::{ResourceKind, Resources};
use crate::state::{GameState, LevelMap, QueueEntry};

/// Outcome of simulating one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the action completes.
    pub state: GameState,
    /// Seconds from the input state until the action completes.
    pub time_cost: Fixed,
}

impl Transition {
    /// Returns true if the action cannot complete in finite time.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        is_infinite(self.time_cost)
    }
}

/// Prices actions against the static tables.
#[derive(Debug, Clone, Copy)]
pub struct VillageSimulator<'a> {
    data: &'a GameData,
    config: &'a PlannerConfig,
}

impl<'a> VillageSimulator<'a> {
    /// Create a simulator over static data and planner configuration.
    #[must_use]
    pub const fn new(data: &'a GameData, config: &'a PlannerConfig) -> Self {
        Self { data, config }
    }

    /// Simulate `action` from `state`.
    ///
    /// A blocked action (full queue or zero income for a missing resource)
    /// returns [`INFINITE_TIME`] and a state with the action applied but no
    /// time advanced.
    ///
    /// # Errors
    ///
    /// Returns a data-integrity error if the static tables lack the entry
    /// the action needs.
    pub fn calculate_next_state(&self, state: &GameState, action: &Action) -> Result<Transition> {
        let cost = action.cost(self.data)?;
        let duration = self.activity_duration(state, action)?;
        let wait = self.time_to_afford(state, &cost);
        let blocked = self.is_queue_full(state, action)? || is_infinite(wait);

        let mut next = state.clone();
        if blocked {
            self.apply(&mut next, action, &cost, duration)?;
            return Ok(Transition {
                state: next,
                time_cost: INFINITE_TIME,
            });
        }

        let income = state.resource_income;
        next.resources.accrue(&income, wait);
        next.advance_queues(wait);
        self.apply(&mut next, action, &cost, duration)?;
        next.resources.accrue(&income, duration);
        next.advance_queues(duration);
        if matches!(action, Action::Build { .. }) {
            next.resource_income = self.compute_income(&next.building_levels);
        }

        Ok(Transition {
            state: next,
            time_cost: add_time(wait, duration),
        })
    }

    /// Run a fixed sequence of actions, returning the final state and total time.
    ///
    /// # Errors
    ///
    /// Fails on the first action with missing static data.
    pub fn simulate_plan(&self, start: &GameState, actions: &[Action]) -> Result<Transition> {
        let mut current = Transition {
            state: start.clone(),
            time_cost: Fixed::ZERO,
        };
        for action in actions {
            let step = self.calculate_next_state(&current.state, action)?;
            current = Transition {
                state: step.state,
                time_cost: add_time(current.time_cost, step.time_cost),
            };
        }
        Ok(current)
    }

    /// Seconds until `cost` is payable from the current stock and income.
    ///
    /// The slowest resource binds; resources accrue in parallel. Population
    /// is not a stockpile and never causes waiting.
    #[must_use]
    pub fn time_to_afford(&self, state: &GameState, cost: &Resources) -> Fixed {
        ResourceKind::ALL
            .iter()
            .map(|&kind| {
                time_to_accrue(
                    cost.get(kind) - state.resources.get(kind),
                    state.resource_income.get(kind),
                )
            })
            .max()
            .unwrap_or(Fixed::ZERO)
    }

    /// Time-to-afford for an action's full cost, ignoring queues.
    pub fn action_time_to_afford(&self, state: &GameState, action: &Action) -> Result<Fixed> {
        Ok(self.time_to_afford(state, &action.cost(self.data)?))
    }

    /// Seconds the action itself takes once started.
    ///
    /// Builds scale with the headquarters level, recruits train serially,
    /// research takes its table time.
    pub fn activity_duration(&self, state: &GameState, action: &Action) -> Result<Fixed> {
        match action {
            Action::Build { building, level } => {
                let base = self.data.building_upgrade(building, *level)?.build_time;
                let hq_level = state.building_level(&self.config.headquarters);
                Ok(seconds(i64::from(base)).saturating_mul(build_time_factor(hq_level)))
            }
            Action::Recruit { unit, amount } => {
                let total = self.data.unit(unit)?.batch_time(*amount);
                Ok(seconds(i64::try_from(total).unwrap_or(i64::MAX)))
            }
            Action::Research { unit, level } => {
                let time = self.data.research_upgrade(unit, *level)?.research_time;
                Ok(seconds(i64::from(time)))
            }
        }
    }

    /// Check whether the queue this action would join is at capacity.
    pub fn is_queue_full(&self, state: &GameState, action: &Action) -> Result<bool> {
        match action {
            Action::Build { .. } => {
                Ok(state.building_queue.len() >= self.config.max_building_queue_depth)
            }
            Action::Recruit { unit, .. } => {
                let unit_data = self.data.unit(unit)?;
                Ok(unit_data.recruit_building().is_some_and(|building| {
                    state.recruit_queue_len(building) >= self.config.max_recruit_queue_depth
                }))
            }
            Action::Research { .. } => Ok(false),
        }
    }

    /// Hourly income at the given building levels.
    ///
    /// Base production plus the table production of every building at its
    /// level. Start-state suppliers should use this so that the first
    /// edge and later edges agree on income.
    #[must_use]
    pub fn compute_income(&self, levels: &LevelMap) -> Resources {
        let mut income = Resources {
            population: 0,
            ..self.config.base_production
        };
        for (building, level) in levels {
            if *level == 0 {
                continue;
            }
            if let Some(data) = self.data.buildings.get(building) {
                let production = data.production_at(*level);
                for kind in ResourceKind::ALL {
                    *income.get_mut(kind) += production.get(kind);
                }
            }
        }
        income
    }

    /// Pay for the action, bump its level and enqueue its job.
    fn apply(
        &self,
        state: &mut GameState,
        action: &Action,
        cost: &Resources,
        duration: Fixed,
    ) -> Result<()> {
        state.resources.pay(cost);
        match action {
            Action::Build { building, level } => {
                raise_level(&mut state.building_levels, building, *level);
                state
                    .building_queue
                    .push(QueueEntry::new(building.clone(), *level, duration));
            }
            Action::Recruit { unit, amount } => {
                *state.troop_levels.entry(unit.clone()).or_insert(0) += amount;
                if let Some(building) = self.data.unit(unit)?.recruit_building() {
                    state
                        .recruit_queues
                        .entry(building.to_string())
                        .or_default()
                        .push(QueueEntry::new(unit.clone(), *amount, duration));
                }
            }
            Action::Research { unit, level } => {
                raise_level(&mut state.research_levels, unit, *level);
            }
        }
        Ok(())
    }
}

/// Set a level unless it is already higher. Replayed or stale actions
/// never take a village backwards.
fn raise_level(levels: &mut LevelMap, id: &str, level: u32) {
    let current = levels.entry(id.to_string()).or_insert(0);
    *current = (*current).max(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        BuildingData, BuildingUpgrade, Prerequisites, ResearchData, ResearchUpgrade, UnitData,
    };

    fn upgrade(level: u32, cost: Resources, production: i64, build_time: u32) -> BuildingUpgrade {
        BuildingUpgrade {
            level,
            cost,
            production: Resources::new(production, 0, 0, 0),
            build_time,
        }
    }

    fn test_data() -> GameData {
        let mut data = GameData::default();
        data.buildings.insert(
            "main".into(),
            BuildingData {
                max_level: 3,
                upgrades: vec![
                    upgrade(1, Resources::new(90, 80, 70, 5), 0, 100),
                    upgrade(2, Resources::new(110, 100, 90, 1), 0, 200),
                    upgrade(3, Resources::new(140, 120, 110, 1), 0, 300),
                ],
            },
        );
        data.buildings.insert(
            "wood".into(),
            BuildingData {
                max_level: 2,
                upgrades: vec![
                    upgrade(1, Resources::new(50, 60, 40, 5), 30, 600),
                    upgrade(2, Resources::new(63, 77, 50, 1), 35, 700),
                ],
            },
        );
        data.units.insert(
            "spear".into(),
            UnitData {
                cost: Resources::new(50, 30, 10, 1),
                build_time: 100,
                recruited_at: None,
                prerequisites: Prerequisites::from([("barracks".to_string(), 1)]),
                max_level: 0,
            },
        );
        data.research.insert(
            "spear".into(),
            ResearchData {
                max_level: 1,
                upgrades: vec![ResearchUpgrade {
                    level: 1,
                    cost: Resources::new(50, 50, 50, 0),
                    research_time: 1800,
                }],
            },
        );
        data
    }

    fn rich_state() -> GameState {
        GameState::new()
            .with_resources(Resources::uniform(1000))
            .with_income(Resources::uniform(3600))
    }

    #[test]
    fn test_build_queue_full_is_infinite() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let mut state = rich_state();
        state.building_queue = vec![
            QueueEntry::new("main", 1, seconds(500)),
            QueueEntry::new("main", 2, seconds(500)),
        ];

        let blocked = sim
            .calculate_next_state(&state, &Action::build("wood", 1))
            .unwrap();
        assert!(blocked.is_blocked());
        assert_eq!(blocked.time_cost, INFINITE_TIME);

        let free = sim
            .calculate_next_state(&rich_state(), &Action::build("wood", 1))
            .unwrap();
        assert!(!free.is_blocked());
        assert!(blocked.time_cost > free.time_cost);
    }

    #[test]
    fn test_one_free_slot_is_not_blocked() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let mut state = rich_state();
        state.building_queue = vec![QueueEntry::new("main", 1, seconds(500))];
        let transition = sim
            .calculate_next_state(&state, &Action::build("wood", 1))
            .unwrap();
        assert!(!transition.is_blocked());
    }

    #[test]
    fn test_recruit_queue_full_is_infinite() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let mut state = rich_state();
        state.recruit_queues.insert(
            "barracks".into(),
            vec![
                QueueEntry::new("spear", 10, seconds(1000)),
                QueueEntry::new("spear", 10, seconds(1000)),
            ],
        );
        let transition = sim
            .calculate_next_state(&state, &Action::recruit("spear", 1))
            .unwrap();
        assert_eq!(transition.time_cost, INFINITE_TIME);
    }

    #[test]
    fn test_time_to_afford_binding_resource() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let state = GameState::new()
            .with_resources(Resources::new(0, 40, 100, 0))
            .with_income(Resources::new(10, 10, 10, 0));
        // Wood: 50 missing at 10/h = 18000 s, stone: 20 missing = 7200 s, iron: none missing.
        let wait = sim.time_to_afford(&state, &Resources::new(50, 60, 40, 5));
        assert_eq!(wait, seconds(18_000));
    }

    #[test]
    fn test_time_to_afford_zero_income_is_infinite() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let state = GameState::new()
            .with_resources(Resources::new(0, 1000, 1000, 0))
            .with_income(Resources::new(0, 10, 10, 0));
        assert_eq!(
            sim.time_to_afford(&state, &Resources::new(1, 0, 0, 0)),
            INFINITE_TIME
        );
        // Zero income is harmless when nothing is missing.
        assert_eq!(
            sim.time_to_afford(&state, &Resources::new(0, 10, 10, 0)),
            Fixed::ZERO
        );
    }

    #[test]
    fn test_research_time_includes_wait() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let state = GameState::new()
            .with_income(Resources::uniform(10))
            .with_building("smith", 1);
        let transition = sim
            .calculate_next_state(&state, &Action::research("spear", 1))
            .unwrap();
        // Five hours to afford plus thirty minutes to research.
        assert_eq!(transition.time_cost, seconds(18_000 + 1800));
        assert_eq!(transition.state.research_level("spear"), 1);
    }

    #[test]
    fn test_apply_research_pays_cost() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let state = GameState::new().with_resources(Resources::uniform(100));
        let transition = sim
            .calculate_next_state(&state, &Action::research("spear", 1))
            .unwrap();
        assert_eq!(transition.state.resources, Resources::uniform(50));
        assert_eq!(transition.time_cost, seconds(1800));
    }

    #[test]
    fn test_build_time_scales_with_headquarters() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let base = sim
            .activity_duration(&GameState::new(), &Action::build("wood", 1))
            .unwrap();
        assert_eq!(base, seconds(600));

        let hq3 = GameState::new().with_building("main", 3);
        let scaled = sim
            .activity_duration(&hq3, &Action::build("wood", 1))
            .unwrap();
        // 600 * 1.05^2 = 661.5
        assert!(scaled > seconds(661) && scaled < seconds(662));
    }

    #[test]
    fn test_recruit_duration_is_serial() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let duration = sim
            .activity_duration(&GameState::new(), &Action::recruit("spear", 10))
            .unwrap();
        assert_eq!(duration, seconds(1000));
    }

    #[test]
    fn test_build_updates_levels_income_and_queue() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let state = GameState::new()
            .with_resources(Resources::new(100, 100, 100, 0))
            .with_income(Resources::uniform(5));
        let transition = sim
            .calculate_next_state(&state, &Action::build("wood", 1))
            .unwrap();

        assert_eq!(transition.time_cost, seconds(600));
        let next = &transition.state;
        assert_eq!(next.building_level("wood"), 1);
        // Paid 50/60/40, then ten minutes at 5/h yields 0 whole units.
        assert_eq!(next.resources, Resources::new(50, 40, 60, 5));
        assert_eq!(next.resource_income, Resources::new(35, 5, 5, 0));
        // The job finished within the edge.
        assert!(next.building_queue.is_empty());
    }

    #[test]
    fn test_accrual_covers_wait_and_duration() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let state = GameState::new()
            .with_resources(Resources::new(0, 60, 40, 0))
            .with_income(Resources::new(100, 0, 0, 0));
        let transition = sim
            .calculate_next_state(&state, &Action::build("wood", 1))
            .unwrap();
        // 30 min to afford 50 wood, then 10 min building at 100/h (16 units).
        assert_eq!(transition.time_cost, seconds(1800 + 600));
        assert_eq!(transition.state.resources.wood, 16);
        assert_eq!(transition.state.resources.stone, 0);
    }

    #[test]
    fn test_existing_queue_drains_and_new_job_waits_behind_it() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let mut state = rich_state();
        state.building_queue = vec![QueueEntry::new("main", 1, seconds(900))];
        let transition = sim
            .calculate_next_state(&state, &Action::build("wood", 1))
            .unwrap();
        // 600 s elapse: the old job has 300 s left, the new one hasn't started.
        assert_eq!(
            transition.state.building_queue,
            vec![
                QueueEntry::new("main", 1, seconds(300)),
                QueueEntry::new("wood", 1, seconds(600)),
            ]
        );
    }

    #[test]
    fn test_recruit_appends_to_unit_building_queue() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let mut state = rich_state();
        state.recruit_queues.insert(
            "barracks".into(),
            vec![QueueEntry::new("spear", 5, seconds(5000))],
        );
        let transition = sim
            .calculate_next_state(&state, &Action::recruit("spear", 10))
            .unwrap();
        let next = &transition.state;
        assert_eq!(next.troop_count("spear"), 10);
        assert_eq!(next.resources.population, 10);
        assert_eq!(next.recruit_queue_len("barracks"), 2);
        // Recruiting does not touch income.
        assert_eq!(next.resource_income, state.resource_income);
    }

    #[test]
    fn test_missing_data_is_error() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let state = rich_state();
        for action in [
            Action::build("main", 4),
            Action::build("wall", 1),
            Action::recruit("axe", 10),
            Action::research("spear", 2),
        ] {
            let err = sim.calculate_next_state(&state, &action).unwrap_err();
            assert!(err.is_data_integrity_fault(), "{action}: {err}");
        }
    }

    #[test]
    fn test_input_state_is_not_mutated() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let state = rich_state();
        let before = state.clone();
        let _ = sim.calculate_next_state(&state, &Action::build("main", 1));
        assert_eq!(state, before);
    }

    #[test]
    fn test_stale_build_keeps_higher_level() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let state = rich_state().with_building("main", 3);
        let transition = sim
            .calculate_next_state(&state, &Action::build("main", 1))
            .unwrap();
        assert_eq!(transition.state.building_level("main"), 3);
    }

    #[test]
    fn test_compute_income() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let levels = LevelMap::from([
            ("wood".to_string(), 2),
            ("main".to_string(), 3),
            ("unknown".to_string(), 9),
        ]);
        assert_eq!(sim.compute_income(&levels), Resources::new(40, 5, 5, 0));
        assert_eq!(sim.compute_income(&LevelMap::new()), Resources::uniform(5));
    }

    #[test]
    fn test_simulate_plan_sums_edges() {
        let data = test_data();
        let config = PlannerConfig::default();
        let sim = VillageSimulator::new(&data, &config);
        let start = rich_state();
        let plan = [Action::build("main", 1), Action::build("main", 2)];

        let first = sim.calculate_next_state(&start, &plan[0]).unwrap();
        let second = sim.calculate_next_state(&first.state, &plan[1]).unwrap();
        let whole = sim.simulate_plan(&start, &plan).unwrap();

        assert_eq!(whole.time_cost, first.time_cost + second.time_cost);
        assert_eq!(whole.state, second.state);

        let empty = sim.simulate_plan(&start, &[]).unwrap();
        assert_eq!(empty.time_cost, Fixed::ZERO);
        assert_eq!(empty.state, start);

        assert!(sim
            .simulate_plan(&start, &[Action::build("main", 9)])
            .is_err());
    }
}
