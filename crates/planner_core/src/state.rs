//! Village state snapshots used as search-node payloads.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::data::Prerequisites;
use crate::math::{whole_seconds_serde, Fixed};
use crate::resources::Resources;

/// Levels or counts keyed by building or unit id. Absent keys are zero.
pub type LevelMap = BTreeMap<String, u32>;

/// One in-progress job in a building or recruit queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Building or unit id.
    pub id: String,
    /// Target level for a building job, unit count for a recruit job.
    pub amount: u32,
    /// Seconds until the job completes.
    #[serde(with = "whole_seconds_serde")]
    pub remaining: Fixed,
}

impl QueueEntry {
    /// Create a queue entry.
    #[must_use]
    pub fn new(id: impl Into<String>, amount: u32, remaining: Fixed) -> Self {
        Self {
            id: id.into(),
            amount,
            remaining,
        }
    }
}

/// Advance a serial queue by `elapsed` seconds.
///
/// Only the head job progresses; time left over after it completes
/// carries into the next job. Completed jobs are removed.
fn drain_queue(queue: &mut Vec<QueueEntry>, elapsed: Fixed) {
    let mut budget = elapsed;
    let mut completed = 0;
    for entry in queue.iter_mut() {
        if budget <= Fixed::ZERO {
            break;
        }
        if entry.remaining <= budget {
            budget -= entry.remaining;
            entry.remaining = Fixed::ZERO;
            completed += 1;
        } else {
            entry.remaining -= budget;
            budget = Fixed::ZERO;
        }
    }
    queue.drain(..completed);
}

/// A snapshot of one village.
///
/// Value type: the simulator clones a state for every edge it prices and
/// never mutates a state that is already in the search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    /// Current stock.
    pub resources: Resources,
    /// Income per hour at the current building levels.
    pub resource_income: Resources,
    /// Building levels.
    pub building_levels: LevelMap,
    /// Recruited unit counts.
    pub troop_levels: LevelMap,
    /// Research tiers; zero means not researched.
    pub research_levels: LevelMap,
    /// In-progress construction jobs, oldest first.
    pub building_queue: Vec<QueueEntry>,
    /// In-progress recruitment jobs per building, oldest first.
    pub recruit_queues: BTreeMap<String, Vec<QueueEntry>>,
}

impl GameState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current stock.
    #[must_use]
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    /// Set the hourly income.
    #[must_use]
    pub fn with_income(mut self, income: Resources) -> Self {
        self.resource_income = income;
        self
    }

    /// Set a building level.
    #[must_use]
    pub fn with_building(mut self, building: impl Into<String>, level: u32) -> Self {
        self.building_levels.insert(building.into(), level);
        self
    }

    /// Set a recruited unit count.
    #[must_use]
    pub fn with_troops(mut self, unit: impl Into<String>, count: u32) -> Self {
        self.troop_levels.insert(unit.into(), count);
        self
    }

    /// Set a research tier.
    #[must_use]
    pub fn with_research(mut self, unit: impl Into<String>, level: u32) -> Self {
        self.research_levels.insert(unit.into(), level);
        self
    }

    /// Current level of a building.
    #[must_use]
    pub fn building_level(&self, building: &str) -> u32 {
        self.building_levels.get(building).copied().unwrap_or(0)
    }

    /// Current count of a unit.
    #[must_use]
    pub fn troop_count(&self, unit: &str) -> u32 {
        self.troop_levels.get(unit).copied().unwrap_or(0)
    }

    /// Current research tier of a unit.
    #[must_use]
    pub fn research_level(&self, unit: &str) -> u32 {
        self.research_levels.get(unit).copied().unwrap_or(0)
    }

    /// Number of jobs in a building's recruit queue.
    #[must_use]
    pub fn recruit_queue_len(&self, building: &str) -> usize {
        self.recruit_queues.get(building).map_or(0, Vec::len)
    }

    /// Check that every required building level is met.
    #[must_use]
    pub fn meets(&self, prerequisites: &Prerequisites) -> bool {
        prerequisites
            .iter()
            .all(|(building, level)| self.building_level(building) >= *level)
    }

    /// Goal test: every building, troop and research entry in `goal` is met.
    ///
    /// Keys absent from `goal` carry no requirement. Resources, income and
    /// queues in `goal` are ignored.
    #[must_use]
    pub fn satisfies(&self, goal: &Self) -> bool {
        goal.building_levels
            .iter()
            .all(|(b, level)| self.building_level(b) >= *level)
            && goal
                .troop_levels
                .iter()
                .all(|(u, count)| self.troop_count(u) >= *count)
            && goal
                .research_levels
                .iter()
                .all(|(u, level)| self.research_level(u) >= *level)
    }

    /// Canonical search key built from the level maps only.
    ///
    /// Format: `key:value;` pairs in key order for buildings, then troops,
    /// then research, each block closed by `|`. Zero entries are skipped so
    /// an explicit zero and an absent key hash the same.
    ///
    /// Resources, income and queues are left out: states with equal levels
    /// collapse into one search node even when their stockpiles differ.
    #[must_use]
    pub fn canonical_hash(&self) -> String {
        let mut out = String::new();
        for map in [&self.building_levels, &self.troop_levels, &self.research_levels] {
            for (key, value) in map.iter().filter(|(_, v)| **v > 0) {
                let _ = write!(out, "{key}:{value};");
            }
            out.push('|');
        }
        out
    }

    /// Advance every queue by `elapsed` seconds, dropping finished jobs.
    pub fn advance_queues(&mut self, elapsed: Fixed) {
        drain_queue(&mut self.building_queue, elapsed);
        for queue in self.recruit_queues.values_mut() {
            drain_queue(queue, elapsed);
        }
        self.recruit_queues.retain(|_, queue| !queue.is_empty());
    }
}
