//! # Planner Core
//!
//! Deterministic planning core for a village-building strategy game.
//!
//! Given a village snapshot and a goal, the core finds the action sequence
//! (build, recruit, research) that reaches the goal in the least simulated
//! time. It contains **only** deterministic logic:
//! - No network or file IO (RON text is parsed, never read from disk)
//! - No randomness
//! - No floating-point math (uses fixed-point seconds)
//!
//! Two planners given the same snapshot, data and configuration return
//! the same plan, so a caller can re-plan every tick and execute only the
//! first action.
//!
//! ## Crate Structure
//!
//! - [`state`] - Village snapshots and the canonical search key
//! - [`actions`] - Build, recruit and research actions
//! - [`action_generator`] - Legal actions at a state
//! - [`simulator`] - Time and resource cost of one action
//! - [`solver`] - A* search over states
//! - [`plan_generator`] - Prerequisite unlock paths
//! - [`data`] - Static game tables loaded from RON
//! - [`math`] - Fixed-point time utilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod action_generator;
pub mod actions;
pub mod config;
pub mod data;
pub mod error;
pub mod math;
pub mod plan_generator;
pub mod priority_queue;
pub mod resources;
pub mod simulator;
pub mod solver;
pub mod state;

pub use error::{PlannerError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::action_generator::ActionGenerator;
    pub use crate::actions::{Action, VillageExecutor};
    pub use crate::config::PlannerConfig;
    pub use crate::data::{GameData, Prerequisites};
    pub use crate::error::{PlannerError, Result};
    pub use crate::math::{seconds, Fixed, INFINITE_TIME};
    pub use crate::plan_generator::PlanGenerator;
    pub use crate::resources::{ResourceKind, Resources};
    pub use crate::simulator::{Transition, VillageSimulator};
    pub use crate::solver::{AStarSolver, Plan, SearchLimits};
    pub use crate::state::{GameState, LevelMap, QueueEntry};
}
