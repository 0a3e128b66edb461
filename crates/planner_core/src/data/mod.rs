//! Static game-data tables.
//!
//! This module contains pure data structures for the per-building,
//! per-unit and per-research tables the planner reads. All structs are
//! designed to be deserialized from RON files.
//!
//! **Note:** This module contains no IO - it only parses text it is
//! handed. Reading files is left to the caller.

mod building_data;
mod game_data;
mod research_data;
mod unit_data;

pub use building_data::{BuildingData, BuildingUpgrade};
pub use game_data::{GameData, Prerequisites};
pub use research_data::{ResearchData, ResearchUpgrade};
pub use unit_data::UnitData;
