//! Data validation utilities.

use std::path::Path;

use planner_core::data::GameData;

use crate::error::{ToolError, ToolResult};
use crate::scenario::Scenario;

/// File name of the world tables inside a data directory.
pub const GAME_DATA_FILE: &str = "game_data.ron";

/// Sub-directory holding scenario files.
pub const SCENARIO_DIR: &str = "scenarios";

/// Load world tables from a RON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_game_data(path: &Path) -> ToolResult<GameData> {
    let contents = std::fs::read_to_string(path).map_err(|source| ToolError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(GameData::from_ron_str(&contents, &path.display().to_string())?)
}

/// Validate a single game-data file.
///
/// # Errors
///
/// Returns [`ToolError::Invalid`] listing every integrity fault, or a load
/// error if the file cannot be read.
pub fn validate_game_data_file(path: &Path) -> ToolResult<GameData> {
    let data = load_game_data(path)?;
    let errors = data.validate();
    if errors.is_empty() {
        Ok(data)
    } else {
        Err(ToolError::Invalid(errors))
    }
}

/// Validate a data directory: `game_data.ron` plus every scenario in
/// `scenarios/`.
///
/// Returns the number of scenarios checked.
///
/// # Errors
///
/// Returns [`ToolError::Invalid`] listing every fault found, or a load
/// error for the first file that cannot be read or parsed.
pub fn validate_data_directory(path: &Path) -> ToolResult<usize> {
    let data = load_game_data(&path.join(GAME_DATA_FILE))?;
    let mut errors = data.validate();

    let scenario_dir = path.join(SCENARIO_DIR);
    let mut scenario_paths = Vec::new();
    if scenario_dir.is_dir() {
        let entries = std::fs::read_dir(&scenario_dir).map_err(|source| ToolError::Read {
            path: scenario_dir.clone(),
            source,
        })?;
        for entry in entries.flatten() {
            let file = entry.path();
            if file.extension().is_some_and(|ext| ext == "ron") {
                scenario_paths.push(file);
            }
        }
    }
    scenario_paths.sort();

    for file in &scenario_paths {
        let scenario = Scenario::load(file)?;
        tracing::debug!(scenario = %scenario.name, path = %file.display(), "Checking scenario");
        errors.extend(scenario.unknown_references(&data));
    }

    if errors.is_empty() {
        Ok(scenario_paths.len())
    } else {
        Err(ToolError::Invalid(errors))
    }
}
