//! Error types for the planning core.

use thiserror::Error;

/// Result type alias using [`PlannerError`].
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Top-level error type for all planning errors.
///
/// A saturated queue is not an error: the simulator prices it as an
/// infinite-cost edge instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// No upgrade entry exists for the requested building level.
    #[error("No upgrade data for building '{building}' level {level}")]
    MissingBuildingData {
        /// Building identifier.
        building: String,
        /// Requested level.
        level: u32,
    },

    /// No recruitment data exists for the requested unit.
    #[error("No recruit data for unit '{0}'")]
    MissingUnitData(String),

    /// No research entry exists for the requested unit tier.
    #[error("No research data for unit '{unit}' level {level}")]
    MissingResearchData {
        /// Unit identifier.
        unit: String,
        /// Requested research tier.
        level: u32,
    },

    /// The open set emptied before a goal state was reached.
    #[error("No plan found after expanding {expanded} states")]
    NoPlanFound {
        /// Number of states expanded before giving up.
        expanded: usize,
    },

    /// The expansion budget ran out before a goal state was reached.
    #[error("Search budget exhausted after expanding {expanded} states")]
    SearchBudgetExhausted {
        /// Number of states expanded.
        expanded: usize,
    },

    /// The wall-clock deadline passed before a goal state was reached.
    #[error("Planning deadline exceeded after expanding {expanded} states")]
    DeadlineExceeded {
        /// Number of states expanded.
        expanded: usize,
    },

    /// Game data or planner configuration failed to parse.
    #[error("Failed to parse '{source_name}': {message}")]
    DataParse {
        /// Name of the parsed input (file path or label).
        source_name: String,
        /// Error message.
        message: String,
    },
}

impl PlannerError {
    /// Returns true for errors caused by missing entries in the static tables.
    #[must_use]
    pub const fn is_data_integrity_fault(&self) -> bool {
        matches!(
            self,
            Self::MissingBuildingData { .. }
                | Self::MissingUnitData(_)
                | Self::MissingResearchData { .. }
        )
    }

    /// Returns true if re-planning later (with fresh state) may succeed.
    ///
    /// Callers should treat these as "no improving plan this tick".
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NoPlanFound { .. }
                | Self::SearchBudgetExhausted { .. }
                | Self::DeadlineExceeded { .. }
        )
    }
}
