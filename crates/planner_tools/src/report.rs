//! Human- and machine-readable plan reports.

use std::fmt;

use planner_core::prelude::*;
use serde::Serialize;

/// Summary of a plan or a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    /// Scenario name.
    pub scenario: String,
    /// Actions in execution order.
    pub actions: Vec<Action>,
    /// Whole simulated seconds until the last action completes.
    pub total_seconds: i64,
    /// States expanded, absent for a replay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<usize>,
    /// Whether the final state meets the scenario goal.
    pub reaches_goal: bool,
}

impl PlanReport {
    /// Report for a solver result.
    #[must_use]
    pub fn from_plan(scenario: &str, plan: &Plan) -> Self {
        Self {
            scenario: scenario.to_string(),
            actions: plan.actions.clone(),
            total_seconds: whole_seconds(plan.total_seconds),
            expanded: Some(plan.expanded),
            reaches_goal: true,
        }
    }

    /// Report for a fixed action list replayed through the simulator.
    #[must_use]
    pub fn from_replay(
        scenario: &str,
        actions: &[Action],
        replay: &Transition,
        goal: &GameState,
    ) -> Self {
        Self {
            scenario: scenario.to_string(),
            actions: actions.to_vec(),
            total_seconds: whole_seconds(replay.time_cost),
            expanded: None,
            reaches_goal: replay.state.satisfies(goal),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Seconds rounded up, or `-1` for a blocked (infinite) duration.
///
/// A finite total too close to [`Fixed::MAX`] to round up counts as blocked.
fn whole_seconds(time: Fixed) -> i64 {
    if planner_core::math::is_infinite(time) {
        return -1;
    }
    time.checked_ceil().map_or(-1, |secs| secs.to_num::<i64>())
}

/// Format seconds as `HH:MM:SS`, or `blocked` for a negative value.
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    if seconds < 0 {
        return "blocked".to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scenario: {}", self.scenario)?;
        if self.actions.is_empty() {
            writeln!(f, "  Goal already met, nothing to do.")?;
        }
        for (step, action) in self.actions.iter().enumerate() {
            writeln!(f, "  {:>3}. {action}", step + 1)?;
        }
        write!(f, "Total time: {}", format_duration(self.total_seconds))?;
        if let Some(expanded) = self.expanded {
            write!(f, " ({expanded} states expanded)")?;
        }
        if !self.reaches_goal {
            write!(f, "\nWarning: the final state does not meet the goal")?;
        }
        Ok(())
    }
}
