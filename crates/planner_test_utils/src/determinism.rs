//! Determinism testing utilities.
//!
//! Provides a harness for verifying that the planner returns identical
//! plans given identical inputs.
//!
//! # Testing Strategy
//!
//! A bot re-plans every tick and executes only the first action, so two
//! planning calls over the same snapshot must agree. Sources of
//! non-determinism include:
//!
//! - **Floating-point math**: Different CPUs can produce different results.
//!   We use fixed-point arithmetic via [`planner_core::math::Fixed`] throughout.
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Every map that drives action order is a `BTreeMap`.
//!
//! - **Heap tie-breaking**: equal-priority nodes pop in insertion order.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use planner_core::prelude::*;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    fn from_hashes(hashes: Vec<u64>) -> Self {
        Self {
            is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
            hashes,
        }
    }

    /// Get all unique hashes (should be 1 for deterministic planning).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Planner is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a computation multiple times and verify every result hashes the same.
pub fn verify_determinism<T, Run, HashFn>(runs: usize, run: Run, hash: HashFn) -> DeterminismResult
where
    Run: Fn() -> T,
    HashFn: Fn(&T) -> u64,
{
    DeterminismResult::from_hashes((0..runs).map(|_| hash(&run())).collect())
}

/// Hash the observable outcome of a planning call.
///
/// Covers the actions, the exact fixed-point total and the expansion
/// count, or the error.
#[must_use]
pub fn plan_hash(result: &Result<Plan>) -> u64 {
    match result {
        Ok(plan) => compute_hash(&(
            &plan.actions,
            plan.total_seconds.to_bits(),
            plan.expanded,
        )),
        Err(err) => compute_hash(&err.to_string()),
    }
}

/// Plan the same problem `runs` times in sequence.
#[must_use]
pub fn verify_plan_determinism(
    data: &GameData,
    config: &PlannerConfig,
    start: &GameState,
    goal: &GameState,
    runs: usize,
) -> DeterminismResult {
    verify_determinism(
        runs,
        || AStarSolver::new(data, config).find_optimal_plan(start, goal),
        plan_hash,
    )
}

/// Plan the same problem on `threads` scoped threads at once.
///
/// Catches shared state leaking between concurrent planning calls.
///
/// # Panics
///
/// Panics if a planning thread panics.
#[must_use]
pub fn run_parallel_plans(
    data: &GameData,
    config: &PlannerConfig,
    start: &GameState,
    goal: &GameState,
    threads: usize,
) -> DeterminismResult {
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    plan_hash(&AStarSolver::new(data, config).find_optimal_plan(start, goal))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("planning thread panicked"))
            .collect()
    });

    DeterminismResult::from_hashes(hashes)
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
