//! Village planner command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Plan a scenario against the sample world
//! cargo run -p planner_tools -- plan data/scenarios/first_barracks.ron
//!
//! # Same, as JSON, with a one second deadline
//! cargo run -p planner_tools -- plan data/scenarios/first_barracks.ron --json --deadline-ms 1000
//!
//! # Replay the scenario's fixed action list
//! cargo run -p planner_tools -- simulate data/scenarios/first_barracks.ron
//!
//! # Check world tables and every scenario
//! cargo run -p planner_tools -- validate data
//! ```
//!
//! Reports go to stdout, logs to stderr.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use planner_core::prelude::*;
use planner_tools::report::PlanReport;
use planner_tools::scenario::Scenario;
use planner_tools::validate::{load_game_data, validate_data_directory, validate_game_data_file};
use planner_tools::ToolResult;

#[derive(Parser)]
#[command(name = "village-planner")]
#[command(about = "Plan, replay and validate village build orders")]
#[command(version)]
struct Cli {
    /// Enable debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the fastest plan for a scenario
    Plan {
        /// Scenario file (RON)
        scenario: PathBuf,

        /// World tables (RON)
        #[arg(short, long, default_value = "data/game_data.ron")]
        data: PathBuf,

        /// Override the scenario's expansion budget
        #[arg(long)]
        max_expansions: Option<usize>,

        /// Give up after this many milliseconds
        #[arg(long)]
        deadline_ms: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay the scenario's action list and report the total time
    Simulate {
        /// Scenario file (RON)
        scenario: PathBuf,

        /// World tables (RON)
        #[arg(short, long, default_value = "data/game_data.ron")]
        data: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a game-data file or a data directory
    Validate {
        /// `game_data.ron` or a directory containing it
        #[arg(default_value = "data")]
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn emit(report: &PlanReport, json: bool) -> ToolResult<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn cmd_plan(
    scenario_path: &Path,
    data_path: &Path,
    max_expansions: Option<usize>,
    deadline_ms: Option<u64>,
    json: bool,
) -> ToolResult<()> {
    let data = load_game_data(data_path)?;
    let scenario = Scenario::load(scenario_path)?;
    let start = scenario.prepared_start(&data);

    let mut limits = SearchLimits::from_config(&scenario.config);
    if let Some(max) = max_expansions {
        limits = limits.with_max_expansions(max);
    }
    if let Some(ms) = deadline_ms {
        limits = limits.with_deadline(Instant::now() + Duration::from_millis(ms));
    }

    tracing::info!(scenario = %scenario.name, "Planning");
    let solver = AStarSolver::new(&data, &scenario.config);
    let plan = solver.find_optimal_plan_with_limits(&start, &scenario.goal, limits)?;
    emit(&PlanReport::from_plan(&scenario.name, &plan), json)
}

fn cmd_simulate(scenario_path: &Path, data_path: &Path, json: bool) -> ToolResult<()> {
    let data = load_game_data(data_path)?;
    let scenario = Scenario::load(scenario_path)?;
    let start = scenario.prepared_start(&data);

    tracing::info!(scenario = %scenario.name, actions = scenario.actions.len(), "Replaying");
    let sim = VillageSimulator::new(&data, &scenario.config);
    let replay = sim.simulate_plan(&start, &scenario.actions)?;
    let report =
        PlanReport::from_replay(&scenario.name, &scenario.actions, &replay, &scenario.goal);
    emit(&report, json)
}

fn cmd_validate(path: &Path) -> ToolResult<()> {
    tracing::info!("Validating data in: {}", path.display());
    if path.is_dir() {
        let scenarios = validate_data_directory(path)?;
        tracing::info!(scenarios, "Validation passed");
    } else {
        validate_game_data_file(path)?;
        tracing::info!("Validation passed");
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Plan {
            scenario,
            data,
            max_expansions,
            deadline_ms,
            json,
        } => cmd_plan(&scenario, &data, max_expansions, deadline_ms, json),
        Commands::Simulate {
            scenario,
            data,
            json,
        } => cmd_simulate(&scenario, &data, json),
        Commands::Validate { path } => cmd_validate(&path),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(e.exit_code());
    }
}
