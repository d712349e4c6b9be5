use super::{commands, dispatch, telemetry};
use anyhow::Result;
use clap::ArgMatches;
use std::process::ExitCode;
use tracing::Level;

/// Exit code when the database could not be reached
pub const EXIT_PROBE_FAILED: u8 = 1;

fn extract_verbosity(matches: &ArgMatches) -> Option<Level> {
    telemetry::level_from_count(matches.get_count("verbose"))
}

/// Main orchestrator - Pure orchestration with no business logic
///
/// Five-step data flow:
/// 1. Parse: Extract CLI arguments
/// 2. Extract Verbosity: Convert flag count to logging level
/// 3. Initialize Telemetry: Set up structured logging/tracing
/// 4. Dispatch: Convert `ArgMatches` into typed Action enum
/// 5. Execute: Run the action's business logic
///
/// # Errors
///
/// Returns an error if any step in the flow fails; an unreachable database
/// is not an error and maps to a non-zero exit code instead
pub async fn start() -> Result<ExitCode> {
    // 1. Parse: Extract CLI arguments
    let matches = commands::new().get_matches();

    // 2. Extract Verbosity
    let verbosity = extract_verbosity(&matches);

    // 3. Initialize Telemetry
    telemetry::init(verbosity)?;

    // 4. Dispatch: Convert ArgMatches into typed Action enum
    let action = dispatch::dispatch(&matches)?;

    // 5. Execute: Run the action's business logic
    let outcome = action.execute().await?;

    Ok(if outcome.succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_PROBE_FAILED)
    })
}
