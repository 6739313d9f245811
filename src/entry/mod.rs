mod plan;

use clap::Parser;

use crate::args::SuiteArgs;
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

/// Parses the command line, sets up logging and drives the selected command.
///
/// # Errors
///
/// Returns an error when arguments, configuration, the suite run or a report
/// command fails.
pub fn run() -> AppResult<()> {
    let args = SuiteArgs::parse();

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: SuiteArgs) -> AppResult<()> {
    let plan = build_plan(args)?;
    execute_plan(plan).await
}
