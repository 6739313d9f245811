use crate::args::{Command, SuiteArgs};
use crate::config::{build_settings, load_config};
use crate::error::AppResult;

use super::types::RunPlan;

/// Report subcommands never read the suite config.
pub(crate) fn build_plan(mut args: SuiteArgs) -> AppResult<RunPlan> {
    if let Some(command) = args.command.take() {
        return Ok(match command {
            Command::Analyze(analyze) => RunPlan::Analyze(analyze),
            Command::Charts(charts) => RunPlan::Charts(charts),
        });
    }

    let config = load_config(args.config.as_deref())?;
    let settings = build_settings(config.as_ref(), &args)?;
    Ok(RunPlan::Suite(Box::new(settings)))
}
