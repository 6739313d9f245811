use tracing::info;

use crate::app::run_analyze;
use crate::charts::run_charts;
use crate::error::AppResult;
use crate::suite::run_suite;

use super::types::RunPlan;

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::Suite(settings) => {
            info!(
                "Starting suite: {} scenarios against {} targets.",
                settings.scenarios.len(),
                settings.targets.len()
            );
            let outcome = run_suite(&settings).await?;
            println!();
            for line in outcome.summary_lines() {
                println!("{}", line);
            }
            Ok(())
        }
        RunPlan::Analyze(args) => run_analyze(&args).await,
        RunPlan::Charts(args) => run_charts(&args).await,
    }
}
