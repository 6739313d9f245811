//! Runs every scenario against every target and persists the report.
mod scenarios;


use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{RunMode, SuiteSettings, Target};
use crate::error::AppResult;
use crate::http::{HttpExecutor, RequestExecutor, run_scenario};
use crate::metrics::summarize;
use crate::report::{ReportWriter, ScenarioReport, TargetReport, timestamp_now};

pub use scenarios::{default_scenarios, default_targets};

/// What a finished suite run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteOutcome {
    pub report_path: PathBuf,
    pub scenarios: usize,
    pub requests: u64,
    pub failed: u64,
}

impl SuiteOutcome {
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            "TODOS OS TESTES CONCLUÍDOS!".to_owned(),
            format!("Cenários executados: {}", self.scenarios),
            format!("Requisições: {} (falhadas: {})", self.requests, self.failed),
            format!("Resultados completos em: {}", self.report_path.display()),
        ]
    }
}

/// Runs the suite over HTTP.
///
/// # Errors
///
/// Returns an error when a client cannot be built or the report cannot be
/// written. Failed requests are recorded in the report, not returned.
pub async fn run_suite(settings: &SuiteSettings) -> AppResult<SuiteOutcome> {
    let headers = settings.request_headers();
    run_suite_with(settings, |target| {
        HttpExecutor::new(
            target,
            &headers,
            &settings.user_agent,
            settings.request_timeout,
        )
        .map(Arc::new)
    })
    .await
}

/// Runs the suite with executors produced by `make_executor`, one per target.
///
/// The report file is truncated once, then one chunk is appended per
/// completed scenario.
///
/// # Errors
///
/// Returns an error when an executor cannot be built or the report cannot be
/// written.
pub async fn run_suite_with<E, F>(settings: &SuiteSettings, make_executor: F) -> AppResult<SuiteOutcome>
where
    E: RequestExecutor + ?Sized + 'static,
    F: Fn(&Target) -> AppResult<Arc<E>>,
{
    let mut executors = Vec::with_capacity(settings.targets.len());
    for target in &settings.targets {
        executors.push((target, make_executor(target)?));
    }

    let writer = ReportWriter::create(&settings.report_path)
        .await
        .inspect_err(|err| error!("Cannot create report: {}", err))?;

    let identification = settings.identity.identification_lines();
    let mut outcome = SuiteOutcome {
        report_path: settings.report_path.clone(),
        scenarios: 0,
        requests: 0,
        failed: 0,
    };

    for scenario in &settings.scenarios {
        info!(
            "{} ({} x {})",
            scenario.name, scenario.request_count, scenario.endpoint
        );
        let mut targets = Vec::with_capacity(executors.len());
        for (target, executor) in &executors {
            let mode = match scenario.mode() {
                RunMode::Sequential => "sequential".to_owned(),
                RunMode::Concurrent(width) => format!("concurrent, width {}", width),
            };
            info!("Running against {} ({}:{}, {})", target.name, target.host, target.port, mode);

            let results = run_scenario(Arc::clone(executor), scenario).await;
            let summary = summarize(&results);
            info!(
                "{}: {}/{} ok ({:.2}%), mean {}",
                target.report_name(),
                summary.successful,
                summary.total_requests,
                summary.success_rate_pct,
                summary
                    .latency
                    .map_or_else(|| "n/a".to_owned(), |latency| format!("{:.2} ms", latency.mean_ms))
            );

            outcome.requests = outcome.requests.saturating_add(summary.total_requests);
            outcome.failed = outcome.failed.saturating_add(summary.failed);
            targets.push(TargetReport {
                name: target.report_name(),
                summary,
            });
        }

        let report = ScenarioReport {
            name: scenario.name.clone(),
            timestamp: timestamp_now(),
            identification: identification.clone(),
            targets,
        };
        writer
            .append_scenario(&report)
            .await
            .inspect_err(|err| error!("Cannot append to report: {}", err))?;
        outcome.scenarios = outcome.scenarios.saturating_add(1);
    }

    Ok(outcome)
}
