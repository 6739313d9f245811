use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::args::PositiveUsize;
use crate::domain::ScenarioSpec;
use crate::error::{AppError, AppResult};
use crate::metrics::{RequestResult, summarize};

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

fn positive(value: usize) -> AppResult<PositiveUsize> {
    Ok(PositiveUsize::try_from(value)?)
}

struct RefusingExecutor;

#[async_trait]
impl RequestExecutor for RefusingExecutor {
    async fn execute(&self, endpoint: &str) -> RequestResult {
        RequestResult::transport_failure(
            endpoint,
            Duration::from_micros(50),
            "connection refused".to_owned(),
        )
    }
}

/// Records the call index as the response size.
#[derive(Default)]
struct SequenceExecutor {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Option<Duration>,
    slow_first: bool,
}

impl SequenceExecutor {
    fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }
}

#[async_trait]
impl RequestExecutor for SequenceExecutor {
    async fn execute(&self, endpoint: &str) -> RequestResult {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = if self.slow_first && index == 0 {
            Some(Duration::from_millis(60))
        } else {
            self.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        RequestResult::from_response(
            endpoint,
            200,
            Duration::from_millis(1),
            u64::try_from(index).unwrap_or(u64::MAX),
        )
    }
}

struct PanickingExecutor {
    calls: AtomicUsize,
}

#[async_trait]
impl RequestExecutor for PanickingExecutor {
    #[expect(clippy::panic, reason = "exercises recovery from a panicking request task")]
    async fn execute(&self, endpoint: &str) -> RequestResult {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 3 {
            panic!("executor blew up");
        }
        RequestResult::from_response(endpoint, 200, Duration::from_millis(1), 1)
    }
}

#[test]
fn concurrent_always_failing_yields_every_result() -> AppResult<()> {
    run_async_test(async {
        let results = run_concurrent(
            Arc::new(RefusingExecutor),
            "/small.txt",
            positive(100)?,
            positive(10)?,
        )
        .await;
        let summary = summarize(&results);
        if summary.total_requests != 100 || summary.failed != 100 || summary.successful != 0 {
            return Err(AppError::validation(format!(
                "Unexpected summary: {:?}",
                summary
            )));
        }
        if summary.latency.is_some() {
            return Err(AppError::validation("Expected no latency for all-failed run"));
        }
        Ok(())
    })
}

#[test]
fn concurrent_respects_in_flight_cap() -> AppResult<()> {
    run_async_test(async {
        let executor = Arc::new(SequenceExecutor::with_delay(Duration::from_millis(5)));
        let results = run_concurrent(
            Arc::clone(&executor),
            "/medium.txt",
            positive(40)?,
            positive(4)?,
        )
        .await;
        if results.len() != 40 {
            return Err(AppError::validation(format!(
                "Expected 40 results, got {}",
                results.len()
            )));
        }
        let max = executor.max_in_flight.load(Ordering::SeqCst);
        if max != 4 {
            return Err(AppError::validation(format!(
                "Expected the pool to fill exactly 4 slots, saw {}",
                max
            )));
        }
        Ok(())
    })
}

#[test]
fn concurrent_collects_in_completion_order() -> AppResult<()> {
    run_async_test(async {
        let executor = Arc::new(SequenceExecutor {
            slow_first: true,
            delay: Some(Duration::from_millis(1)),
            ..SequenceExecutor::default()
        });
        let results = run_concurrent(executor, "/large.txt", positive(5)?, positive(5)?).await;
        let last = results
            .last()
            .ok_or_else(|| AppError::validation("Expected results"))?;
        if last.response_bytes() != 0 {
            return Err(AppError::validation(format!(
                "Slow first request should complete last, got index {}",
                last.response_bytes()
            )));
        }
        if results.len() != 5 {
            return Err(AppError::validation("Expected 5 results"));
        }
        Ok(())
    })
}

#[test]
fn panicking_task_becomes_failed_result() -> AppResult<()> {
    run_async_test(async {
        let executor = Arc::new(PanickingExecutor {
            calls: AtomicUsize::new(0),
        });
        let results = run_concurrent(executor, "/api/status", positive(10)?, positive(3)?).await;
        let summary = summarize(&results);
        if summary.total_requests != 10 || summary.failed != 1 || summary.successful != 9 {
            return Err(AppError::validation(format!(
                "Unexpected summary: {:?}",
                summary
            )));
        }
        Ok(())
    })
}

#[test]
fn sequential_runs_one_at_a_time_in_order() -> AppResult<()> {
    run_async_test(async {
        let executor = SequenceExecutor::with_delay(Duration::from_millis(1));
        let results = run_sequential(&executor, "/small.txt", positive(12)?).await;
        let order: Vec<u64> = results.iter().map(RequestResult::response_bytes).collect();
        let expected: Vec<u64> = (0..12).collect();
        if order != expected {
            return Err(AppError::validation(format!(
                "Expected submission order, got {:?}",
                order
            )));
        }
        if executor.max_in_flight.load(Ordering::SeqCst) != 1 {
            return Err(AppError::validation("Sequential mode overlapped requests"));
        }
        Ok(())
    })
}

#[test]
fn run_scenario_dispatches_on_concurrency() -> AppResult<()> {
    run_async_test(async {
        let sequential = ScenarioSpec::new("seq", "/small.txt", positive(6)?, PositiveUsize::ONE)?;
        let executor = Arc::new(SequenceExecutor::with_delay(Duration::from_millis(1)));
        let results = run_scenario(Arc::clone(&executor), &sequential).await;
        if results.len() != 6 || executor.max_in_flight.load(Ordering::SeqCst) != 1 {
            return Err(AppError::validation("Sequential scenario misbehaved"));
        }

        let concurrent = ScenarioSpec::new("conc", "/small.txt", positive(20)?, positive(5)?)?;
        let executor = Arc::new(SequenceExecutor::with_delay(Duration::from_millis(5)));
        let results = run_scenario(Arc::clone(&executor), &concurrent).await;
        let max = executor.max_in_flight.load(Ordering::SeqCst);
        if results.len() != 20 || max < 2 || max > 5 {
            return Err(AppError::validation(format!(
                "Concurrent scenario misbehaved: {} results, {} in flight",
                results.len(),
                max
            )));
        }
        Ok(())
    })
}

#[test]
fn header_map_keeps_repeated_names() -> AppResult<()> {
    let headers = vec![
        ("X-Custom-ID".to_owned(), "abc".to_owned()),
        ("X-Env".to_owned(), "lab".to_owned()),
        ("X-Env".to_owned(), "ci".to_owned()),
    ];
    let map = build_header_map(&headers)?;
    if map.get_all("x-env").iter().count() != 2 {
        return Err(AppError::validation("Expected two X-Env values"));
    }
    if map.get("x-custom-id").and_then(|value| value.to_str().ok()) != Some("abc") {
        return Err(AppError::validation("Expected X-Custom-ID header"));
    }
    Ok(())
}

#[test]
fn header_map_rejects_invalid_name() -> AppResult<()> {
    let headers = vec![("bad header".to_owned(), "value".to_owned())];
    match build_header_map(&headers) {
        Err(AppError::Http(crate::error::HttpError::InvalidHeaderName { header, .. }))
            if header == "bad header" =>
        {
            Ok(())
        }
        Err(err) => Err(AppError::validation(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::validation("Expected invalid header name error")),
    }
}
