use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::args::PositiveUsize;
use crate::domain::{RunMode, ScenarioSpec};
use crate::metrics::RequestResult;

use super::executor::RequestExecutor;

const PROGRESS_EVERY: usize = 10;

/// Runs a scenario in the mode implied by its concurrency level.
///
/// Always returns exactly `request_count` results.
pub async fn run_scenario<E>(executor: Arc<E>, spec: &ScenarioSpec) -> Vec<RequestResult>
where
    E: RequestExecutor + ?Sized + 'static,
{
    match spec.mode() {
        RunMode::Sequential => {
            run_sequential(executor.as_ref(), &spec.endpoint, spec.request_count).await
        }
        RunMode::Concurrent(width) => {
            run_concurrent(executor, &spec.endpoint, spec.request_count, width).await
        }
    }
}

/// Issues `count` requests one at a time; results keep submission order.
pub async fn run_sequential<E>(executor: &E, endpoint: &str, count: PositiveUsize) -> Vec<RequestResult>
where
    E: RequestExecutor + ?Sized,
{
    let total = count.get();
    let mut results = Vec::with_capacity(total);
    for _ in 0..total {
        results.push(executor.execute(endpoint).await);
        log_progress(results.len(), total);
    }
    results
}

/// Issues `count` requests with at most `width` in flight.
///
/// Results are returned in completion order. A task that panics is recorded
/// as a failed result.
pub async fn run_concurrent<E>(
    executor: Arc<E>,
    endpoint: &str,
    count: PositiveUsize,
    width: PositiveUsize,
) -> Vec<RequestResult>
where
    E: RequestExecutor + ?Sized + 'static,
{
    let total = count.get();
    let endpoint: Arc<str> = Arc::from(endpoint);
    let semaphore = Arc::new(Semaphore::new(width.get()));
    let completed = Arc::new(AtomicUsize::new(0));
    let (result_tx, mut result_rx) = mpsc::channel::<RequestResult>(total);
    let mut tasks = JoinSet::new();
    let mut results = Vec::with_capacity(total);

    for _ in 0..total {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(err) => {
                warn!("Request admission stopped: {}", err);
                results.push(RequestResult::transport_failure(
                    &endpoint,
                    Duration::ZERO,
                    format!("request not admitted: {}", err),
                ));
                continue;
            }
        };
        let executor = Arc::clone(&executor);
        let endpoint = Arc::clone(&endpoint);
        let completed = Arc::clone(&completed);
        let result_tx = result_tx.clone();
        tasks.spawn(async move {
            let result = executor.execute(&endpoint).await;
            drop(permit);
            let done = completed.fetch_add(1, Ordering::Relaxed).saturating_add(1);
            log_progress(done, total);
            if result_tx.send(result).await.is_err() {
                debug!("Result collector closed before {} completed", endpoint);
            }
        });
    }
    drop(result_tx);

    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined {
            warn!("Request task for {} failed: {}", endpoint, err);
            results.push(RequestResult::transport_failure(
                &endpoint,
                Duration::ZERO,
                format!("request task failed: {}", err),
            ));
        }
    }
    while let Some(result) = result_rx.recv().await {
        results.push(result);
    }
    results
}

fn log_progress(done: usize, total: usize) {
    if done % PROGRESS_EVERY == 0 || done == total {
        debug!("Progress: {}/{} requests", done, total);
    }
}
