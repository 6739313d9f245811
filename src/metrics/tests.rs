use std::time::Duration;

use super::*;
use crate::error::{AppError, AppResult};

const EPSILON: f64 = 1e-9;

fn ok(latency_us: u64, bytes: u64) -> RequestResult {
    RequestResult::from_response("/small.txt", 200, Duration::from_micros(latency_us), bytes)
}

fn refused(latency_us: u64) -> RequestResult {
    RequestResult::transport_failure(
        "/small.txt",
        Duration::from_micros(latency_us),
        "connection refused".to_owned(),
    )
}

fn close(left: f64, right: f64) -> bool {
    (left - right).abs() < EPSILON
}

fn latency_of(summary: &TargetSummary) -> AppResult<LatencyStats> {
    summary
        .latency
        .ok_or_else(|| AppError::validation("Expected latency stats"))
}

#[test]
fn empty_input_yields_zeroed_summary() -> AppResult<()> {
    let summary = summarize(&[]);
    if summary != TargetSummary::empty() {
        return Err(AppError::validation(format!(
            "Expected empty summary, got {:?}",
            summary
        )));
    }
    Ok(())
}

#[test]
fn counts_partition_successes_and_failures() -> AppResult<()> {
    let results = vec![
        ok(1_000, 10),
        refused(300),
        RequestResult::from_response("/small.txt", 404, Duration::from_micros(900), 50),
        ok(2_000, 10),
    ];
    let summary = summarize(&results);
    if summary.total_requests != 4 || summary.successful != 2 || summary.failed != 2 {
        return Err(AppError::validation(format!(
            "Unexpected counts: {:?}",
            summary
        )));
    }
    if summary.successful.saturating_add(summary.failed) != summary.total_requests {
        return Err(AppError::validation("successful + failed != total"));
    }
    if !close(summary.success_rate_pct, 50.0) {
        return Err(AppError::validation(format!(
            "Unexpected success rate {}",
            summary.success_rate_pct
        )));
    }
    if summary.total_response_bytes != 20 {
        return Err(AppError::validation(format!(
            "Failed responses must not count towards bytes, got {}",
            summary.total_response_bytes
        )));
    }
    Ok(())
}

#[test]
fn non_2xx_is_failure_without_error_message() -> AppResult<()> {
    let result = RequestResult::from_response("/", 503, Duration::from_millis(3), 12);
    if result.success() || result.status_code() != 503 || result.error().is_some() {
        return Err(AppError::validation(format!(
            "Unexpected non-2xx record: {:?}",
            result
        )));
    }
    let failure = refused(10);
    if failure.success() || failure.status_code() != 0 || failure.error().is_none() {
        return Err(AppError::validation(format!(
            "Unexpected transport failure record: {:?}",
            failure
        )));
    }
    if failure.response_bytes() != 0 {
        return Err(AppError::validation("Transport failure must report 0 bytes"));
    }
    Ok(())
}

#[test]
fn all_failed_has_zero_rate_and_no_latency() -> AppResult<()> {
    let results: Vec<RequestResult> = (0..20).map(|index| refused(100 + index)).collect();
    let summary = summarize(&results);
    if summary.successful != 0 || summary.failed != 20 {
        return Err(AppError::validation(format!(
            "Unexpected counts: {:?}",
            summary
        )));
    }
    if summary.success_rate_pct != 0.0_f64 {
        return Err(AppError::validation("Expected 0% success rate"));
    }
    if summary.latency.is_some() {
        return Err(AppError::validation("Expected no latency stats"));
    }
    Ok(())
}

#[test]
fn single_success_has_zero_stdev() -> AppResult<()> {
    let summary = summarize(&[ok(7_250, 1), refused(5)]);
    let latency = latency_of(&summary)?;
    if latency.stdev_ms != 0.0_f64 {
        return Err(AppError::validation(format!(
            "Expected stdev 0, got {}",
            latency.stdev_ms
        )));
    }
    if !close(latency.mean_ms, 7.25) || !close(latency.median_ms, 7.25) {
        return Err(AppError::validation(format!(
            "Unexpected single-sample stats: {:?}",
            latency
        )));
    }
    Ok(())
}

#[test]
fn known_sample_moments() -> AppResult<()> {
    let results = vec![ok(40_000, 1), ok(10_000, 1), ok(30_000, 1), ok(20_000, 1)];
    let latency = latency_of(&summarize(&results))?;
    let expected_stdev = (500.0_f64 / 3.0).sqrt();
    let checks = [
        ("mean", latency.mean_ms, 25.0),
        ("median", latency.median_ms, 25.0),
        ("stdev", latency.stdev_ms, expected_stdev),
        ("min", latency.min_ms, 10.0),
        ("max", latency.max_ms, 40.0),
    ];
    for (label, actual, expected) in checks {
        if !close(actual, expected) {
            return Err(AppError::validation(format!(
                "{}: expected {}, got {}",
                label, expected, actual
            )));
        }
    }
    Ok(())
}

#[test]
fn odd_sample_median_is_middle_order_statistic() -> AppResult<()> {
    let results = vec![ok(9_000, 1), ok(1_000, 1), ok(5_000, 1)];
    let latency = latency_of(&summarize(&results))?;
    if !close(latency.median_ms, 5.0) {
        return Err(AppError::validation(format!(
            "Expected median 5, got {}",
            latency.median_ms
        )));
    }
    Ok(())
}

#[test]
fn permutations_produce_identical_summaries() -> AppResult<()> {
    let mut results: Vec<RequestResult> = [1_113, 2_779, 3_301, 987, 15_443, 4_001, 77, 6_662]
        .iter()
        .map(|latency| ok(*latency, 333))
        .collect();
    results.push(refused(12_000));
    let baseline = summarize(&results);

    let mut reversed = results.clone();
    reversed.reverse();
    let mut rotated = results.clone();
    rotated.rotate_left(3);

    for permutation in [reversed, rotated] {
        let summary = summarize(&permutation);
        if summary != baseline {
            return Err(AppError::validation(format!(
                "Summary changed under permutation: {:?} vs {:?}",
                summary, baseline
            )));
        }
    }
    Ok(())
}

#[test]
fn stats_stay_within_observed_range() -> AppResult<()> {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    for round in 0..50_usize {
        let count = round.saturating_add(1);
        let mut results = Vec::with_capacity(count);
        for _ in 0..count {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            results.push(ok(seed % 5_000_000, 1));
        }
        let summary = summarize(&results);
        let latency = latency_of(&summary)?;
        let mean_ok = latency.min_ms <= latency.mean_ms && latency.mean_ms <= latency.max_ms;
        let median_ok = latency.min_ms <= latency.median_ms && latency.median_ms <= latency.max_ms;
        if !mean_ok || !median_ok || latency.stdev_ms < 0.0 {
            return Err(AppError::validation(format!(
                "Round {}: stats out of range: {:?}",
                round, latency
            )));
        }
        if summary.total_requests != u64::try_from(count).unwrap_or(u64::MAX) {
            return Err(AppError::validation("total_requests != input size"));
        }
    }
    Ok(())
}
