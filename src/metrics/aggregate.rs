use super::types::{LatencyStats, RequestResult, TargetSummary};

const PERCENT: f64 = 100.0;

/// Reduces a scenario's results for one target into a summary.
///
/// Latency statistics cover successful requests only. Samples are sorted
/// before any floating-point accumulation, so every permutation of the same
/// results yields a bit-identical summary.
#[must_use]
pub fn summarize(results: &[RequestResult]) -> TargetSummary {
    if results.is_empty() {
        return TargetSummary::empty();
    }

    let mut latencies: Vec<f64> = Vec::with_capacity(results.len());
    let mut total_response_bytes: u64 = 0;
    for result in results.iter().filter(|result| result.success()) {
        latencies.push(result.latency_ms());
        total_response_bytes = total_response_bytes.saturating_add(result.response_bytes());
    }

    let total_requests = to_u64(results.len());
    let successful = to_u64(latencies.len());
    let failed = total_requests.saturating_sub(successful);
    let success_rate_pct = if successful == 0 {
        0.0
    } else {
        successful as f64 / total_requests as f64 * PERCENT
    };

    TargetSummary {
        total_requests,
        successful,
        failed,
        success_rate_pct,
        latency: latency_stats(&mut latencies),
        total_response_bytes,
    }
}

fn latency_stats(samples: &mut [f64]) -> Option<LatencyStats> {
    samples.sort_by(f64::total_cmp);
    let (&min_ms, &max_ms) = (samples.first()?, samples.last()?);

    let count = samples.len() as f64;
    let sum: f64 = samples.iter().sum();
    // Rounding in the sum may push the mean a ulp outside the observed range.
    let mean_ms = (sum / count).clamp(min_ms, max_ms);

    Some(LatencyStats {
        mean_ms,
        median_ms: median(samples),
        stdev_ms: sample_stdev(samples, mean_ms),
        min_ms,
        max_ms,
    })
}

/// Expects `sorted` to be ascending and non-empty.
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return sorted.get(mid).copied().unwrap_or(0.0);
    }
    let lower = mid.checked_sub(1).and_then(|index| sorted.get(index));
    match (lower, sorted.get(mid)) {
        (Some(lower), Some(upper)) => (lower + upper) / 2.0,
        _ => 0.0,
    }
}

/// Bessel-corrected (n - 1); a single sample has a deviation of 0.
fn sample_stdev(sorted: &[f64], mean: f64) -> f64 {
    if sorted.len() < 2 {
        return 0.0;
    }
    let squares: f64 = sorted
        .iter()
        .map(|value| {
            let delta = value - mean;
            delta * delta
        })
        .sum();
    let denominator = sorted.len().saturating_sub(1) as f64;
    (squares / denominator).sqrt()
}

fn to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
