//! Per-request result records and their statistical reduction.
mod aggregate;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::summarize;
pub use types::{LatencyStats, RequestResult, TargetSummary};
