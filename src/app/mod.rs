//! Post-run tooling over a persisted report.
pub mod analysis;

#[cfg(test)]
mod tests;

pub(crate) use analysis::{display_name, run_analyze};
