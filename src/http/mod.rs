//! HTTP request execution and the scenario runner.
mod client;
mod executor;
mod runner;

#[cfg(test)]
mod tests;

pub use executor::{HttpExecutor, RequestExecutor};
pub use runner::{run_concurrent, run_scenario, run_sequential};

pub(crate) use client::build_header_map;
