//! Core library for the `loadcmp` CLI.
//!
//! `loadcmp` runs a fixed suite of HTTP load scenarios against every
//! configured target, appends one text block per scenario to a report file,
//! and can later analyze or chart that report. The modules below are the
//! building blocks used by the binary: CLI argument types, configuration,
//! request execution, statistics, the report codec and the comparison
//! commands.
pub mod app;
pub mod args;
pub mod charts;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod metrics;
pub mod report;
pub mod suite;

mod entry;
mod system;

pub use entry::run;
