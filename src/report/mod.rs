//! Persisted text report: data model, writer and the matching reader.
//!
//! The on-disk format is line oriented and shared with existing tooling, so
//! the reader accepts exactly what the writer produces plus the interrupted
//! tail of a run that stopped mid-suite.
mod format;
mod reader;
mod types;
mod writer;


pub use reader::{parse_report, read_report};
pub use types::{ScenarioReport, SuiteReport, TargetReport};
pub use writer::{ReportWriter, render_scenario};

pub(crate) use format::{timestamp_now, write_line};
