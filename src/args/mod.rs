//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::{AnalyzeArgs, ChartsArgs, Command, SuiteArgs};
pub use types::PositiveUsize;

pub(crate) use defaults::{
    DEFAULT_CHARTS_DIR, DEFAULT_CONFIG_FILES, DEFAULT_CUSTOM_ID, DEFAULT_REPORT_PATH,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
};
pub(crate) use parsers::parse_header;
