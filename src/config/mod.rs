//! Configuration file discovery, loading and application.
pub(crate) mod apply;
mod loader;
mod parse;
pub mod types;


pub use apply::build_settings;
pub use loader::load_config;

pub(crate) use loader::load_config_file;
pub(crate) use parse::parse_duration_value;
