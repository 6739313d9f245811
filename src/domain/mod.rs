//! Static description of a suite: who is measured, with what, and by whom.
mod scenario;
mod settings;
mod target;

#[cfg(test)]
mod tests;

pub use scenario::{RunMode, ScenarioSpec};
pub use settings::{Identity, SuiteSettings};
pub use target::Target;
