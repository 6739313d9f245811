use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to create report '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to append to report '{path}': {source}")]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read report '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write output '{path}': {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write line: {source}")]
    WriteLine {
        #[source]
        source: std::fmt::Error,
    },
    #[error("Line {line}: unexpected content '{content}'.")]
    UnexpectedLine { line: usize, content: String },
    #[error("Line {line}: metric '{label}' appears outside a target block.")]
    MetricOutsideBlock { line: usize, label: String },
    #[error("Line {line}: invalid value '{value}' for '{label}'.")]
    InvalidValue {
        line: usize,
        label: String,
        value: String,
    },
    #[error("Scenario '{scenario}', target '{target}': missing '{label}'.")]
    MissingField {
        scenario: String,
        target: String,
        label: &'static str,
    },
    #[error("Scenario '{scenario}', target '{target}': latency lines are incomplete.")]
    IncompleteLatency { scenario: String, target: String },
    #[error("Report '{path}' contains no scenarios.")]
    Empty { path: PathBuf },
    #[error("Comparison needs at least two targets, report has {found}.")]
    NotComparable { found: usize },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
