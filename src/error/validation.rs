use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid header format: '{value}'. Expected 'Key: Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Target name must not be empty.")]
    TargetNameEmpty,
    #[error("Target host must not be empty.")]
    TargetHostEmpty,
    #[error("Target port must be > 0.")]
    TargetPortZero,
    #[error("Duplicate target name '{name}'.")]
    DuplicateTarget { name: String },
    #[error("At least one target is required.")]
    NoTargets,
    #[error("At least one scenario is required.")]
    NoScenarios,
    #[error("Scenario name must not be empty.")]
    ScenarioNameEmpty,
    #[error("Endpoint '{endpoint}' must be a path starting with a single '/'.")]
    EndpointNotAbsolute { endpoint: String },
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
