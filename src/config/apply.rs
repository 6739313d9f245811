use std::path::PathBuf;

use md5::{Digest, Md5};

use crate::args::{
    DEFAULT_CUSTOM_ID, DEFAULT_REPORT_PATH, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
    PositiveUsize, SuiteArgs, parse_header,
};
use crate::domain::{Identity, ScenarioSpec, SuiteSettings, Target};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::suite::{default_scenarios, default_targets};

use super::types::{ConfigFile, IdentityConfig, ScenarioConfig, TargetConfig};

/// Resolves the settings of one suite run from the config file and CLI.
///
/// Keys missing from the config fall back to the built-in reference suite;
/// `--output` overrides `report_path`.
///
/// # Errors
///
/// Returns an error when a config value is invalid, a target or scenario
/// fails validation, or the resulting suite is empty.
pub fn build_settings(config: Option<&ConfigFile>, args: &SuiteArgs) -> AppResult<SuiteSettings> {
    let empty = ConfigFile::default();
    let config = config.unwrap_or(&empty);

    let targets = match config.targets.as_deref() {
        Some(targets) => build_targets(targets)?,
        None => default_targets()?,
    };
    let scenarios = match config.scenarios.as_deref() {
        Some(scenarios) => build_scenarios(scenarios)?,
        None => default_scenarios()?,
    };
    if targets.is_empty() {
        return Err(AppError::validation(ValidationError::NoTargets));
    }
    if scenarios.is_empty() {
        return Err(AppError::validation(ValidationError::NoScenarios));
    }

    let report_path = args
        .output
        .as_deref()
        .or(config.report_path.as_deref())
        .unwrap_or(DEFAULT_REPORT_PATH);

    let request_timeout = match config.timeout.as_ref() {
        Some(value) => value.to_duration().map_err(AppError::config)?,
        None => DEFAULT_REQUEST_TIMEOUT,
    };

    let extra_headers = config
        .headers
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|header| {
            parse_header(header)
                .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(SuiteSettings {
        targets,
        scenarios,
        identity: build_identity(config.identity.as_ref()),
        report_path: PathBuf::from(report_path),
        request_timeout,
        user_agent: config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
        extra_headers,
    })
}

fn build_identity(identity: Option<&IdentityConfig>) -> Identity {
    let non_empty = |value: Option<&String>| {
        value
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
    };
    let name = non_empty(identity.and_then(|identity| identity.name.as_ref()));
    let registration = non_empty(identity.and_then(|identity| identity.registration.as_ref()));
    let custom_id = non_empty(identity.and_then(|identity| identity.custom_id.as_ref()))
        .or_else(|| derived_custom_id(registration.as_deref(), name.as_deref()))
        .unwrap_or_else(|| DEFAULT_CUSTOM_ID.to_owned());
    Identity {
        name,
        registration,
        custom_id,
    }
}

/// Hex MD5 of `"<registration> <name>"`, when both are known.
fn derived_custom_id(registration: Option<&str>, name: Option<&str>) -> Option<String> {
    let (registration, name) = (registration?, name?);
    let mut hasher = Md5::new();
    hasher.update(format!("{} {}", registration, name).as_bytes());
    Some(format!("{:x}", hasher.finalize()))
}

fn build_targets(configs: &[TargetConfig]) -> AppResult<Vec<Target>> {
    let mut targets: Vec<Target> = Vec::with_capacity(configs.len());
    for (index, config) in configs.iter().enumerate() {
        let target = Target::new(&config.name, &config.host, config.port).map_err(|err| {
            AppError::config(ConfigError::InvalidTarget {
                index,
                source: err,
            })
        })?;
        // Report blocks are keyed by the uppercase name.
        if targets
            .iter()
            .any(|existing| existing.report_name() == target.report_name())
        {
            return Err(AppError::validation(ValidationError::DuplicateTarget {
                name: target.name,
            }));
        }
        targets.push(target);
    }
    Ok(targets)
}

fn build_scenarios(configs: &[ScenarioConfig]) -> AppResult<Vec<ScenarioSpec>> {
    configs
        .iter()
        .enumerate()
        .map(|(index, config)| -> AppResult<ScenarioSpec> {
            let request_count = ensure_positive(config.requests, "requests")?;
            let concurrency = ensure_positive(config.concurrency, "concurrency")?;
            ScenarioSpec::new(&config.name, &config.endpoint, request_count, concurrency).map_err(
                |err| {
                    AppError::config(ConfigError::InvalidScenario {
                        index,
                        source: err,
                    })
                },
            )
        })
        .collect()
}

fn ensure_positive(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
