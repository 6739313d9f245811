use super::*;
use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult, ValidationError};

fn positive(value: usize) -> AppResult<PositiveUsize> {
    Ok(PositiveUsize::try_from(value)?)
}

#[test]
fn target_trims_and_uppercases_report_name() -> AppResult<()> {
    let target = Target::new("  nginx ", " 127.0.0.1 ", 8080)?;
    if target.name != "nginx" || target.host != "127.0.0.1" {
        return Err(AppError::validation(format!("Unexpected target: {:?}", target)));
    }
    if target.report_name() != "NGINX" {
        return Err(AppError::validation("Expected an uppercase report name"));
    }
    Ok(())
}

#[test]
fn target_rejects_blank_fields_and_port_zero() -> AppResult<()> {
    if !matches!(Target::new(" ", "localhost", 80), Err(ValidationError::TargetNameEmpty)) {
        return Err(AppError::validation("Expected TargetNameEmpty"));
    }
    if !matches!(Target::new("a", "", 80), Err(ValidationError::TargetHostEmpty)) {
        return Err(AppError::validation("Expected TargetHostEmpty"));
    }
    if !matches!(Target::new("a", "localhost", 0), Err(ValidationError::TargetPortZero)) {
        return Err(AppError::validation("Expected TargetPortZero"));
    }
    Ok(())
}

#[test]
fn base_url_brackets_ipv6_literals() -> AppResult<()> {
    let v4 = Target::new("nginx", "127.0.0.1", 8080)?.base_url()?;
    if v4.as_str() != "http://127.0.0.1:8080/" {
        return Err(AppError::validation(format!("Unexpected URL: {}", v4)));
    }
    let v6 = Target::new("apache", "::1", 8081)?.base_url()?;
    if v6.as_str() != "http://[::1]:8081/" {
        return Err(AppError::validation(format!("Unexpected URL: {}", v6)));
    }
    let joined = v4.join("/api/status").map_err(|err| AppError::validation(err.to_string()))?;
    if joined.as_str() != "http://127.0.0.1:8080/api/status" {
        return Err(AppError::validation(format!("Unexpected join: {}", joined)));
    }
    Ok(())
}

#[test]
fn scenario_mode_follows_concurrency() -> AppResult<()> {
    let sequential = ScenarioSpec::new("seq", "/", positive(10)?, positive(1)?)?;
    if sequential.mode() != RunMode::Sequential {
        return Err(AppError::validation("Concurrency 1 must run sequentially"));
    }
    let concurrent = ScenarioSpec::new("conc", "/", positive(10)?, positive(4)?)?;
    if concurrent.mode() != RunMode::Concurrent(positive(4)?) {
        return Err(AppError::validation("Concurrency 4 must run with a pool of 4"));
    }
    Ok(())
}

#[test]
fn scenario_requires_name_and_absolute_endpoint() -> AppResult<()> {
    let result = ScenarioSpec::new("x", "api/status", positive(1)?, positive(1)?);
    if !matches!(result, Err(ValidationError::EndpointNotAbsolute { .. })) {
        return Err(AppError::validation("Expected EndpointNotAbsolute"));
    }
    let result = ScenarioSpec::new("x", "//other.host/x", positive(1)?, positive(1)?);
    if !matches!(result, Err(ValidationError::EndpointNotAbsolute { .. })) {
        return Err(AppError::validation("Expected a scheme-relative endpoint to be rejected"));
    }
    let result = ScenarioSpec::new("  ", "/", positive(1)?, positive(1)?);
    if !matches!(result, Err(ValidationError::ScenarioNameEmpty)) {
        return Err(AppError::validation("Expected ScenarioNameEmpty"));
    }
    Ok(())
}

#[test]
fn identity_lines_skip_missing_fields() -> AppResult<()> {
    let identity = Identity {
        name: None,
        registration: Some("2024001".to_owned()),
        custom_id: "lab".to_owned(),
    };
    let lines = identity.identification_lines();
    let expected = vec![
        ("Matrícula".to_owned(), "2024001".to_owned()),
        ("X-Custom-ID".to_owned(), "lab".to_owned()),
    ];
    if lines != expected {
        return Err(AppError::validation(format!("Unexpected lines: {:?}", lines)));
    }
    Ok(())
}
