use super::analysis::{
    Contenders, Scoreboard, Verdict, higher_wins, lower_wins, overall_means, relative_diff_pct,
    render_analysis, scoreboard,
};
use super::display_name;
use crate::error::{AppError, AppResult, ReportError};
use crate::metrics::{LatencyStats, TargetSummary};
use crate::report::{ScenarioReport, SuiteReport, TargetReport};

fn block(name: &str, mean: Option<f64>, rate: f64) -> TargetReport {
    TargetReport {
        name: name.to_owned(),
        summary: TargetSummary {
            total_requests: 10,
            successful: if mean.is_some() { 10 } else { 0 },
            failed: if mean.is_some() { 0 } else { 10 },
            success_rate_pct: rate,
            latency: mean.map(|mean_ms| LatencyStats {
                mean_ms,
                median_ms: mean_ms,
                stdev_ms: 1.0,
                min_ms: mean_ms / 2.0,
                max_ms: mean_ms * 2.0,
            }),
            total_response_bytes: 0,
        },
    }
}

fn scenario(name: &str, nginx: Option<f64>, apache: Option<f64>) -> ScenarioReport {
    ScenarioReport {
        name: name.to_owned(),
        timestamp: "2024-05-01 10:00:00".to_owned(),
        identification: vec![("X-Custom-ID".to_owned(), "lab".to_owned())],
        targets: vec![
            block("NGINX", nginx, if nginx.is_some() { 100.0 } else { 0.0 }),
            block("APACHE", apache, if apache.is_some() { 100.0 } else { 0.0 }),
        ],
    }
}

fn sample_report() -> SuiteReport {
    SuiteReport {
        scenarios: vec![
            scenario("Teste 1: empate", Some(10.0), Some(10.3)),
            scenario("Teste 2: nginx", Some(5.0), Some(8.0)),
            scenario("Teste 3: apache", Some(9.0), Some(4.0)),
            scenario("Teste 4: nginx", Some(10.0), Some(20.0)),
            scenario("Teste 5: queda", Some(3.0), None),
        ],
    }
}

const CONTENDERS: Contenders<'static> = Contenders {
    first: "NGINX",
    second: "APACHE",
};

#[test]
fn verdicts_follow_metric_direction() -> AppResult<()> {
    let checks = [
        (lower_wins(1.0, 2.0), Verdict::First),
        (lower_wins(3.0, 2.0), Verdict::Second),
        (lower_wins(2.0, 2.0), Verdict::Tie),
        (higher_wins(99.0, 100.0), Verdict::Second),
        (higher_wins(100.0, 100.0), Verdict::Tie),
    ];
    for (index, (actual, expected)) in checks.iter().enumerate() {
        if actual != expected {
            return Err(AppError::validation(format!(
                "Check {}: expected {:?}, got {:?}",
                index, expected, actual
            )));
        }
    }
    if (relative_diff_pct(10.0, 20.0) + 50.0).abs() > 1e-9 {
        return Err(AppError::validation("Expected -50%"));
    }
    if relative_diff_pct(10.0, 0.0) != 0.0_f64 {
        return Err(AppError::validation("Expected 0% against a zero baseline"));
    }
    Ok(())
}

#[test]
fn scoreboard_applies_tie_band_and_skips_missing_data() -> AppResult<()> {
    let board = scoreboard(&sample_report(), CONTENDERS);
    let expected = Scoreboard {
        first_wins: 2,
        second_wins: 1,
        ties: 1,
    };
    if board != expected {
        return Err(AppError::validation(format!(
            "Unexpected scoreboard {:?}",
            board
        )));
    }
    if board.overall() != Verdict::First {
        return Err(AppError::validation("Expected first target to win overall"));
    }
    Ok(())
}

#[test]
fn overall_means_average_available_scenarios() -> AppResult<()> {
    let (first, second) = overall_means(&sample_report(), CONTENDERS)
        .ok_or_else(|| AppError::validation("Expected overall means"))?;
    // nginx: (10 + 5 + 9 + 10 + 3) / 5, apache: (10.3 + 8 + 4 + 20) / 4
    if (first - 7.4).abs() > 1e-9 || (second - 10.575).abs() > 1e-9 {
        return Err(AppError::validation(format!(
            "Unexpected means {} / {}",
            first, second
        )));
    }
    Ok(())
}

#[test]
fn rendered_analysis_lists_every_scenario() -> AppResult<()> {
    let text = render_analysis(&sample_report())?;
    for needle in [
        "ANÁLISE COMPARATIVA DOS TESTES DE CARGA",
        "X-Custom-ID: lab",
        "TABELA COMPARATIVA DE RESULTADOS",
        "TESTE 5: Teste 5: queda",
        "ESTATÍSTICAS GERAIS",
        "  Nginx:  7.40 ms",
        "  Apache: 10.5",
        "  Empates: 1",
        "VENCEDOR GERAL: NGINX",
    ] {
        if !text.contains(needle) {
            return Err(AppError::validation(format!(
                "Missing '{}' in:\n{}",
                needle, text
            )));
        }
    }
    let mean_row = text
        .lines()
        .find(|line| line.starts_with("Latência Média (ms)") && line.contains("-50.0%"))
        .ok_or_else(|| AppError::validation("Missing mean latency row for Teste 4"))?;
    if !mean_row.ends_with("| Nginx") {
        return Err(AppError::validation(format!("Unexpected row '{}'", mean_row)));
    }
    let tie_row = text
        .lines()
        .find(|line| line.starts_with("Taxa de Sucesso (%)"))
        .ok_or_else(|| AppError::validation("Missing success rate row"))?;
    if !tie_row.ends_with("| Empate") {
        return Err(AppError::validation(format!("Unexpected row '{}'", tie_row)));
    }
    Ok(())
}

#[test]
fn single_target_report_is_not_comparable() -> AppResult<()> {
    let report = SuiteReport {
        scenarios: vec![ScenarioReport {
            name: "solo".to_owned(),
            timestamp: String::new(),
            identification: Vec::new(),
            targets: vec![block("NGINX", Some(1.0), 100.0)],
        }],
    };
    match render_analysis(&report) {
        Err(AppError::Report(ReportError::NotComparable { found: 1 })) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected not-comparable error, got {:?}",
            other
        ))),
    }
}

#[test]
fn display_name_title_cases() -> AppResult<()> {
    if display_name("APACHE") != "Apache" || display_name("") != "" {
        return Err(AppError::validation("Unexpected display name"));
    }
    Ok(())
}
