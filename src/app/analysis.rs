use std::path::Path;

use tracing::info;

use crate::args::AnalyzeArgs;
use crate::error::{AppError, AppResult, ReportError};
use crate::metrics::LatencyStats;
use crate::report::{ScenarioReport, SuiteReport, read_report, write_line};

const TABLE_WIDTH: usize = 100;
const PERCENT: f64 = 100.0;
/// Mean latencies closer than this count as a tie on the scoreboard.
const TIE_BAND_MS: f64 = 0.5;
const TIE_LABEL: &str = "Empate";

/// Which of the two compared targets won a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    First,
    Second,
    Tie,
}

#[must_use]
pub fn lower_wins(first: f64, second: f64) -> Verdict {
    if first < second {
        Verdict::First
    } else if second < first {
        Verdict::Second
    } else {
        Verdict::Tie
    }
}

#[must_use]
pub fn higher_wins(first: f64, second: f64) -> Verdict {
    if first > second {
        Verdict::First
    } else if second > first {
        Verdict::Second
    } else {
        Verdict::Tie
    }
}

/// `(first - second) / second` in percent; 0 when `second` is not positive.
#[must_use]
pub fn relative_diff_pct(first: f64, second: f64) -> f64 {
    if second > 0.0 {
        (first - second) / second * PERCENT
    } else {
        0.0
    }
}

/// Per-scenario wins by mean latency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub first_wins: usize,
    pub second_wins: usize,
    pub ties: usize,
}

impl Scoreboard {
    #[must_use]
    pub fn overall(&self) -> Verdict {
        match self.first_wins.cmp(&self.second_wins) {
            std::cmp::Ordering::Greater => Verdict::First,
            std::cmp::Ordering::Less => Verdict::Second,
            std::cmp::Ordering::Equal => Verdict::Tie,
        }
    }
}

/// The two targets being compared, by report block name.
#[derive(Debug, Clone, Copy)]
pub struct Contenders<'a> {
    pub first: &'a str,
    pub second: &'a str,
}

impl Contenders<'_> {
    fn label(&self, verdict: Verdict) -> String {
        match verdict {
            Verdict::First => display_name(self.first),
            Verdict::Second => display_name(self.second),
            Verdict::Tie => TIE_LABEL.to_owned(),
        }
    }

    fn latencies(&self, scenario: &ScenarioReport) -> Option<(LatencyStats, LatencyStats)> {
        let first = scenario.target(self.first)?.summary.latency?;
        let second = scenario.target(self.second)?.summary.latency?;
        Some((first, second))
    }
}

/// Counts mean-latency wins over scenarios where both targets have data.
#[must_use]
pub fn scoreboard(report: &SuiteReport, contenders: Contenders<'_>) -> Scoreboard {
    let mut board = Scoreboard::default();
    for (first, second) in report
        .scenarios
        .iter()
        .filter_map(|scenario| contenders.latencies(scenario))
    {
        if (first.mean_ms - second.mean_ms).abs() < TIE_BAND_MS {
            board.ties = board.ties.saturating_add(1);
        } else if second.mean_ms < first.mean_ms {
            board.second_wins = board.second_wins.saturating_add(1);
        } else {
            board.first_wins = board.first_wins.saturating_add(1);
        }
    }
    board
}

/// Mean of each target's per-scenario mean latency.
///
/// `None` unless both targets have at least one scenario with data.
#[must_use]
pub fn overall_means(report: &SuiteReport, contenders: Contenders<'_>) -> Option<(f64, f64)> {
    let mean_of = |name: &str| {
        let means: Vec<f64> = report
            .scenarios
            .iter()
            .filter_map(|scenario| scenario.target(name)?.summary.latency)
            .map(|latency| latency.mean_ms)
            .collect();
        if means.is_empty() {
            None
        } else {
            Some(means.iter().sum::<f64>() / means.len() as f64)
        }
    };
    Some((mean_of(contenders.first)?, mean_of(contenders.second)?))
}

/// Renders the comparison of the first two targets found in the report.
///
/// # Errors
///
/// Returns an error when the report has fewer than two targets or a line
/// cannot be formatted.
pub fn render_analysis(report: &SuiteReport) -> AppResult<String> {
    let names = report.target_names();
    let (Some(first), Some(second)) = (names.first(), names.get(1)) else {
        return Err(AppError::report(ReportError::NotComparable { found: names.len() }));
    };
    let contenders = Contenders { first, second };

    let mut output = String::new();
    write_line(&mut output, "ANÁLISE COMPARATIVA DOS TESTES DE CARGA")?;
    if let Some(scenario) = report.scenarios.first() {
        for (label, value) in &scenario.identification {
            write_line(&mut output, &format!("{}: {}", label, value))?;
        }
    }
    write_line(&mut output, "")?;
    render_table(&mut output, report, contenders)?;
    write_line(&mut output, "")?;
    render_overall(&mut output, report, contenders)?;
    Ok(output)
}

fn render_table(output: &mut String, report: &SuiteReport, contenders: Contenders<'_>) -> AppResult<()> {
    let rule = "=".repeat(TABLE_WIDTH);
    let dashes = "-".repeat(TABLE_WIDTH);
    write_line(output, &rule)?;
    write_line(output, "TABELA COMPARATIVA DE RESULTADOS")?;
    write_line(output, &rule)?;
    write_line(output, "")?;

    for (index, scenario) in report.scenarios.iter().enumerate() {
        write_line(
            output,
            &format!("TESTE {}: {}", index.saturating_add(1), scenario.name),
        )?;
        write_line(output, &dashes)?;
        write_line(
            output,
            &format!(
                "{:<30} | {:>15} | {:>15} | {:>15} | Vencedor",
                "Métrica",
                display_name(contenders.first),
                display_name(contenders.second),
                "Diferença"
            ),
        )?;
        write_line(output, &dashes)?;

        if let Some((first, second)) = contenders.latencies(scenario) {
            for (label, left, right) in [
                ("Latência Média (ms)", first.mean_ms, second.mean_ms),
                ("Latência Mediana (ms)", first.median_ms, second.median_ms),
                ("Desvio Padrão (ms)", first.stdev_ms, second.stdev_ms),
                ("Latência Mínima (ms)", first.min_ms, second.min_ms),
                ("Latência Máxima (ms)", first.max_ms, second.max_ms),
            ] {
                let verdict = contenders.label(lower_wins(left, right));
                write_row(output, label, left, right, &verdict)?;
            }
        }
        if let (Some(first), Some(second)) = (
            scenario.target(contenders.first),
            scenario.target(contenders.second),
        ) {
            let left = first.summary.success_rate_pct;
            let right = second.summary.success_rate_pct;
            let verdict = contenders.label(higher_wins(left, right));
            write_row(output, "Taxa de Sucesso (%)", left, right, &verdict)?;
        }
        write_line(output, "")?;
    }

    write_line(output, &rule)
}

fn write_row(output: &mut String, label: &str, left: f64, right: f64, verdict: &str) -> AppResult<()> {
    write_line(
        output,
        &format!(
            "{:<30} | {:>15.2} | {:>15.2} | {:>14.1}% | {}",
            label,
            left,
            right,
            relative_diff_pct(left, right),
            verdict
        ),
    )
}

fn render_overall(output: &mut String, report: &SuiteReport, contenders: Contenders<'_>) -> AppResult<()> {
    let rule = "=".repeat(TABLE_WIDTH);
    let first_name = display_name(contenders.first);
    let second_name = display_name(contenders.second);
    write_line(output, &rule)?;
    write_line(output, "ESTATÍSTICAS GERAIS")?;
    write_line(output, &rule)?;
    write_line(output, "")?;

    if let Some((first, second)) = overall_means(report, contenders) {
        write_line(output, "Latência Média Geral:")?;
        write_line(output, &format!("  {:<8}{:.2} ms", format!("{}:", first_name), first))?;
        write_line(output, &format!("  {:<8}{:.2} ms", format!("{}:", second_name), second))?;
        write_line(output, &format!("  Diferença: {:.2} ms", (first - second).abs()))?;
        let winner = match lower_wins(first, second) {
            Verdict::First => format!(
                "  Vencedor: {} ({:.1}% mais rápido)",
                first_name,
                relative_diff_pct(second, first)
            ),
            Verdict::Second => format!(
                "  Vencedor: {} ({:.1}% mais rápido)",
                second_name,
                relative_diff_pct(first, second)
            ),
            Verdict::Tie => format!("  Vencedor: {}", TIE_LABEL),
        };
        write_line(output, &winner)?;
        write_line(output, "")?;
    }

    let board = scoreboard(report, contenders);
    write_line(output, "Placar de Vitórias (por latência média):")?;
    write_line(
        output,
        &format!("  {:<8}{} vitórias", format!("{}:", first_name), board.first_wins),
    )?;
    write_line(
        output,
        &format!("  {:<8}{} vitórias", format!("{}:", second_name), board.second_wins),
    )?;
    write_line(output, &format!("  Empates: {}", board.ties))?;
    write_line(output, "")?;
    let overall = match board.overall() {
        Verdict::First => format!("VENCEDOR GERAL: {}", contenders.first.to_uppercase()),
        Verdict::Second => format!("VENCEDOR GERAL: {}", contenders.second.to_uppercase()),
        Verdict::Tie => "RESULTADO: EMPATE TÉCNICO".to_owned(),
    };
    write_line(output, &overall)?;
    write_line(output, "")?;
    write_line(output, &rule)
}

/// `NGINX` -> `Nginx`.
pub(crate) fn display_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prints the analysis of `args.report` and optionally saves it.
///
/// # Errors
///
/// Returns an error when the report cannot be read or compared, or the
/// output file cannot be written.
pub(crate) async fn run_analyze(args: &AnalyzeArgs) -> AppResult<()> {
    let report = read_report(Path::new(&args.report)).await?;
    info!(
        "{} scenarios loaded from {}",
        report.scenarios.len(),
        args.report
    );
    let text = render_analysis(&report)?;
    print!("{}", text);

    if let Some(output) = args.output.as_deref() {
        let path = Path::new(output);
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                AppError::report(ReportError::WriteOutput {
                    path: parent.to_path_buf(),
                    source: err,
                })
            })?;
        }
        tokio::fs::write(path, &text).await.map_err(|err| {
            AppError::report(ReportError::WriteOutput {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
        info!("Analysis written to {}", path.display());
    }
    Ok(())
}
