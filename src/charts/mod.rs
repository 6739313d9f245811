//! PNG charts comparing targets across the scenarios of a saved report.

mod bars;
mod lines;
mod series;


use std::path::Path;

use plotters::style::RGBColor;
use tokio::fs;
use tracing::{error, info};

use crate::app::analysis::{Contenders, scoreboard};
use crate::args::ChartsArgs;
use crate::error::{AppError, AppResult, ReportError};
use crate::report::{SuiteReport, read_report};
use bars::BarLayout;
use lines::Panel;

pub use series::{
    ChartMetric, ChartSeries, deviation_band, metric_series, overall_series, short_label,
};

/// File name of the mean latency line chart.
pub const LINE_CHART_FILE: &str = "evolucao_latencia.png";
pub const MIN_MAX_LINES_FILE: &str = "linhas_min_max.png";
pub const DEVIATION_CHART_FILE: &str = "linhas_desvio_area.png";
pub const SCOREBOARD_CHART_FILE: &str = "placar_vencedores.png";
pub const OVERALL_CHART_FILE: &str = "comparativo_geral.png";

const SCENARIO_AXIS: &str = "Cenários de Teste";

const PALETTE: [RGBColor; 4] = [
    RGBColor(0, 168, 107),
    RGBColor(210, 4, 45),
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
];

fn palette(index: usize) -> RGBColor {
    index
        .checked_rem(PALETTE.len())
        .and_then(|slot| PALETTE.get(slot))
        .copied()
        .unwrap_or(RGBColor(0, 0, 0))
}

/// Scenario tick labels in report order.
#[must_use]
pub fn scenario_labels(report: &SuiteReport) -> Vec<String> {
    report
        .scenarios
        .iter()
        .map(|scenario| short_label(&scenario.name))
        .collect()
}

/// Reads the report and writes every chart into `args.out_dir`.
///
/// # Errors
///
/// Returns an error when the report cannot be read or parsed, the output
/// directory cannot be created, or a chart fails to render.
pub(crate) async fn run_charts(args: &ChartsArgs) -> AppResult<()> {
    let report = read_report(Path::new(&args.report)).await?;
    let out_dir = Path::new(&args.out_dir);

    if let Err(err) = fs::create_dir_all(out_dir).await {
        error!("Failed to create output directory '{}': {}", args.out_dir, err);
        return Err(AppError::report(ReportError::WriteOutput {
            path: out_dir.to_path_buf(),
            source: err,
        }));
    }

    plot_report(&report, out_dir)?;
    info!("Charts written to '{}'.", args.out_dir);
    Ok(())
}

/// Renders all charts for an already parsed report.
///
/// The scoreboard needs two targets and is skipped otherwise.
///
/// # Errors
///
/// Returns an error when a chart fails to render or be saved.
pub fn plot_report(report: &SuiteReport, out_dir: &Path) -> AppResult<()> {
    let labels = scenario_labels(report);

    for metric in ChartMetric::BARS {
        info!("Plotting {}...", metric.title());
        let layout = BarLayout {
            title: metric.title(),
            x_desc: SCENARIO_AXIS,
            y_desc: metric.axis_label(),
        };
        let series = metric_series(report, metric);
        bars::plot_grouped_bars(&labels, &series, &layout, &out_dir.join(metric.file_name()))?;
    }

    info!("Plotting overall comparison...");
    let overall_labels: Vec<String> = ChartMetric::OVERALL
        .iter()
        .map(|metric| metric.short_name().to_owned())
        .collect();
    bars::plot_grouped_bars(
        &overall_labels,
        &overall_series(report),
        &BarLayout {
            title: "Comparação Geral de Métricas (média de todos os testes)",
            x_desc: "Métricas",
            y_desc: "Tempo (ms)",
        },
        &out_dir.join(OVERALL_CHART_FILE),
    )?;

    let names = report.target_names();
    if let (Some(first), Some(second)) = (names.first(), names.get(1)) {
        info!("Plotting scoreboard...");
        let board = scoreboard(report, Contenders { first, second });
        bars::plot_scoreboard(
            &board,
            first,
            second,
            report.scenarios.len(),
            &out_dir.join(SCOREBOARD_CHART_FILE),
        )?;
    } else {
        info!("Skipping scoreboard: the report has {} target(s).", names.len());
    }

    info!("Plotting mean latency evolution...");
    let mean = metric_series(report, ChartMetric::MeanLatency);
    lines::plot_lines(
        &labels,
        &mean,
        &Panel {
            title: "Evolução da Latência Média por Cenário",
            y_desc: "Latência Média (ms)",
        },
        &out_dir.join(LINE_CHART_FILE),
    )?;

    info!("Plotting min/max latency lines...");
    lines::plot_min_max_lines(
        &labels,
        &metric_series(report, ChartMetric::MinLatency),
        &metric_series(report, ChartMetric::MaxLatency),
        &out_dir.join(MIN_MAX_LINES_FILE),
    )?;

    info!("Plotting deviation band...");
    let stdev = metric_series(report, ChartMetric::StdevLatency);
    let bands: Vec<Vec<(f64, f64)>> = mean
        .iter()
        .zip(stdev.iter())
        .map(|(mean, stdev)| deviation_band(mean, stdev))
        .collect();
    lines::plot_deviation_band(&labels, &mean, &bands, &out_dir.join(DEVIATION_CHART_FILE))?;
    Ok(())
}

/// Every file [`plot_report`] can write.
#[must_use]
pub fn chart_files() -> Vec<&'static str> {
    let mut files: Vec<&'static str> = ChartMetric::BARS
        .iter()
        .map(|metric| metric.file_name())
        .collect();
    files.extend([
        OVERALL_CHART_FILE,
        SCOREBOARD_CHART_FILE,
        LINE_CHART_FILE,
        MIN_MAX_LINES_FILE,
        DEVIATION_CHART_FILE,
    ]);
    files
}
