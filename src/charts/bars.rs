use std::path::Path;

use plotters::prelude::*;

use crate::app::analysis::Scoreboard;
use crate::app::display_name;
use crate::error::AppResult;

use super::palette;
use super::series::ChartSeries;

const CHART_SIZE: (u32, u32) = (1600, 800);
/// Share of each category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;
const HEADROOM: f64 = 1.1;
const TIE_COLOR: RGBColor = RGBColor(255, 165, 0);

/// Caption and axis titles of a bar chart.
pub(super) struct BarLayout<'a> {
    pub(super) title: &'a str,
    pub(super) x_desc: &'a str,
    pub(super) y_desc: &'a str,
}

/// Draws one grouped bar chart: a group per category, a bar per target.
pub(super) fn plot_grouped_bars(
    labels: &[String],
    series: &[ChartSeries],
    layout: &BarLayout<'_>,
    path: &Path,
) -> AppResult<()> {
    let groups = labels.len().max(1) as f64;
    let y_top = axis_top(series);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(layout.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5_f64..(groups - 0.5), 0.0_f64..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(layout.x_desc)
        .y_desc(layout.y_desc)
        .x_labels(labels.len().saturating_mul(2).max(2))
        .x_label_formatter(&|x| label_at(labels, *x))
        .draw()?;

    let bar_width = GROUP_WIDTH / series.len().max(1) as f64;
    for (index, entry) in series.iter().enumerate() {
        let color = palette(index);
        let offset = bar_width.mul_add(index as f64, -GROUP_WIDTH / 2.0);
        chart
            .draw_series(entry.values.iter().enumerate().map(|(group, value)| {
                let left = group as f64 + offset;
                Rectangle::new([(left, 0.0), (left + bar_width, *value)], color.filled())
            }))?
            .label(display_name(&entry.target))
            .legend(move |(x, y)| {
                Rectangle::new(
                    [
                        (x, y.saturating_sub(5)),
                        (x.saturating_add(10), y.saturating_add(5)),
                    ],
                    color.filled(),
                )
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Win counts of the two compared targets next to the number of ties.
pub(super) fn plot_scoreboard(
    board: &Scoreboard,
    first: &str,
    second: &str,
    scenarios: usize,
    path: &Path,
) -> AppResult<()> {
    let bars = [
        (display_name(first), board.first_wins, palette(0)),
        (display_name(second), board.second_wins, palette(1)),
        ("Empates".to_owned(), board.ties, TIE_COLOR),
    ];
    let labels: Vec<String> = bars.iter().map(|(label, _, _)| label.clone()).collect();
    let most = bars.iter().map(|(_, wins, _)| *wins).max().unwrap_or(0);
    let y_top = most.saturating_add(1) as f64;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let title = format!(
        "Placar de Vitórias por Latência Média - Total de {} Testes",
        scenarios
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5_f64..2.5_f64, 0.0_f64..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Servidor")
        .y_desc("Número de Vitórias")
        .x_labels(6)
        .x_label_formatter(&|x| label_at(&labels, *x))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(slot, (_, wins, color))| {
        let center = slot as f64;
        Rectangle::new(
            [(center - 0.3, 0.0), (center + 0.3, *wins as f64)],
            color.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

pub(super) fn axis_top(series: &[ChartSeries]) -> f64 {
    let max = series
        .iter()
        .flat_map(|entry| entry.values.iter().copied())
        .fold(0.0_f64, f64::max);
    scaled_top(max)
}

pub(super) fn scaled_top(max: f64) -> f64 {
    if max > 0.0 { max * HEADROOM } else { 1.0 }
}

/// Tick text for category slots; ticks between slots stay blank.
pub(super) fn label_at(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}
