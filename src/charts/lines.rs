use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::app::display_name;
use crate::error::AppResult;

use super::bars::{axis_top, label_at, scaled_top};
use super::palette;
use super::series::ChartSeries;

const CHART_SIZE: (u32, u32) = (1600, 800);
const STACKED_SIZE: (u32, u32) = (1600, 1200);
const STACKED_SPLIT: i32 = 600;
const BAND_OPACITY: f64 = 0.2;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Caption and y axis of one line panel.
pub(super) struct Panel<'a> {
    pub(super) title: &'a str,
    pub(super) y_desc: &'a str,
}

/// One line per target over the scenarios of the report.
pub(super) fn plot_lines(
    labels: &[String],
    series: &[ChartSeries],
    panel: &Panel<'_>,
    path: &Path,
) -> AppResult<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    draw_panel(&root, labels, series, &[], panel)?;
    root.present()?;
    Ok(())
}

/// Minimum latencies above maximum latencies, one line per target in each.
pub(super) fn plot_min_max_lines(
    labels: &[String],
    min: &[ChartSeries],
    max: &[ChartSeries],
    path: &Path,
) -> AppResult<()> {
    let root = BitMapBackend::new(path, STACKED_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (upper, lower) = root.split_vertically(STACKED_SPLIT);
    draw_panel(
        &upper,
        labels,
        min,
        &[],
        &Panel {
            title: "Latências Mínimas por Cenário",
            y_desc: "Latência Mínima (ms)",
        },
    )?;
    draw_panel(
        &lower,
        labels,
        max,
        &[],
        &Panel {
            title: "Latências Máximas por Cenário",
            y_desc: "Latência Máxima (ms)",
        },
    )?;
    root.present()?;
    Ok(())
}

/// Mean latency lines with a shaded `mean ± stdev` band per target.
///
/// `bands` is aligned with `mean` by target index.
pub(super) fn plot_deviation_band(
    labels: &[String],
    mean: &[ChartSeries],
    bands: &[Vec<(f64, f64)>],
    path: &Path,
) -> AppResult<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    draw_panel(
        &root,
        labels,
        mean,
        bands,
        &Panel {
            title: "Latência Média com Área de Variação (±σ)",
            y_desc: "Latência (ms)",
        },
    )?;
    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &Area<'_>,
    labels: &[String],
    series: &[ChartSeries],
    bands: &[Vec<(f64, f64)>],
    panel: &Panel<'_>,
) -> AppResult<()> {
    let x_max = labels.len().saturating_sub(1).max(1) as f64;
    let band_top = bands
        .iter()
        .flat_map(|band| band.iter().map(|(_, upper)| *upper))
        .fold(0.0_f64, f64::max);
    let y_top = axis_top(series).max(scaled_top(band_top));

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.25_f64..(x_max + 0.25), 0.0_f64..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Cenários de Teste")
        .y_desc(panel.y_desc)
        .x_labels(labels.len().saturating_mul(2).max(2))
        .x_label_formatter(&|x| label_at(labels, *x))
        .draw()?;

    for (index, entry) in series.iter().enumerate() {
        let color = palette(index);

        if let Some(band) = bands.get(index).filter(|band| !band.is_empty()) {
            let outline: Vec<(f64, f64)> = band
                .iter()
                .enumerate()
                .map(|(scenario, (_, upper))| (scenario as f64, *upper))
                .chain(
                    band.iter()
                        .enumerate()
                        .rev()
                        .map(|(scenario, (lower, _))| (scenario as f64, *lower)),
                )
                .collect();
            let shade = color.mix(BAND_OPACITY);
            chart
                .draw_series(std::iter::once(Polygon::new(outline, shade.filled())))?
                .label(format!("{} ±σ", display_name(&entry.target)))
                .legend(move |(x, y)| {
                    Rectangle::new(
                        [
                            (x, y.saturating_sub(5)),
                            (x.saturating_add(10), y.saturating_add(5)),
                        ],
                        shade.filled(),
                    )
                });
        }

        let points: Vec<(f64, f64)> = entry
            .values
            .iter()
            .enumerate()
            .map(|(scenario, value)| (scenario as f64, *value))
            .collect();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(display_name(&entry.target))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x.saturating_add(20), y)], color.stroke_width(2))
            });
        chart.draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;
    Ok(())
}
