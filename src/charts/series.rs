use crate::metrics::TargetSummary;
use crate::report::SuiteReport;

const MAX_LABEL_CHARS: usize = 40;
const TRUNCATED_LABEL_CHARS: usize = 37;

/// Per-scenario metric drawn as one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMetric {
    MeanLatency,
    MedianLatency,
    StdevLatency,
    MinLatency,
    MaxLatency,
    SuccessRate,
}

impl ChartMetric {
    pub const BARS: [Self; 6] = [
        Self::MeanLatency,
        Self::MedianLatency,
        Self::StdevLatency,
        Self::MinLatency,
        Self::MaxLatency,
        Self::SuccessRate,
    ];

    /// Metrics averaged over all scenarios in the overall comparison.
    pub const OVERALL: [Self; 3] = [Self::MeanLatency, Self::MedianLatency, Self::StdevLatency];

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::MeanLatency => "latencia_media.png",
            Self::MedianLatency => "latencia_mediana.png",
            Self::StdevLatency => "desvio_padrao.png",
            Self::MinLatency => "latencia_minima.png",
            Self::MaxLatency => "latencia_maxima.png",
            Self::SuccessRate => "taxa_sucesso.png",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::MeanLatency => "Latência Média por Cenário",
            Self::MedianLatency => "Latência Mediana por Cenário",
            Self::StdevLatency => "Consistência (Desvio Padrão) - menor é melhor",
            Self::MinLatency => "Latência Mínima por Cenário",
            Self::MaxLatency => "Latência Máxima por Cenário",
            Self::SuccessRate => "Taxa de Sucesso por Cenário",
        }
    }

    #[must_use]
    pub const fn axis_label(self) -> &'static str {
        match self {
            Self::MeanLatency => "Latência Média (ms)",
            Self::MedianLatency => "Latência Mediana (ms)",
            Self::StdevLatency => "Desvio Padrão (ms)",
            Self::MinLatency => "Latência Mínima (ms)",
            Self::MaxLatency => "Latência Máxima (ms)",
            Self::SuccessRate => "Taxa de Sucesso (%)",
        }
    }

    /// Tick text when the metric itself is the category.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::MeanLatency => "Latência Média",
            Self::MedianLatency => "Latência Mediana",
            Self::StdevLatency => "Desvio Padrão",
            Self::MinLatency => "Latência Mínima",
            Self::MaxLatency => "Latência Máxima",
            Self::SuccessRate => "Taxa de Sucesso",
        }
    }

    /// Latency metrics read 0 when the target had no successes.
    #[must_use]
    pub fn value(self, summary: &TargetSummary) -> f64 {
        match self {
            Self::MeanLatency => summary.latency.as_ref().map_or(0.0, |latency| latency.mean_ms),
            Self::MedianLatency => summary.latency.as_ref().map_or(0.0, |latency| latency.median_ms),
            Self::StdevLatency => summary.latency.as_ref().map_or(0.0, |latency| latency.stdev_ms),
            Self::MinLatency => summary.latency.as_ref().map_or(0.0, |latency| latency.min_ms),
            Self::MaxLatency => summary.latency.as_ref().map_or(0.0, |latency| latency.max_ms),
            Self::SuccessRate => summary.success_rate_pct,
        }
    }
}

/// One target's values, one per scenario in report order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub target: String,
    pub values: Vec<f64>,
}

/// One series per target; scenarios missing a target's block read 0.
#[must_use]
pub fn metric_series(report: &SuiteReport, metric: ChartMetric) -> Vec<ChartSeries> {
    report
        .target_names()
        .into_iter()
        .map(|target| {
            let values = report
                .scenarios
                .iter()
                .map(|scenario| {
                    scenario
                        .target(&target)
                        .map_or(0.0, |block| metric.value(&block.summary))
                })
                .collect();
            ChartSeries { target, values }
        })
        .collect()
}

/// One series per target holding, for each [`ChartMetric::OVERALL`] metric,
/// the average over every scenario (gaps count as 0).
#[must_use]
pub fn overall_series(report: &SuiteReport) -> Vec<ChartSeries> {
    let per_metric: Vec<Vec<ChartSeries>> = ChartMetric::OVERALL
        .iter()
        .map(|metric| metric_series(report, *metric))
        .collect();
    report
        .target_names()
        .into_iter()
        .enumerate()
        .map(|(index, target)| {
            let values = per_metric
                .iter()
                .map(|series| series.get(index).map_or(0.0, |entry| average(&entry.values)))
                .collect();
            ChartSeries { target, values }
        })
        .collect()
}

/// `(mean - stdev, mean + stdev)` per scenario, with the lower edge kept at 0 or above.
#[must_use]
pub fn deviation_band(mean: &ChartSeries, stdev: &ChartSeries) -> Vec<(f64, f64)> {
    mean.values
        .iter()
        .zip(stdev.values.iter())
        .map(|(mean, stdev)| ((mean - stdev).max(0.0), mean + stdev))
        .collect()
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Compacts a scenario name for an axis tick.
#[must_use]
pub fn short_label(name: &str) -> String {
    let compact = name
        .replace("Teste ", "T")
        .replace("requisições", "req")
        .replace("sequenciais", "seq")
        .replace("concorrentes", "conc")
        .replace("Arquivo ", "");
    if compact.chars().count() <= MAX_LABEL_CHARS {
        return compact;
    }
    let mut truncated: String = compact.chars().take(TRUNCATED_LABEL_CHARS).collect();
    truncated.push_str("...");
    truncated
}
