use std::path::Path;

use tracing::warn;

use crate::error::{AppError, AppResult, ReportError};
use crate::metrics::{LatencyStats, TargetSummary};

use super::format::{
    BLOCK_PREFIX, BLOCK_SUFFIX, LABEL_BYTES, LABEL_FAILED, LABEL_MAX, LABEL_MEAN, LABEL_MEDIAN,
    LABEL_MIN, LABEL_RATE, LABEL_SCENARIO, LABEL_STDEV, LABEL_SUCCESSFUL, LABEL_TIMESTAMP,
    LABEL_TOTAL, RULE,
};
use super::types::{ScenarioReport, SuiteReport, TargetReport};

/// Reads and parses a report file.
///
/// # Errors
///
/// Returns an error when the file cannot be read, does not follow the report
/// grammar, or holds no scenario.
pub async fn read_report(path: &Path) -> AppResult<SuiteReport> {
    let content = tokio::fs::read_to_string(path).await.map_err(|err| {
        AppError::report(ReportError::Read {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let report = parse_report(&content)?;
    if report.is_empty() {
        return Err(AppError::report(ReportError::Empty {
            path: path.to_path_buf(),
        }));
    }
    Ok(report)
}

/// Parses report text produced by the writer.
///
/// A trailing scenario without its closing rule is kept when every target
/// block in it is complete, and dropped otherwise. A malformed line inside
/// that trailing scenario (a write cut short) drops only the scenario.
///
/// # Errors
///
/// Returns an error on lines outside the grammar, unparsable values, missing
/// counters, or a partial set of latency lines in any scenario that is
/// closed by a rule.
pub fn parse_report(content: &str) -> AppResult<SuiteReport> {
    let lines: Vec<&str> = content.lines().map(str::trim_end).collect();
    let mut parser = Parser::default();
    for (index, line) in lines.iter().enumerate() {
        if let Err(err) = parser.feed(index.saturating_add(1), line) {
            let rest = lines.get(index.saturating_add(1)..).unwrap_or_default();
            if *line == RULE || parser.closes_later(rest) {
                return Err(err);
            }
            return Ok(parser.abandon_tail(&err));
        }
    }
    parser.finish()
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Outside,
    Header,
    Body,
}

#[derive(Debug, Default)]
struct Parser {
    phase: Phase,
    scenarios: Vec<ScenarioReport>,
    draft: Option<ScenarioDraft>,
}

#[derive(Debug)]
struct ScenarioDraft {
    name: String,
    timestamp: String,
    identification: Vec<(String, String)>,
    targets: Vec<TargetReport>,
    block: Option<BlockDraft>,
}

#[derive(Debug, Default)]
struct BlockDraft {
    name: String,
    total: Option<u64>,
    successful: Option<u64>,
    failed: Option<u64>,
    rate: Option<f64>,
    mean: Option<f64>,
    median: Option<f64>,
    stdev: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
    bytes: Option<u64>,
}

impl Parser {
    fn feed(&mut self, line_no: usize, line: &str) -> AppResult<()> {
        match self.phase {
            Phase::Outside => self.feed_outside(line_no, line),
            Phase::Header => self.feed_header(line_no, line),
            Phase::Body => self.feed_body(line_no, line),
        }
    }

    fn feed_outside(&mut self, line_no: usize, line: &str) -> AppResult<()> {
        if line.is_empty() || line == RULE {
            return Ok(());
        }
        match split_label(line) {
            Some((LABEL_SCENARIO, name)) => {
                self.draft = Some(ScenarioDraft {
                    name: name.to_owned(),
                    timestamp: String::new(),
                    identification: Vec::new(),
                    targets: Vec::new(),
                    block: None,
                });
                self.phase = Phase::Header;
                Ok(())
            }
            Some(_) | None => Err(unexpected(line_no, line)),
        }
    }

    fn feed_header(&mut self, line_no: usize, line: &str) -> AppResult<()> {
        if line == RULE {
            self.phase = Phase::Body;
            return Ok(());
        }
        if line.is_empty() {
            return Ok(());
        }
        let (Some(draft), Some((label, value))) = (self.draft.as_mut(), split_label(line)) else {
            return Err(unexpected(line_no, line));
        };
        if label == LABEL_TIMESTAMP {
            draft.timestamp = value.to_owned();
        } else {
            draft
                .identification
                .push((label.to_owned(), value.to_owned()));
        }
        Ok(())
    }

    fn feed_body(&mut self, line_no: usize, line: &str) -> AppResult<()> {
        if line.is_empty() {
            return Ok(());
        }
        let Some(draft) = self.draft.as_mut() else {
            return Err(unexpected(line_no, line));
        };
        if line == RULE {
            let scenario = draft.close()?;
            self.scenarios.push(scenario);
            self.draft = None;
            self.phase = Phase::Outside;
            return Ok(());
        }
        if let Some(name) = line
            .strip_prefix(BLOCK_PREFIX)
            .and_then(|rest| rest.strip_suffix(BLOCK_SUFFIX))
        {
            draft.close_block()?;
            draft.block = Some(BlockDraft {
                name: name.trim().to_owned(),
                ..BlockDraft::default()
            });
            return Ok(());
        }
        let Some((label, value)) = split_label(line) else {
            return Err(unexpected(line_no, line));
        };
        let Some(block) = draft.block.as_mut() else {
            return Err(AppError::report(ReportError::MetricOutsideBlock {
                line: line_no,
                label: label.to_owned(),
            }));
        };
        block.record(line_no, line, label, value)
    }

    /// Whether the remaining lines would close the scenario being parsed.
    fn closes_later(&self, rest: &[&str]) -> bool {
        let rules = rest.iter().filter(|line| **line == RULE).count();
        match self.phase {
            Phase::Outside => rest.iter().any(|line| !line.is_empty()),
            Phase::Header => rules >= 2,
            Phase::Body => rules >= 1,
        }
    }

    fn abandon_tail(self, err: &AppError) -> SuiteReport {
        match self.draft.as_ref() {
            Some(draft) => warn!("Dropping truncated trailing scenario '{}': {}", draft.name, err),
            None => warn!("Ignoring truncated trailing line: {}", err),
        }
        SuiteReport {
            scenarios: self.scenarios,
        }
    }

    fn finish(mut self) -> AppResult<SuiteReport> {
        if let Some(mut draft) = self.draft.take() {
            let name = draft.name.clone();
            match draft.close() {
                Ok(scenario) if !scenario.targets.is_empty() => self.scenarios.push(scenario),
                Ok(_) => warn!("Dropping scenario '{}' without target blocks", name),
                Err(err) => warn!("Dropping incomplete trailing scenario '{}': {}", name, err),
            }
        }
        Ok(SuiteReport {
            scenarios: self.scenarios,
        })
    }
}

impl ScenarioDraft {
    fn close_block(&mut self) -> AppResult<()> {
        if let Some(block) = self.block.take() {
            let target = block.into_target(&self.name)?;
            self.targets.push(target);
        }
        Ok(())
    }

    fn close(&mut self) -> AppResult<ScenarioReport> {
        self.close_block()?;
        Ok(ScenarioReport {
            name: std::mem::take(&mut self.name),
            timestamp: std::mem::take(&mut self.timestamp),
            identification: std::mem::take(&mut self.identification),
            targets: std::mem::take(&mut self.targets),
        })
    }
}

impl BlockDraft {
    fn record(&mut self, line_no: usize, line: &str, label: &str, value: &str) -> AppResult<()> {
        match label {
            LABEL_TOTAL => self.total = Some(parse_value(line_no, label, value, "")?),
            LABEL_SUCCESSFUL => self.successful = Some(parse_value(line_no, label, value, "")?),
            LABEL_FAILED => self.failed = Some(parse_value(line_no, label, value, "")?),
            LABEL_RATE => self.rate = Some(parse_value(line_no, label, value, "%")?),
            LABEL_MEAN => self.mean = Some(parse_value(line_no, label, value, " ms")?),
            LABEL_MEDIAN => self.median = Some(parse_value(line_no, label, value, " ms")?),
            LABEL_STDEV => self.stdev = Some(parse_value(line_no, label, value, " ms")?),
            LABEL_MIN => self.min = Some(parse_value(line_no, label, value, " ms")?),
            LABEL_MAX => self.max = Some(parse_value(line_no, label, value, " ms")?),
            LABEL_BYTES => self.bytes = Some(parse_value(line_no, label, value, " bytes")?),
            _ => return Err(unexpected(line_no, line)),
        }
        Ok(())
    }

    fn into_target(self, scenario: &str) -> AppResult<TargetReport> {
        let missing = |label: &'static str| {
            AppError::report(ReportError::MissingField {
                scenario: scenario.to_owned(),
                target: self.name.clone(),
                label,
            })
        };
        let total_requests = self.total.ok_or_else(|| missing(LABEL_TOTAL))?;
        let successful = self.successful.ok_or_else(|| missing(LABEL_SUCCESSFUL))?;
        let failed = self.failed.ok_or_else(|| missing(LABEL_FAILED))?;
        let success_rate_pct = self.rate.ok_or_else(|| missing(LABEL_RATE))?;

        let latency = match (self.mean, self.median, self.stdev, self.min, self.max) {
            (Some(mean_ms), Some(median_ms), Some(stdev_ms), Some(min_ms), Some(max_ms)) => {
                Some(LatencyStats {
                    mean_ms,
                    median_ms,
                    stdev_ms,
                    min_ms,
                    max_ms,
                })
            }
            (None, None, None, None, None) => None,
            _ => {
                return Err(AppError::report(ReportError::IncompleteLatency {
                    scenario: scenario.to_owned(),
                    target: self.name,
                }));
            }
        };

        Ok(TargetReport {
            summary: TargetSummary {
                total_requests,
                successful,
                failed,
                success_rate_pct,
                latency,
                total_response_bytes: self.bytes.unwrap_or(0),
            },
            name: self.name,
        })
    }
}

fn split_label(line: &str) -> Option<(&str, &str)> {
    line.split_once(": ")
        .map(|(label, value)| (label.trim(), value.trim()))
}

fn parse_value<T>(line_no: usize, label: &str, value: &str, unit: &str) -> AppResult<T>
where
    T: std::str::FromStr,
{
    value
        .strip_suffix(unit)
        .and_then(|number| number.trim().parse::<T>().ok())
        .ok_or_else(|| {
            AppError::report(ReportError::InvalidValue {
                line: line_no,
                label: label.to_owned(),
                value: value.to_owned(),
            })
        })
}

fn unexpected(line_no: usize, line: &str) -> AppError {
    AppError::report(ReportError::UnexpectedLine {
        line: line_no,
        content: line.to_owned(),
    })
}
