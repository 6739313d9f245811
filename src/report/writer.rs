use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{AppError, AppResult, ReportError};
use crate::metrics::TargetSummary;

use super::format::{
    BLOCK_PREFIX, BLOCK_SUFFIX, LABEL_BYTES, LABEL_FAILED, LABEL_MAX, LABEL_MEAN, LABEL_MEDIAN,
    LABEL_MIN, LABEL_RATE, LABEL_SCENARIO, LABEL_STDEV, LABEL_SUCCESSFUL, LABEL_TIMESTAMP,
    LABEL_TOTAL, RULE, write_line,
};
use super::types::ScenarioReport;

/// Renders one scenario chunk, closing rule and trailing newline included.
///
/// Latency and byte lines are left out for targets without successes.
///
/// # Errors
///
/// Returns an error when formatting a line fails.
pub fn render_scenario(report: &ScenarioReport) -> AppResult<String> {
    let mut output = String::new();
    write_line(&mut output, RULE)?;
    write_line(&mut output, &format!("{}: {}", LABEL_SCENARIO, report.name))?;
    write_line(&mut output, &format!("{}: {}", LABEL_TIMESTAMP, report.timestamp))?;
    for (label, value) in &report.identification {
        write_line(&mut output, &format!("{}: {}", label, value))?;
    }
    write_line(&mut output, RULE)?;
    write_line(&mut output, "")?;

    for target in &report.targets {
        write_line(
            &mut output,
            &format!("{}{}{}", BLOCK_PREFIX, target.name, BLOCK_SUFFIX),
        )?;
        write_summary(&mut output, &target.summary)?;
        write_line(&mut output, "")?;
    }

    write_line(&mut output, RULE)?;
    Ok(output)
}

fn write_summary(output: &mut String, summary: &TargetSummary) -> AppResult<()> {
    write_line(output, &format!("{}: {}", LABEL_TOTAL, summary.total_requests))?;
    write_line(output, &format!("{}: {}", LABEL_SUCCESSFUL, summary.successful))?;
    write_line(output, &format!("{}: {}", LABEL_FAILED, summary.failed))?;
    write_line(
        output,
        &format!("{}: {:.2}%", LABEL_RATE, summary.success_rate_pct),
    )?;

    let Some(latency) = summary.latency else {
        return Ok(());
    };
    for (label, value) in [
        (LABEL_MEAN, latency.mean_ms),
        (LABEL_MEDIAN, latency.median_ms),
        (LABEL_STDEV, latency.stdev_ms),
        (LABEL_MIN, latency.min_ms),
        (LABEL_MAX, latency.max_ms),
    ] {
        write_line(output, &format!("{}: {:.2} ms", label, value))?;
    }
    write_line(
        output,
        &format!("{}: {} bytes", LABEL_BYTES, summary.total_response_bytes),
    )
}

/// Append-only handle on the report file of one suite run.
#[derive(Debug)]
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    /// Creates (or truncates) the report file and its parent directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or file cannot be created.
    pub async fn create(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|err| {
                AppError::report(ReportError::Create {
                    path: parent.to_path_buf(),
                    source: err,
                })
            })?;
        }
        fs::write(path, b"").await.map_err(|err| {
            AppError::report(ReportError::Create {
                path: path.to_path_buf(),
                source: err,
            })
        })?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renders and appends one scenario chunk, flushing before returning.
    ///
    /// # Errors
    ///
    /// Returns an error when rendering or writing fails.
    pub async fn append_scenario(&self, report: &ScenarioReport) -> AppResult<()> {
        let chunk = render_scenario(report)?;
        let append_error = |err: std::io::Error| {
            AppError::report(ReportError::Append {
                path: self.path.clone(),
                source: err,
            })
        };
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(append_error)?;
        file.write_all(chunk.as_bytes()).await.map_err(append_error)?;
        file.flush().await.map_err(append_error)?;
        debug!(
            "Appended scenario '{}' to {}",
            report.name,
            self.path.display()
        );
        Ok(())
    }
}
