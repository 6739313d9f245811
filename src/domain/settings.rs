use std::path::PathBuf;
use std::time::Duration;

use super::{ScenarioSpec, Target};

/// Operator metadata. Opaque to the engine; it only travels in the
/// `X-Custom-ID` header and the report identification lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: Option<String>,
    pub registration: Option<String>,
    pub custom_id: String,
}

impl Identity {
    /// Lines written under `Data/Hora:` in every scenario header.
    #[must_use]
    pub fn identification_lines(&self) -> Vec<(String, String)> {
        let mut lines = Vec::with_capacity(3);
        if let Some(name) = self.name.as_ref() {
            lines.push(("Aluno".to_owned(), name.clone()));
        }
        if let Some(registration) = self.registration.as_ref() {
            lines.push(("Matrícula".to_owned(), registration.clone()));
        }
        lines.push(("X-Custom-ID".to_owned(), self.custom_id.clone()));
        lines
    }
}

/// Fully resolved input for one suite run.
#[derive(Debug, Clone)]
pub struct SuiteSettings {
    pub targets: Vec<Target>,
    pub scenarios: Vec<ScenarioSpec>,
    pub identity: Identity,
    pub report_path: PathBuf,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub extra_headers: Vec<(String, String)>,
}

impl SuiteSettings {
    /// Headers attached to every request, `X-Custom-ID` first.
    #[must_use]
    pub fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::with_capacity(self.extra_headers.len().saturating_add(1));
        headers.push(("X-Custom-ID".to_owned(), self.identity.custom_id.clone()));
        headers.extend(self.extra_headers.iter().cloned());
        headers
    }
}
