use url::Url;

use crate::error::{AppError, AppResult, HttpError, ValidationError};

/// One HTTP server under measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl Target {
    /// Builds a validated target.
    ///
    /// # Errors
    ///
    /// Returns an error when the name or host is empty or the port is 0.
    pub fn new(name: &str, host: &str, port: u16) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::TargetNameEmpty);
        }
        let host = host.trim();
        if host.is_empty() {
            return Err(ValidationError::TargetHostEmpty);
        }
        if port == 0 {
            return Err(ValidationError::TargetPortZero);
        }
        Ok(Self {
            name: name.to_owned(),
            host: host.to_owned(),
            port,
        })
    }

    /// Name as it appears in report block headers.
    #[must_use]
    pub fn report_name(&self) -> String {
        self.name.to_uppercase()
    }

    /// `http://host:port/`, with IPv6 literals bracketed.
    ///
    /// # Errors
    ///
    /// Returns an error when host/port do not form a valid URL.
    pub fn base_url(&self) -> AppResult<Url> {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        Url::parse(&format!("http://{}:{}/", host, self.port)).map_err(|err| {
            AppError::http(HttpError::InvalidTargetUrl {
                target: self.name.clone(),
                source: err,
            })
        })
    }
}
