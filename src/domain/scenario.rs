use crate::args::PositiveUsize;
use crate::error::ValidationError;

/// How a scenario issues its requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// One request at a time, in order.
    Sequential,
    /// Bounded pool with at most this many requests in flight.
    Concurrent(PositiveUsize),
}

/// A named test case: endpoint, request count and concurrency level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSpec {
    pub name: String,
    pub endpoint: String,
    pub request_count: PositiveUsize,
    pub concurrency: PositiveUsize,
}

impl ScenarioSpec {
    /// Builds a validated scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is empty or the endpoint is not an
    /// absolute path. A leading `//` would name another host and is rejected.
    pub fn new(
        name: &str,
        endpoint: &str,
        request_count: PositiveUsize,
        concurrency: PositiveUsize,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::ScenarioNameEmpty);
        }
        if !endpoint.starts_with('/') || endpoint.starts_with("//") {
            return Err(ValidationError::EndpointNotAbsolute {
                endpoint: endpoint.to_owned(),
            });
        }
        Ok(Self {
            name: name.to_owned(),
            endpoint: endpoint.to_owned(),
            request_count,
            concurrency,
        })
    }

    #[must_use]
    pub fn mode(&self) -> RunMode {
        if self.concurrency.get() > 1 {
            RunMode::Concurrent(self.concurrency)
        } else {
            RunMode::Sequential
        }
    }
}
