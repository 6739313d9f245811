use std::time::Duration;

use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue},
    redirect,
};

use crate::error::{AppError, AppResult, HttpError};

/// Builds the client used for every request against one target.
///
/// Idle connections are never pooled, so each request opens its own
/// connection.
///
/// # Errors
///
/// Returns an error when a header is invalid or the client cannot be built.
pub(super) fn build_client(
    target: &str,
    headers: &[(String, String)],
    user_agent: &str,
    timeout: Duration,
) -> AppResult<Client> {
    let default_headers = build_header_map(headers)?;
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .default_headers(default_headers)
        .pool_max_idle_per_host(0)
        .pool_idle_timeout(Some(Duration::from_secs(0)))
        .http1_only()
        .redirect(redirect::Policy::none())
        .build()
        .map_err(|err| {
            AppError::http(HttpError::BuildClientFailed {
                target: target.to_owned(),
                source: err,
            })
        })
}

/// Converts `(name, value)` pairs into a header map. Repeated names are kept.
///
/// # Errors
///
/// Returns an error when a header name or value is not valid HTTP.
pub(crate) fn build_header_map(headers: &[(String, String)]) -> AppResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            AppError::http(HttpError::InvalidHeaderName {
                header: key.clone(),
                source: err,
            })
        })?;
        let value = HeaderValue::from_str(value).map_err(|err| {
            AppError::http(HttpError::InvalidHeaderValue {
                header: key.clone(),
                source: err,
            })
        })?;
        map.append(name, value);
    }
    Ok(map)
}
