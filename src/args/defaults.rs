use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("loadcmp/", env!("CARGO_PKG_VERSION"));

/// Default config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["loadcmp.toml", "loadcmp.json"];

pub(crate) const DEFAULT_REPORT_PATH: &str = "resultados/resultados_testes.txt";
pub(crate) const DEFAULT_CHARTS_DIR: &str = "resultados/graficos";

/// Sent as `X-Custom-ID` when the config carries no identity.
pub(crate) const DEFAULT_CUSTOM_ID: &str = "loadcmp";

pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
