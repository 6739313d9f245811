use clap::{Args, Parser, Subcommand};

use super::defaults::{DEFAULT_CHARTS_DIR, DEFAULT_REPORT_PATH};
use super::parsers::parse_bool_env;

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compare the first two targets of an existing report
    Analyze(AnalyzeArgs),
    /// Draw comparison charts (PNG) from an existing report
    Charts(ChartsArgs),
}

#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    /// Report file produced by a suite run
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub report: String,

    /// Also write the analysis to this file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ChartsArgs {
    /// Report file produced by a suite run
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub report: String,

    /// Directory that receives the PNG charts
    #[arg(long = "out-dir", default_value = DEFAULT_CHARTS_DIR)]
    pub out_dir: String,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Comparative HTTP load tester - runs a fixed scenario suite against every configured target and writes a parseable text report."
)]
pub struct SuiteArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (TOML/JSON). Defaults to ./loadcmp.toml or ./loadcmp.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Report path (overrides report_path from the config file)
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by LOADCMP_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = parse_bool_env,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub no_color: bool,
}
