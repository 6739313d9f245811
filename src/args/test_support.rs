use clap::Parser;

use crate::error::{AppError, AppResult};

use super::SuiteArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<SuiteArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    SuiteArgs::try_parse_from(args).map_err(AppError::from)
}
