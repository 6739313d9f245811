use std::fmt::Write as _;

use crate::error::{AppError, AppResult, ReportError};

pub(super) const RULE: &str =
    "================================================================================";

pub(super) const LABEL_SCENARIO: &str = "TESTE";
pub(super) const LABEL_TIMESTAMP: &str = "Data/Hora";
pub(super) const BLOCK_PREFIX: &str = "--- Servidor: ";
pub(super) const BLOCK_SUFFIX: &str = " ---";

pub(super) const LABEL_TOTAL: &str = "Total de requisições";
pub(super) const LABEL_SUCCESSFUL: &str = "Requisições bem-sucedidas";
pub(super) const LABEL_FAILED: &str = "Requisições falhadas";
pub(super) const LABEL_RATE: &str = "Taxa de sucesso";
pub(super) const LABEL_MEAN: &str = "Latência média";
pub(super) const LABEL_MEDIAN: &str = "Latência mediana";
pub(super) const LABEL_STDEV: &str = "Desvio padrão";
pub(super) const LABEL_MIN: &str = "Latência mínima";
pub(super) const LABEL_MAX: &str = "Latência máxima";
pub(super) const LABEL_BYTES: &str = "Tamanho total de resposta";

pub(super) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn write_line(output: &mut String, line: &str) -> AppResult<()> {
    writeln!(output, "{}", line).map_err(|err| AppError::report(ReportError::WriteLine { source: err }))
}

pub(crate) fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
