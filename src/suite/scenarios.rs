use crate::args::PositiveUsize;
use crate::domain::{ScenarioSpec, Target};
use crate::error::AppResult;

/// `(name, endpoint, requests, concurrency)` of the reference workload.
const REFERENCE_SCENARIOS: [(&str, &str, usize, usize); 10] = [
    ("Teste 1: Arquivo Pequeno - 50 requisições sequenciais", "/small.txt", 50, 1),
    ("Teste 2: Arquivo Médio - 50 requisições sequenciais", "/medium.txt", 50, 1),
    ("Teste 3: Arquivo Grande - 30 requisições sequenciais", "/large.txt", 30, 1),
    (
        "Teste 4: Arquivo Pequeno - 100 requisições concorrentes (10 threads)",
        "/small.txt",
        100,
        10,
    ),
    (
        "Teste 5: Arquivo Médio - 100 requisições concorrentes (10 threads)",
        "/medium.txt",
        100,
        10,
    ),
    (
        "Teste 6: Arquivo Grande - 50 requisições concorrentes (10 threads)",
        "/large.txt",
        50,
        10,
    ),
    (
        "Teste 7: Arquivo Extra Grande (10MB) - 20 requisições sequenciais",
        "/xlarge.txt",
        20,
        1,
    ),
    (
        "Teste 8: Arquivo Extra Grande (10MB) - 30 requisições concorrentes (5 threads)",
        "/xlarge.txt",
        30,
        5,
    ),
    ("Teste 9: Arquivo XXL (50MB) - 10 requisições sequenciais", "/xxlarge.txt", 10, 1),
    (
        "Teste 10: API Status - 200 requisições concorrentes (20 threads)",
        "/api/status",
        200,
        20,
    ),
];

const REFERENCE_TARGETS: [(&str, &str, u16); 2] =
    [("nginx", "127.0.0.1", 8080), ("apache", "127.0.0.1", 8081)];

/// The ten scenarios run when no config file names its own.
///
/// # Errors
///
/// Returns an error only if a built-in entry fails validation.
pub fn default_scenarios() -> AppResult<Vec<ScenarioSpec>> {
    REFERENCE_SCENARIOS
        .iter()
        .map(|&(name, endpoint, requests, concurrency)| -> AppResult<ScenarioSpec> {
            Ok(ScenarioSpec::new(
                name,
                endpoint,
                PositiveUsize::try_from(requests)?,
                PositiveUsize::try_from(concurrency)?,
            )?)
        })
        .collect()
}

/// nginx on 8080 then apache on 8081, both on loopback.
///
/// # Errors
///
/// Returns an error only if a built-in entry fails validation.
pub fn default_targets() -> AppResult<Vec<Target>> {
    REFERENCE_TARGETS
        .iter()
        .map(|&(name, host, port)| -> AppResult<Target> { Ok(Target::new(name, host, port)?) })
        .collect()
}
