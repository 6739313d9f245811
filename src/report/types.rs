use crate::metrics::TargetSummary;

/// One `--- Servidor: X ---` block.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetReport {
    /// Name as written in the block header (uppercase).
    pub name: String,
    pub summary: TargetSummary,
}

/// One `TESTE:` chunk with its target blocks in execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub name: String,
    pub timestamp: String,
    /// `Label: value` lines between `Data/Hora:` and the closing rule.
    pub identification: Vec<(String, String)>,
    pub targets: Vec<TargetReport>,
}

impl ScenarioReport {
    #[must_use]
    pub fn target(&self, name: &str) -> Option<&TargetReport> {
        self.targets.iter().find(|target| target.name == name)
    }
}

/// Ordered scenarios of one suite run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuiteReport {
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    /// Target names in first-seen order across all scenarios.
    #[must_use]
    pub fn target_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for target in self.scenarios.iter().flat_map(|scenario| scenario.targets.iter()) {
            if !names.contains(&target.name) {
                names.push(target.name.clone());
            }
        }
        names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
