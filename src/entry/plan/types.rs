use crate::args::{AnalyzeArgs, ChartsArgs};
use crate::domain::SuiteSettings;

pub(in crate::entry) enum RunPlan {
    Suite(Box<SuiteSettings>),
    Analyze(AnalyzeArgs),
    Charts(ChartsArgs),
}
