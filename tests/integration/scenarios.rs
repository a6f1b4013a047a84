use crate::integration::config::{LoggingOverrides, PipelineOverrides};
use crate::integration::matcher::Matcher;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct TestScenario {
    pub name: String,
    /// Arguments passed to `moment_cli`
    pub args: Vec<String>,
    /// JSON written to the CLI's stdin
    pub stdin: String,
    pub logging: Option<LoggingOverrides>,
    pub pipeline: Option<PipelineOverrides>,
    /// The CLI is expected to exit non-zero; matchers then run on stderr
    #[serde(default)]
    pub expect_failure: bool,
    pub matchers: Vec<Matcher>,
}

pub fn load_scenarios_from_json(path: &str) -> Vec<TestScenario> {
    let content = fs::read_to_string(path).expect("Failed to read scenario file");
    serde_json::from_str(&content).expect("Invalid JSON format")
}
