use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Serialize)]
pub struct TestConfig {
    pub logging: LoggingConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Serialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Serialize)]
pub struct PipelineConfig {
    pub shard_count: usize,
    pub combine_fan_in: usize,
    pub parallel: bool,
    pub central_max_order: u32,
}

/// Per-scenario overrides of the `[pipeline]` table.
#[derive(Debug, Default, Deserialize)]
pub struct PipelineOverrides {
    pub shard_count: Option<usize>,
    pub combine_fan_in: Option<usize>,
    pub parallel: Option<bool>,
    pub central_max_order: Option<u32>,
}

/// Per-scenario overrides of the `[logging]` table.
#[derive(Debug, Default, Deserialize)]
pub struct LoggingOverrides {
    pub stdout_level: Option<String>,
}

/// Writes a config for `name` into a fresh temp dir. The dir must outlive
/// the CLI process, so it is handed back to the caller.
pub fn write_config_for(
    name: &str,
    logging: Option<&LoggingOverrides>,
    overrides: Option<&PipelineOverrides>,
) -> (TempDir, String) {
    let dir = tempfile::Builder::new()
        .prefix(&format!("moment_{}_", name))
        .tempdir()
        .expect("Failed to create scenario dir");
    let base_dir = dir.path().display().to_string();
    let config_path = format!("{}/config.test.toml", base_dir);

    let defaults = PipelineOverrides::default();
    let overrides = overrides.unwrap_or(&defaults);
    let config = TestConfig {
        logging: LoggingConfig {
            log_dir: format!("{}/logs", base_dir),
            stdout_level: logging
                .and_then(|l| l.stdout_level.clone())
                .unwrap_or_else(|| "error".into()),
            file_level: "debug".into(),
        },
        pipeline: PipelineConfig {
            shard_count: overrides.shard_count.unwrap_or(3),
            combine_fan_in: overrides.combine_fan_in.unwrap_or(2),
            parallel: overrides.parallel.unwrap_or(true),
            central_max_order: overrides.central_max_order.unwrap_or(16),
        },
    };

    let toml = toml::to_string_pretty(&config).unwrap();
    fs::write(&config_path, toml).unwrap();

    (dir, config_path)
}
