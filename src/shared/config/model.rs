use serde::Deserialize;

use crate::engine::moment::central::DEFAULT_MAX_CENTRAL_ORDER;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Number of partitions the local executor splits a group into
    pub shard_count: usize,
    /// Maximum number of partials folded by one combine call in the tree
    pub combine_fan_in: usize,
    /// Run per-shard Initial and Combine on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_central_max_order")]
    pub central_max_order: u32,
}

fn default_parallel() -> bool {
    true
}

fn default_central_max_order() -> u32 {
    DEFAULT_MAX_CENTRAL_ORDER
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            shard_count: 4,
            combine_fan_in: 2,
            parallel: default_parallel(),
            central_max_order: default_central_max_order(),
        }
    }
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("MOMENT_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
