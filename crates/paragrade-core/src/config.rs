use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Where and what to ask. Threaded explicitly through client construction;
/// there is no ambient endpoint or model state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "qwen2.5:3b-instruct".to_string()
}

/// Per-run dispatch parameters. `max_output_tokens` is a per-pair budget;
/// batched strategies scale it by batch length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Batched strategies only. Tradeoff: bigger batch means fewer calls but
    /// a longer prompt.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Concurrent strategy only: cap on simultaneously in-flight calls,
    /// independent of total pair count.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_output_tokens: default_max_output_tokens(),
            batch_size: default_batch_size(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

fn default_max_output_tokens() -> u32 {
    8
}

fn default_batch_size() -> usize {
    8
}

fn default_max_concurrency() -> usize {
    16
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub version: u32,
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Seed for negative-pair permutation; callers without a seed get
    /// non-reproducible pair sets, so it is required here.
    pub seed: u64,
}

pub fn load_config(path: &Path) -> Result<EvalConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;
    let cfg: EvalConfig = serde_yaml::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;
    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }
    if cfg.dispatch.batch_size == 0 {
        return Err(ConfigError("dispatch.batch_size must be at least 1".into()));
    }
    if cfg.dispatch.max_concurrency == 0 {
        return Err(ConfigError(
            "dispatch.max_concurrency must be at least 1".into(),
        ));
    }
    Ok(cfg)
}
