//! Job configuration loading and validation.

use anyhow::{Context, Result};
use lib_dsp::Operation;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level job configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobConfig {
    /// Job name/description.
    #[serde(default = "default_name")]
    pub name: String,

    /// Signal source.
    pub input: InputConfig,

    /// Operations to run, in report order.
    #[serde(default)]
    pub operations: Vec<OperationConfig>,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_name() -> String { "job".to_string() }

/// CSV signal source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the CSV file, relative to the config file.
    pub path: PathBuf,

    /// Name of the time column.
    #[serde(default = "default_time_column")]
    pub time_column: String,

    /// Signal columns. Three-phase operations use the first three.
    #[serde(default)]
    pub signals: Vec<String>,
}

fn default_time_column() -> String { "t".to_string() }

/// One operation entry.
///
/// ```toml
/// [[operations]]
/// kind = "moving_rms"
/// window = 0.02
/// channel = "vb"
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OperationConfig {
    #[serde(flatten)]
    pub operation: Operation,

    /// Signal for single-channel operations; defaults to the first signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

/// Output configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File-name prefix for per-operation CSV files; defaults to the job name.
    #[serde(default)]
    pub prefix: Option<String>,
}

impl JobConfig {
    /// Prefix for result file names.
    pub fn file_prefix(&self) -> String {
        let raw = self.output.prefix.as_deref().unwrap_or(&self.name);
        raw.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect()
    }
}

/// Load configuration from a file.
pub fn load_config(path: &Path) -> Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: JobConfig = if path.extension().map_or(false, |e| e == "json") {
        serde_json::from_str(&content).with_context(|| "Failed to parse config as JSON")?
    } else {
        // Assume TOML
        toml::from_str(&content).with_context(|| "Failed to parse config as TOML")?
    };

    if config.input.path.is_relative() {
        if let Some(dir) = path.parent() {
            config.input.path = dir.join(&config.input.path);
        }
    }

    validate_config(&config)?;

    Ok(config)
}

/// Validate configuration.
pub fn validate_config(config: &JobConfig) -> Result<()> {
    if !config.input.path.exists() {
        anyhow::bail!("Input file not found: {:?}", config.input.path);
    }

    if config.input.signals.is_empty() {
        anyhow::bail!("No signals configured: set input.signals");
    }

    if config.operations.is_empty() {
        anyhow::bail!("No operations configured");
    }

    for (i, entry) in config.operations.iter().enumerate() {
        let op = &entry.operation;
        if op.channels() == 3 {
            if config.input.signals.len() < 3 {
                anyhow::bail!(
                    "Operation {} ({}) needs three signals, {} configured",
                    i + 1,
                    op.name(),
                    config.input.signals.len()
                );
            }
            if entry.channel.is_some() {
                tracing::warn!(
                    "Operation {} ({}) uses the first three signals; 'channel' is ignored",
                    i + 1,
                    op.name()
                );
            }
        }

        if let Some(ref channel) = entry.channel {
            if !config.input.signals.contains(channel) {
                anyhow::bail!(
                    "Operation {} ({}): channel '{}' is not one of the configured signals ({})",
                    i + 1,
                    op.name(),
                    channel,
                    config.input.signals.join(", ")
                );
            }
        }
    }

    Ok(())
}
