use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::link_speed::DEFAULT_NETWORK_SPEED_MBS;
use crate::sampler::{SamplerConfig, default_disk_mount};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub history: HistoryConfig,
    pub sampling: SamplingConfig,
    pub network: NetworkConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Points kept per graph.
    pub data_points: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { data_points: 11 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub interval_ms: u64,
    /// Gap between the two network counter readings within one tick.
    pub network_window_ms: u64,
    /// Mount point reported as disk usage.
    pub disk_mount: String,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            network_window_ms: 500,
            disk_mount: default_disk_mount().into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Used as the network graph scale when detection is off or fails.
    pub max_speed_mbs: f64,
    pub detect_speed: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_speed_mbs: DEFAULT_NETWORK_SPEED_MBS,
            detect_speed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub dark_mode: bool,
    pub resize_check_interval_ms: u64,
    /// Terminal width (columns) below which detail rows are hidden.
    pub compact_below: u16,
    pub output: OutputMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            resize_check_interval_ms: 500,
            compact_below: 100,
            output: OutputMode::Text,
        }
    }
}

impl AppConfig {
    /// `CONFIG_FILE` if set (must exist), else `config.toml` when present,
    /// else built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_file(&path),
            Err(_) if Path::new("config.toml").exists() => Self::load_from_file("config.toml"),
            Err(_) => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("config file {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.history.data_points > 0,
            "history.data_points must be > 0, got {}",
            self.history.data_points
        );
        anyhow::ensure!(
            self.sampling.interval_ms > 0,
            "sampling.interval_ms must be > 0, got {}",
            self.sampling.interval_ms
        );
        anyhow::ensure!(
            self.sampling.network_window_ms > 0
                && self.sampling.network_window_ms < self.sampling.interval_ms,
            "sampling.network_window_ms must be > 0 and < sampling.interval_ms ({}), got {}",
            self.sampling.interval_ms,
            self.sampling.network_window_ms
        );
        anyhow::ensure!(
            !self.sampling.disk_mount.is_empty(),
            "sampling.disk_mount must be non-empty"
        );
        anyhow::ensure!(
            self.network.max_speed_mbs.is_finite() && self.network.max_speed_mbs > 0.0,
            "network.max_speed_mbs must be > 0, got {}",
            self.network.max_speed_mbs
        );
        anyhow::ensure!(
            self.display.resize_check_interval_ms > 0,
            "display.resize_check_interval_ms must be > 0, got {}",
            self.display.resize_check_interval_ms
        );
        anyhow::ensure!(
            self.display.compact_below > 0,
            "display.compact_below must be > 0, got {}",
            self.display.compact_below
        );
        Ok(())
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            network_window: Duration::from_millis(self.sampling.network_window_ms),
            disk_mount: self.sampling.disk_mount.clone().into(),
        }
    }
}
