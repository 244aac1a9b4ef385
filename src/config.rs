use anyhow::{anyhow, Result};
use serde_derive::Deserialize;
use std::str::FromStr;
use std::time::Duration;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig> {
    match envy::from_env::<AppConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load AppConfig: {}", err)),
    }
}

fn default_interval_sec() -> u64 {
    60
}

fn default_task_timeout_sec() -> u64 {
    30
}

#[derive(Deserialize, Debug)]
pub struct CollectorConfig {
    #[serde(default = "default_interval_sec")]
    pub interval_sec: u64,
    // upper bound for one whole refresh cycle, on top of the per-request timeout
    #[serde(default = "default_task_timeout_sec")]
    pub task_timeout_sec: u64,
}

pub fn load_collector_config() -> Result<CollectorConfig> {
    match envy::prefixed("COLLECTOR_").from_env::<CollectorConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load CollectorConfig: {}", err)),
    }
}

fn default_timeout_sec() -> u64 {
    10
}

#[derive(Deserialize, Debug, Clone)]
pub struct EnvoyConfig {
    pub host: String,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

impl EnvoyConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.host)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

pub(crate) fn load_envoy_config() -> Result<EnvoyConfig> {
    match envy::prefixed("ENVOY_").from_env::<EnvoyConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load EnvoyConfig: {}", err)),
    }
}
