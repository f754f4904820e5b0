pub mod toml_config;

use crate::core::worker_pool::MAX_WORKERS;
use crate::utils::error::{Result, StarsError};
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_range, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use toml_config::TomlConfig;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_SWAPI_URL: &str = "https://swapi.dev/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_COUNTER_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Parser)]
#[command(name = "stars")]
#[command(about = "Planet catalogue service with SWAPI film appearance counts")]
pub struct CliConfig {
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    #[arg(long, env = "SWAPI_URL", default_value = DEFAULT_SWAPI_URL)]
    pub swapi_url: String,

    #[arg(long, env = "STORE_PATH", help = "Persist planets to this JSON file")]
    pub store_path: Option<String>,

    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    #[arg(long, default_value_t = DEFAULT_COUNTER_TIMEOUT_SECS)]
    pub counter_timeout_secs: u64,

    #[arg(long, default_value_t = MAX_WORKERS)]
    pub max_workers: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,
}

impl CliConfig {
    /// 解析最終設定：有 `--config` 時以 TOML 檔為準
    pub fn resolve(&self) -> Result<AppConfig> {
        match &self.config {
            Some(path) => {
                tracing::info!("📄 Loading configuration from {}", path.display());
                Ok(TomlConfig::from_file(path)?.into())
            }
            None => Ok(AppConfig {
                port: self.port,
                bind: self.bind.clone(),
                swapi_url: self.swapi_url.clone(),
                store_path: self.store_path.clone(),
                request_timeout_secs: self.request_timeout_secs,
                counter_timeout_secs: self.counter_timeout_secs,
                max_workers: self.max_workers,
                verbose: self.verbose,
                json_logs: self.json_logs,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub bind: String,
    pub swapi_url: String,
    pub store_path: Option<String>,
    pub request_timeout_secs: u64,
    pub counter_timeout_secs: u64,
    pub max_workers: usize,
    pub verbose: bool,
    pub json_logs: bool,
}

impl AppConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn counter_timeout(&self) -> Duration {
        Duration::from_secs(self.counter_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND_ADDR.to_string(),
            swapi_url: DEFAULT_SWAPI_URL.to_string(),
            store_path: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            counter_timeout_secs: DEFAULT_COUNTER_TIMEOUT_SECS,
            max_workers: MAX_WORKERS,
            verbose: false,
            json_logs: false,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if self.swapi_url.trim().is_empty() {
            return Err(StarsError::MissingConfigError {
                field: "swapi_url".to_string(),
            });
        }
        validate_url("swapi_url", &self.swapi_url)?;

        if let Some(path) = &self.store_path {
            validate_path("store_path", path)?;
        }

        validate_positive_number("request_timeout_secs", self.request_timeout_secs, 1)?;
        validate_positive_number("counter_timeout_secs", self.counter_timeout_secs, 1)?;
        validate_range("max_workers", self.max_workers, 1, MAX_WORKERS)?;

        Ok(())
    }
}
