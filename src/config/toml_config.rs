use crate::config::{
    AppConfig, DEFAULT_BIND_ADDR, DEFAULT_COUNTER_TIMEOUT_SECS, DEFAULT_PORT,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SWAPI_URL,
};
use crate::core::worker_pool::MAX_WORKERS;
use crate::utils::error::{Result, StarsError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub swapi: SwapiSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub enrichment: EnrichmentSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapiSection {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentSection {
    pub max_workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StarsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SWAPI_URL})，未設定的變數保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StarsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl From<TomlConfig> for AppConfig {
    fn from(toml: TomlConfig) -> Self {
        AppConfig {
            port: toml.server.port.unwrap_or(DEFAULT_PORT),
            bind: toml
                .server
                .bind
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            swapi_url: toml
                .swapi
                .api_url
                .unwrap_or_else(|| DEFAULT_SWAPI_URL.to_string()),
            store_path: toml.store.path,
            request_timeout_secs: toml
                .server
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            counter_timeout_secs: toml
                .swapi
                .timeout_secs
                .unwrap_or(DEFAULT_COUNTER_TIMEOUT_SECS),
            max_workers: toml.enrichment.max_workers.unwrap_or(MAX_WORKERS),
            verbose: toml.logging.verbose.unwrap_or(false),
            json_logs: toml.logging.json.unwrap_or(false),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        AppConfig::from(self.clone()).validate()
    }
}
