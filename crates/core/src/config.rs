use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE_URL: &str = "https://rest.gohighlevel.com/v1";

/// API version pinned in the `Version` header of every CRM request.
pub const GHL_API_VERSION: &str = "2021-07-28";

const REQUIRED_ENV_VARS: [&str; 2] = ["GHL_API_KEY", "GHL_SUB_ACCOUNT_ID"];

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub ghl_api_base_url: String,
    pub ghl_api_key: String,
    pub ghl_sub_account_id: String,
    pub allowed_origins: String,
    pub mcp_server_host: String,
    pub mcp_server_port: u16,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AppConfig {
    /// Load settings from defaults, an optional config file and the process environment.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(custom_path, None)
    }

    /// Same as [`AppConfig::load`], but reads environment variables from `env`
    /// instead of the process environment when it is set.
    pub fn load_with_env(
        custom_path: Option<PathBuf>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("ghl_api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("ghl_api_key", "")?
            .set_default("ghl_sub_account_id", "")?
            .set_default("allowed_origins", "*")?
            .set_default("mcp_server_host", "0.0.0.0")?
            .set_default("mcp_server_port", 8000)?
            .set_default("request_timeout_secs", 30)?;

        if let Some(path) = custom_path {
            debug!("Reading config file {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        // GHL_API_KEY -> ghl_api_key, MCP_SERVER_PORT -> mcp_server_port, ...
        let s = builder
            .add_source(Environment::default().source(env))
            .build()?;

        s.try_deserialize()
    }

    /// Names of required environment variables that resolved to an empty value.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_ENV_VARS
            .iter()
            .zip([&self.ghl_api_key, &self.ghl_sub_account_id])
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn allowed_origins(&self) -> AllowedOrigins {
        let raw = self.allowed_origins.trim();
        if raw == "*" || raw.is_empty() {
            return AllowedOrigins::Any;
        }
        AllowedOrigins::List(
            raw.split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.mcp_server_host, self.mcp_server_port)
    }
}
