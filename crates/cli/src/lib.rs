use anyhow::{bail, Context, Result};
use ghl_mcp_core::config::AppConfig;
use ghl_mcp_crm::{CrmClient, CrmSettings};
use ghl_mcp_tools::registry::ToolRegistry;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

/// Wire the CRM client and every tool from `config`.
pub fn build_registry(config: &AppConfig) -> Result<ToolRegistry> {
    let client = CrmClient::new(CrmSettings::from_config(config))
        .context("Failed to build CRM HTTP client")?;
    let registry = ToolRegistry::with_crm_tools(Arc::new(client))?;
    info!("Registered {} tools", registry.len());
    Ok(registry)
}

/// Refuse to serve without CRM credentials.
pub fn check_required(config: &AppConfig) -> Result<()> {
    let missing = config.missing_required();
    if missing.is_empty() {
        return Ok(());
    }
    error!(
        "Missing required environment variables: {}",
        missing.join(", ")
    );
    bail!(
        "missing required environment variables: {} (check your environment or config file)",
        missing.join(", ")
    )
}

pub fn tool_catalog(registry: &ToolRegistry) -> Value {
    let tools: Vec<Value> = registry
        .descriptors()
        .iter()
        .map(|d| d.to_mcp())
        .collect();
    json!({ "tools": tools })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load_with_env(None, Some(env)).expect("config")
    }

    #[test]
    fn check_required_names_missing_credentials() {
        let err = check_required(&config(&[("GHL_API_KEY", "k")])).expect_err("missing");
        assert!(err.to_string().contains("GHL_SUB_ACCOUNT_ID"));
        assert!(!err.to_string().contains("GHL_API_KEY,"));

        check_required(&config(&[
            ("GHL_API_KEY", "k"),
            ("GHL_SUB_ACCOUNT_ID", "loc"),
        ]))
        .expect("complete");
    }

    #[test]
    fn catalog_lists_all_tools() {
        let registry = build_registry(&config(&[])).expect("registry");
        let catalog = tool_catalog(&registry);
        let tools = catalog["tools"].as_array().cloned().unwrap_or_default();
        assert_eq!(tools.len(), 8);
        assert_eq!(tools[7]["name"], "create_opportunity");
    }
}
