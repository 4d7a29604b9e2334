pub mod config;

/// Identifier reported by the health endpoint and used in logs.
pub const SERVER_NAME: &str = "ghl-mcp-server";

pub const DISPLAY_NAME: &str = "GHL MCP Server";

pub const VERSION: &str = "1.0.0";

pub const DESCRIPTION: &str = "Model Connection Protocol server for GoHighLevel integration";
