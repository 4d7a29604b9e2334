pub mod contacts;
pub mod notes;
pub mod opportunities;
pub mod pipelines;
pub mod registry;
pub mod resources;
pub mod webhook;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use ghl_mcp_crm::CrmError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Tool '{0}' is already registered")]
    Duplicate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Number,
    Boolean,
    Object,
}

impl ParamKind {
    /// JSON Schema type name.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::Object => "object",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters(&self) -> Vec<ParamSpec>;
    /// `args` is the caller's keyword-argument object. Upstream failures come
    /// back as a `{success: false, error}` value; only argument validation errors return `Err`.
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;
}

/// Listing view of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn from_tool(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            parameters: tool.parameters(),
        }
    }

    /// `{name, description, parameters: {param: type}}`
    pub fn to_listing(&self) -> Value {
        let parameters: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.to_string(), Value::from(p.kind.as_str())))
            .collect();
        json!({
            "name": self.name,
            "description": self.description,
            "parameters": parameters,
        })
    }

    /// `{name, description, inputSchema}` in the MCP tool-description shape.
    pub fn to_mcp(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| {
                (
                    p.name.to_string(),
                    json!({ "type": p.kind.as_str(), "description": p.description }),
                )
            })
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationResult {
    pub success: bool,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl ToolInvocationResult {
    pub fn success(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "tool failed without an error message".to_string();
        }
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}

pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Wrap one CRM outcome as `{success, <key>: data}` or `{success: false, error}`.
pub(crate) fn crm_envelope(tool: &str, key: &str, outcome: Result<Value, CrmError>) -> Value {
    match outcome {
        Ok(data) => {
            let mut envelope = Map::new();
            envelope.insert("success".to_string(), Value::Bool(true));
            envelope.insert(key.to_string(), data);
            Value::Object(envelope)
        }
        Err(e) => {
            warn!(tool = tool, error = %e, "CRM call failed");
            json!({
                "success": false,
                "error": e.to_string(),
            })
        }
    }
}
