use crate::contacts::{GetContactActivitiesTool, GetContactInfoTool, SearchContactsTool};
use crate::notes::CreateNoteTool;
use crate::opportunities::{CreateOpportunityTool, ListOpportunitiesTool};
use crate::pipelines::GetPipelineInfoTool;
use crate::webhook::TriggerWebhookTool;
use crate::{Tool, ToolDescriptor, ToolError, ToolInvocationResult};
use ghl_mcp_crm::CrmApi;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Tool '{0}' not found")]
    ToolNotFound(String),
}

/// Name-indexed tools in registration order. Built at startup, then shared read-only.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The eight CRM tools, in their published order.
    pub fn with_crm_tools(crm: Arc<dyn CrmApi>) -> Result<Self, ToolError> {
        let mut registry = Self::new();
        registry.register(Arc::new(GetContactInfoTool::new(crm.clone())))?;
        registry.register(Arc::new(ListOpportunitiesTool::new(crm.clone())))?;
        registry.register(Arc::new(TriggerWebhookTool::new(crm.clone())))?;
        registry.register(Arc::new(GetPipelineInfoTool::new(crm.clone())))?;
        registry.register(Arc::new(CreateNoteTool::new(crm.clone())))?;
        registry.register(Arc::new(SearchContactsTool::new(crm.clone())))?;
        registry.register(Arc::new(GetContactActivitiesTool::new(crm.clone())))?;
        registry.register(Arc::new(CreateOpportunityTool::new(crm)))?;
        Ok(registry)
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::Duplicate(name));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| self.tools[i].clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|t| ToolDescriptor::from_tool(t.as_ref()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run `name` with `arguments`. Everything but an unknown name ends up in the envelope.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<ToolInvocationResult, DispatchError> {
        let Some(tool) = self.get(name) else {
            warn!(tool = name, "Unknown tool requested");
            return Err(DispatchError::ToolNotFound(name.to_string()));
        };

        let span = info_span!("tool", tool = name, invocation_id = %Uuid::new_v4());
        let result = async move {
            let started = Instant::now();
            let result = match tool.execute(Value::Object(arguments)).await {
                Ok(value) => ToolInvocationResult::success(value),
                Err(e) => {
                    warn!(error = %e, "Tool invocation rejected");
                    ToolInvocationResult::failure(e.to_string())
                }
            };
            info!(
                success = result.success,
                duration_ms = started.elapsed().as_millis() as u64,
                "Tool invocation finished"
            );
            result
        }
        .instrument(span)
        .await;
        Ok(result)
    }
}
