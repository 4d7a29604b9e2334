use crate::{crm_envelope, parse_args, ParamKind, ParamSpec, Tool, ToolError};
use async_trait::async_trait;
use ghl_mcp_crm::{CrmApi, NewOpportunity};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub struct ListOpportunitiesTool {
    crm: Arc<dyn CrmApi>,
}

impl ListOpportunitiesTool {
    pub fn new(crm: Arc<dyn CrmApi>) -> Self {
        Self { crm }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ListArgs {
    #[serde(default)]
    pipeline_id: Option<String>,
}

#[async_trait]
impl Tool for ListOpportunitiesTool {
    fn name(&self) -> &str {
        "list_opportunities"
    }

    fn description(&self) -> &str {
        "List all opportunities in the GHL sub-account, optionally filtered by pipeline."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::optional(
            "pipeline_id",
            ParamKind::String,
            "Optional pipeline ID to filter opportunities",
        )]
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: ListArgs = parse_args(args)?;
        let outcome = self
            .crm
            .list_opportunities(args.pipeline_id.as_deref())
            .await;
        Ok(crm_envelope(self.name(), "opportunities", outcome))
    }
}

pub struct CreateOpportunityTool {
    crm: Arc<dyn CrmApi>,
}

impl CreateOpportunityTool {
    pub fn new(crm: Arc<dyn CrmApi>) -> Self {
        Self { crm }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateArgs {
    contact_id: String,
    pipeline_id: String,
    stage_id: String,
    title: String,
    #[serde(default)]
    value: Option<f64>,
}

#[async_trait]
impl Tool for CreateOpportunityTool {
    fn name(&self) -> &str {
        "create_opportunity"
    }

    fn description(&self) -> &str {
        "Create a new opportunity for a contact in a GoHighLevel pipeline stage."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required(
                "contact_id",
                ParamKind::String,
                "The contact to associate with this opportunity",
            ),
            ParamSpec::required(
                "pipeline_id",
                ParamKind::String,
                "The pipeline to place this opportunity in",
            ),
            ParamSpec::required(
                "stage_id",
                ParamKind::String,
                "The initial stage for this opportunity",
            ),
            ParamSpec::required("title", ParamKind::String, "Title/name of the opportunity"),
            ParamSpec::optional(
                "value",
                ParamKind::Number,
                "Optional monetary value of the opportunity",
            ),
        ]
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: CreateArgs = parse_args(args)?;
        let opportunity = NewOpportunity {
            contact_id: args.contact_id,
            pipeline_id: args.pipeline_id,
            stage_id: args.stage_id,
            title: args.title,
            value: args.value,
        };
        let outcome = self.crm.create_opportunity(&opportunity).await;
        Ok(crm_envelope(self.name(), "opportunity", outcome))
    }
}
