use crate::{crm_envelope, parse_args, ParamKind, ParamSpec, Tool, ToolError};
use async_trait::async_trait;
use ghl_mcp_crm::CrmApi;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub struct GetPipelineInfoTool {
    crm: Arc<dyn CrmApi>,
}

impl GetPipelineInfoTool {
    pub fn new(crm: Arc<dyn CrmApi>) -> Self {
        Self { crm }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PipelineArgs {
    #[serde(default)]
    pipeline_id: Option<String>,
}

#[async_trait]
impl Tool for GetPipelineInfoTool {
    fn name(&self) -> &str {
        "get_pipeline_info"
    }

    fn description(&self) -> &str {
        "Retrieve funnel/pipeline structure and stages from GoHighLevel."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::optional(
            "pipeline_id",
            ParamKind::String,
            "Specific pipeline ID; all pipelines are returned when omitted",
        )]
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: PipelineArgs = parse_args(args)?;
        let outcome = self.crm.get_pipeline(args.pipeline_id.as_deref()).await;
        Ok(crm_envelope(self.name(), "pipelines", outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCrm;
    use serde_json::json;

    #[tokio::test]
    async fn pipelines_key_wraps_funnels() {
        let crm = FakeCrm::ok(json!({"funnels": [{"id": "f1"}]}));
        let tool = GetPipelineInfoTool::new(crm.clone());

        let out = tool.execute(Value::Null).await.expect("execute");

        assert_eq!(out["pipelines"]["funnels"][0]["id"], "f1");
        assert_eq!(crm.calls()[0], ("get_pipeline", json!({"pipeline_id": null})));
    }
}
