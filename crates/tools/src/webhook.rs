use crate::{crm_envelope, parse_args, ParamKind, ParamSpec, Tool, ToolError};
use async_trait::async_trait;
use ghl_mcp_crm::CrmApi;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

pub struct TriggerWebhookTool {
    crm: Arc<dyn CrmApi>,
}

impl TriggerWebhookTool {
    pub fn new(crm: Arc<dyn CrmApi>) -> Self {
        Self { crm }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WebhookArgs {
    webhook_url: String,
    payload: Map<String, Value>,
}

#[async_trait]
impl Tool for TriggerWebhookTool {
    fn name(&self) -> &str {
        "trigger_webhook"
    }

    fn description(&self) -> &str {
        "Trigger a custom GoHighLevel workflow webhook with a JSON payload."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("webhook_url", ParamKind::String, "The webhook URL to trigger"),
            ParamSpec::required("payload", ParamKind::Object, "Data to send to the webhook"),
        ]
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: WebhookArgs = parse_args(args)?;
        let payload = Value::Object(args.payload);
        let outcome = self.crm.trigger_webhook(&args.webhook_url, &payload).await;
        Ok(crm_envelope(self.name(), "result", outcome))
    }
}
