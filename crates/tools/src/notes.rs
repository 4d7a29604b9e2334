use crate::{crm_envelope, parse_args, ParamKind, ParamSpec, Tool, ToolError};
use async_trait::async_trait;
use ghl_mcp_crm::CrmApi;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub struct CreateNoteTool {
    crm: Arc<dyn CrmApi>,
}

impl CreateNoteTool {
    pub fn new(crm: Arc<dyn CrmApi>) -> Self {
        Self { crm }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateNoteArgs {
    contact_id: String,
    note_content: String,
}

#[async_trait]
impl Tool for CreateNoteTool {
    fn name(&self) -> &str {
        "create_note"
    }

    fn description(&self) -> &str {
        "Create a note on a specific contact in GoHighLevel."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required(
                "contact_id",
                ParamKind::String,
                "The unique identifier for the contact",
            ),
            ParamSpec::required(
                "note_content",
                ParamKind::String,
                "The content of the note to create",
            ),
        ]
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: CreateNoteArgs = parse_args(args)?;
        let outcome = self
            .crm
            .create_note(&args.contact_id, &args.note_content)
            .await;
        Ok(crm_envelope(self.name(), "note", outcome))
    }
}
