use crate::{crm_envelope, parse_args, ParamKind, ParamSpec, Tool, ToolError};
use async_trait::async_trait;
use ghl_mcp_crm::{ContactSearch, CrmApi};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub struct GetContactInfoTool {
    crm: Arc<dyn CrmApi>,
}

impl GetContactInfoTool {
    pub fn new(crm: Arc<dyn CrmApi>) -> Self {
        Self { crm }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ContactIdArgs {
    contact_id: String,
}

#[async_trait]
impl Tool for GetContactInfoTool {
    fn name(&self) -> &str {
        "get_contact_info"
    }

    fn description(&self) -> &str {
        "Fetch detailed contact information from GoHighLevel, including name, email, phone and tags."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::required(
            "contact_id",
            ParamKind::String,
            "The unique identifier for the contact",
        )]
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: ContactIdArgs = parse_args(args)?;
        let outcome = self.crm.get_contact(&args.contact_id).await;
        Ok(crm_envelope(self.name(), "contact", outcome))
    }
}

pub struct SearchContactsTool {
    crm: Arc<dyn CrmApi>,
}

impl SearchContactsTool {
    pub fn new(crm: Arc<dyn CrmApi>) -> Self {
        Self { crm }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchArgs {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    100
}

#[async_trait]
impl Tool for SearchContactsTool {
    fn name(&self) -> &str {
        "search_contacts"
    }

    fn description(&self) -> &str {
        "Search for contacts in GoHighLevel by free-text query, email or phone."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::optional("query", ParamKind::String, "General search query"),
            ParamSpec::optional("email", ParamKind::String, "Email address to search for"),
            ParamSpec::optional("phone", ParamKind::String, "Phone number to search for"),
            ParamSpec::optional(
                "limit",
                ParamKind::Integer,
                "Maximum number of results to return (default 100)",
            ),
        ]
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: SearchArgs = parse_args(args)?;
        let search = ContactSearch {
            query: args.query,
            email: args.email,
            phone: args.phone,
            limit: args.limit,
        };
        let outcome = self.crm.search_contacts(&search).await;
        Ok(crm_envelope(self.name(), "contacts", outcome))
    }
}

pub struct GetContactActivitiesTool {
    crm: Arc<dyn CrmApi>,
}

impl GetContactActivitiesTool {
    pub fn new(crm: Arc<dyn CrmApi>) -> Self {
        Self { crm }
    }
}

#[async_trait]
impl Tool for GetContactActivitiesTool {
    fn name(&self) -> &str {
        "get_contact_activities"
    }

    fn description(&self) -> &str {
        "Get the activity timeline for a specific contact in GoHighLevel."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::required(
            "contact_id",
            ParamKind::String,
            "The unique identifier for the contact",
        )]
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: ContactIdArgs = parse_args(args)?;
        let outcome = self.crm.get_contact_activities(&args.contact_id).await;
        Ok(crm_envelope(self.name(), "activities", outcome))
    }
}
