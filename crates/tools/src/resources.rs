use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Unknown resource: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
    #[serde(skip)]
    text: &'static str,
}

const RESOURCES: [Resource; 3] = [
    Resource {
        uri: "ghl://contacts",
        name: "GoHighLevel Contacts",
        description: "Access to GHL contact management",
        mime_type: "application/json",
        text: "GoHighLevel Contacts Resource - Use get_contact_info or search_contacts tools",
    },
    Resource {
        uri: "ghl://opportunities",
        name: "GoHighLevel Opportunities",
        description: "Access to GHL opportunity pipeline",
        mime_type: "application/json",
        text: "GoHighLevel Opportunities Resource - Use list_opportunities tool",
    },
    Resource {
        uri: "ghl://pipelines",
        name: "GoHighLevel Pipelines",
        description: "Access to GHL funnel and pipeline data",
        mime_type: "application/json",
        text: "GoHighLevel Pipelines Resource - Use get_pipeline_info tool",
    },
];

pub fn list_resources() -> Vec<Resource> {
    RESOURCES.to_vec()
}

pub fn read_resource(uri: &str) -> Result<&'static str, ResourceError> {
    RESOURCES
        .iter()
        .find(|r| r.uri == uri)
        .map(|r| r.text)
        .ok_or_else(|| ResourceError::Unknown(uri.to_string()))
}
