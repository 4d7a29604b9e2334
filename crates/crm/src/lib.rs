pub mod client;
pub mod types;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use client::{CrmClient, CrmSettings};
pub use types::{ContactSearch, HttpMethod, NewOpportunity, RequestContext};

/// Query key that scopes every CRM call to one sub-account.
pub const LOCATION_ID_KEY: &str = "locationId";

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Invalid response body: {0}")]
    Decode(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// The CRM operations the tools are built on. One call, one HTTP round trip.
#[async_trait]
pub trait CrmApi: Send + Sync {
    async fn get_contact(&self, contact_id: &str) -> Result<Value, CrmError>;

    async fn list_opportunities(&self, pipeline_id: Option<&str>) -> Result<Value, CrmError>;

    /// All funnels when `pipeline_id` is `None`.
    async fn get_pipeline(&self, pipeline_id: Option<&str>) -> Result<Value, CrmError>;

    async fn create_note(&self, contact_id: &str, body: &str) -> Result<Value, CrmError>;

    async fn search_contacts(&self, search: &ContactSearch) -> Result<Value, CrmError>;

    async fn get_contact_activities(&self, contact_id: &str) -> Result<Value, CrmError>;

    async fn create_opportunity(&self, opportunity: &NewOpportunity) -> Result<Value, CrmError>;

    /// POST `payload` to an arbitrary absolute URL, outside the CRM base URL
    /// and without credentials.
    async fn trigger_webhook(&self, url: &str, payload: &Value) -> Result<Value, CrmError>;
}
