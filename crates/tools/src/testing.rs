use async_trait::async_trait;
use ghl_mcp_crm::{ContactSearch, CrmApi, CrmError, NewOpportunity};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// In-memory `CrmApi` that records each call and answers with a canned reply.
pub(crate) struct FakeCrm {
    reply: Result<Value, (u16, String)>,
    calls: Mutex<Vec<(&'static str, Value)>>,
}

impl FakeCrm {
    pub(crate) fn ok(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((status, body.to_string())),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> Vec<(&'static str, Value)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str, args: Value) -> Result<Value, CrmError> {
        self.calls.lock().unwrap().push((op, args));
        match &self.reply {
            Ok(v) => Ok(v.clone()),
            Err((status, body)) => Err(CrmError::Http {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

#[async_trait]
impl CrmApi for FakeCrm {
    async fn get_contact(&self, contact_id: &str) -> Result<Value, CrmError> {
        self.record("get_contact", json!({ "contact_id": contact_id }))
    }

    async fn list_opportunities(&self, pipeline_id: Option<&str>) -> Result<Value, CrmError> {
        self.record("list_opportunities", json!({ "pipeline_id": pipeline_id }))
    }

    async fn get_pipeline(&self, pipeline_id: Option<&str>) -> Result<Value, CrmError> {
        self.record("get_pipeline", json!({ "pipeline_id": pipeline_id }))
    }

    async fn create_note(&self, contact_id: &str, body: &str) -> Result<Value, CrmError> {
        self.record("create_note", json!({ "contact_id": contact_id, "body": body }))
    }

    async fn search_contacts(&self, search: &ContactSearch) -> Result<Value, CrmError> {
        self.record(
            "search_contacts",
            json!({
                "query": search.query,
                "email": search.email,
                "phone": search.phone,
                "limit": search.limit,
            }),
        )
    }

    async fn get_contact_activities(&self, contact_id: &str) -> Result<Value, CrmError> {
        self.record("get_contact_activities", json!({ "contact_id": contact_id }))
    }

    async fn create_opportunity(&self, opportunity: &NewOpportunity) -> Result<Value, CrmError> {
        let body = serde_json::to_value(opportunity).unwrap();
        self.record("create_opportunity", body)
    }

    async fn trigger_webhook(&self, url: &str, payload: &Value) -> Result<Value, CrmError> {
        self.record("trigger_webhook", json!({ "url": url, "payload": payload }))
    }
}
