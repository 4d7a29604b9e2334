use crate::types::{ContactSearch, HttpMethod, NewOpportunity, RequestContext};
use crate::{CrmApi, CrmError, LOCATION_ID_KEY};
use async_trait::async_trait;
use ghl_mcp_core::config::{AppConfig, GHL_API_VERSION};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct CrmSettings {
    pub base_url: String,
    pub api_key: String,
    pub location_id: String,
    pub timeout: Duration,
}

impl CrmSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.ghl_api_base_url.clone(),
            api_key: config.ghl_api_key.clone(),
            location_id: config.ghl_sub_account_id.clone(),
            timeout: config.request_timeout(),
        }
    }
}

pub struct CrmClient {
    settings: CrmSettings,
    client: Client,
}

impl CrmClient {
    pub fn new(settings: CrmSettings) -> Result<Self, CrmError> {
        let client = Client::builder()
            .user_agent(concat!("ghl-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CrmError::Config(e.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Resolve `endpoint` against the base URL and scope the query to the
    /// configured location unless the caller already did.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<Value>,
        mut query: Vec<(String, String)>,
    ) -> RequestContext {
        let url = format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        if !query.iter().any(|(k, _)| k == LOCATION_ID_KEY) {
            query.push((LOCATION_ID_KEY.to_string(), self.settings.location_id.clone()));
        }
        RequestContext {
            method,
            url,
            query,
            body,
            timeout: self.settings.timeout,
        }
    }

    pub async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<Value>,
        query: Vec<(String, String)>,
    ) -> Result<Value, CrmError> {
        let ctx = self.build_request(method, endpoint, body, query);
        debug!(method = %ctx.method, url = %ctx.url, "CRM request");

        let mut req = self
            .client
            .request(ctx.method.as_reqwest(), &ctx.url)
            .bearer_auth(&self.settings.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header("Version", GHL_API_VERSION)
            .query(&ctx.query)
            .timeout(ctx.timeout);
        if let Some(body) = &ctx.body {
            req = req.json(body);
        }

        let res = req.send().await.map_err(transport_error)?;
        let res = check_status(res).await?;

        let text = res.text().await.map_err(transport_error)?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| CrmError::Decode(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> CrmError {
    if e.is_timeout() {
        CrmError::Transport(format!("request timed out: {}", e))
    } else {
        CrmError::Transport(e.to_string())
    }
}

async fn check_status(res: Response) -> Result<Response, CrmError> {
    let status = res.status();
    if status.as_u16() < 400 {
        return Ok(res);
    }
    let path = res.url().path().to_string();
    let body = res.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), path = %path, "Upstream returned error status");
    Err(CrmError::Http {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl CrmApi for CrmClient {
    async fn get_contact(&self, contact_id: &str) -> Result<Value, CrmError> {
        self.request(HttpMethod::Get, &format!("/contacts/{}", contact_id), None, Vec::new())
            .await
    }

    async fn list_opportunities(&self, pipeline_id: Option<&str>) -> Result<Value, CrmError> {
        let mut query = Vec::new();
        if let Some(id) = pipeline_id.filter(|id| !id.is_empty()) {
            query.push(("pipelineId".to_string(), id.to_string()));
        }
        self.request(HttpMethod::Get, "/opportunities/", None, query).await
    }

    async fn get_pipeline(&self, pipeline_id: Option<&str>) -> Result<Value, CrmError> {
        let endpoint = match pipeline_id.filter(|id| !id.is_empty()) {
            Some(id) => format!("/funnels/{}", id),
            None => "/funnels/".to_string(),
        };
        self.request(HttpMethod::Get, &endpoint, None, Vec::new()).await
    }

    async fn create_note(&self, contact_id: &str, body: &str) -> Result<Value, CrmError> {
        let data = json!({
            "body": body,
            "contactId": contact_id,
        });
        self.request(
            HttpMethod::Post,
            &format!("/contacts/{}/notes", contact_id),
            Some(data),
            Vec::new(),
        )
        .await
    }

    async fn search_contacts(&self, search: &ContactSearch) -> Result<Value, CrmError> {
        self.request(HttpMethod::Get, "/contacts/", None, search.query_params())
            .await
    }

    async fn get_contact_activities(&self, contact_id: &str) -> Result<Value, CrmError> {
        self.request(
            HttpMethod::Get,
            &format!("/contacts/{}/activities", contact_id),
            None,
            Vec::new(),
        )
        .await
    }

    async fn create_opportunity(&self, opportunity: &NewOpportunity) -> Result<Value, CrmError> {
        let data =
            serde_json::to_value(opportunity).map_err(|e| CrmError::Decode(e.to_string()))?;
        self.request(HttpMethod::Post, "/opportunities/", Some(data), Vec::new())
            .await
    }

    async fn trigger_webhook(&self, url: &str, payload: &Value) -> Result<Value, CrmError> {
        debug!(url = %url, "Triggering webhook");
        let res = self
            .client
            .post(url)
            .json(payload)
            .timeout(self.settings.timeout)
            .send()
            .await
            .map_err(transport_error)?;
        let res = check_status(res).await?;
        let text = res.text().await.map_err(transport_error)?;

        Ok(json!({
            "status": "success",
            "response": text,
        }))
    }
}
