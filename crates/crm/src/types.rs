use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// Everything needed to issue one upstream call. Built per request and dropped after it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactSearch {
    pub query: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub limit: u32,
}

impl Default for ContactSearch {
    fn default() -> Self {
        Self {
            query: None,
            email: None,
            phone: None,
            limit: 100,
        }
    }
}

impl ContactSearch {
    /// `limit` is always sent; empty filters are dropped.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("limit".to_string(), self.limit.to_string())];
        let filters = [
            ("query", &self.query),
            ("email", &self.email),
            ("phone", &self.phone),
        ];
        for (key, value) in filters {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                params.push((key.to_string(), v.to_string()));
            }
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOpportunity {
    pub contact_id: String,
    pub pipeline_id: String,
    #[serde(rename = "pipelineStageId")]
    pub stage_id: String,
    pub title: String,
    #[serde(rename = "monetaryValue", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_params_skip_empty_filters() {
        let search = ContactSearch {
            query: Some(String::new()),
            email: Some("test@example.com".to_string()),
            phone: None,
            limit: 25,
        };
        assert_eq!(
            search.query_params(),
            vec![
                ("limit".to_string(), "25".to_string()),
                ("email".to_string(), "test@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn default_search_sends_only_limit() {
        assert_eq!(
            ContactSearch::default().query_params(),
            vec![("limit".to_string(), "100".to_string())]
        );
    }

    #[test]
    fn opportunity_body_uses_crm_field_names() {
        let opportunity = NewOpportunity {
            contact_id: "c1".to_string(),
            pipeline_id: "p1".to_string(),
            stage_id: "s1".to_string(),
            title: "Deal".to_string(),
            value: Some(1000.0),
        };
        assert_eq!(
            serde_json::to_value(&opportunity).expect("serialize"),
            json!({
                "contactId": "c1",
                "pipelineId": "p1",
                "pipelineStageId": "s1",
                "title": "Deal",
                "monetaryValue": 1000.0
            })
        );
    }

    #[test]
    fn opportunity_without_value_omits_monetary_value() {
        let opportunity = NewOpportunity {
            contact_id: "c1".to_string(),
            pipeline_id: "p1".to_string(),
            stage_id: "s1".to_string(),
            title: "Deal".to_string(),
            value: None,
        };
        let body = serde_json::to_value(&opportunity).expect("serialize");
        assert!(body.get("monetaryValue").is_none());
        assert_eq!(body["pipelineStageId"], "s1");
    }
}
