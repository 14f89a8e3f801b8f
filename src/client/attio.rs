//! Synchronous Attio REST client.

use super::{build_agent, build_url, parse_body, segment, timed};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::metrics::Metrics;
use crate::models::{AttioRecord, AttioStatus, DataEnvelope, RecordQuery, UpdateRecordRequest};
use serde::Serialize;
use std::sync::Arc;

/// HTTP client for the Attio API (bearer token auth).
#[derive(Clone)]
pub struct AttioClient {
    base_url: String,
    api_token: String,
    agent: Arc<ureq::Agent>,
    metrics: Metrics,
}

impl AttioClient {
    /// Create a client from configuration, sharing `metrics` with other clients.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        Self {
            base_url: config.attio_api_url.clone(),
            api_token: config.attio_api_token.clone(),
            agent: build_agent(config.request_timeout),
            metrics,
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_token: String) -> Self {
        Self {
            base_url,
            api_token,
            agent: build_agent(10),
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_token)
    }

    fn get(&self, path: &str) -> ApiResult<ureq::Response> {
        let url = build_url(&self.base_url, path);
        timed(&self.metrics, "GET", &url, || {
            self.agent
                .get(&url)
                .set("Authorization", &self.bearer())
                .set("Accept", "application/json")
                .call()
        })
    }

    fn send<B: Serialize>(&self, method: &str, path: &str, body: &B) -> ApiResult<ureq::Response> {
        let url = build_url(&self.base_url, path);
        let body = serde_json::to_value(body).map_err(ApiError::JsonError)?;

        tracing::debug!("{} {}", method, url);
        tracing::debug!(
            "Request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| "<invalid json>".to_string())
        );

        timed(&self.metrics, method, &url, || {
            self.agent
                .request(method, &url)
                .set("Authorization", &self.bearer())
                .set("Content-Type", "application/json")
                .send_json(&body)
        })
    }

    /// `GET /objects/{object}/records/{id}`
    pub fn get_record(&self, object: &str, record_id: &str) -> ApiResult<AttioRecord> {
        let path = format!("/objects/{}/records/{}", segment(object), segment(record_id));
        let response = self.get(&path)?;
        let envelope: DataEnvelope<AttioRecord> = parse_body(response)?;
        Ok(envelope.data)
    }

    /// `PATCH /objects/{object}/records/{id}`. Attributes not named in the
    /// request are left untouched.
    pub fn update_record(
        &self,
        object: &str,
        record_id: &str,
        request: &UpdateRecordRequest,
    ) -> ApiResult<AttioRecord> {
        let path = format!("/objects/{}/records/{}", segment(object), segment(record_id));
        let response = self.send("PATCH", &path, request)?;
        let envelope: DataEnvelope<AttioRecord> = parse_body(response)?;
        Ok(envelope.data)
    }

    /// `POST /objects/{object}/records/query`
    pub fn query_records(&self, object: &str, query: &RecordQuery) -> ApiResult<Vec<AttioRecord>> {
        let path = format!("/objects/{}/records/query", segment(object));
        let response = self.send("POST", &path, query)?;
        let envelope: DataEnvelope<Vec<AttioRecord>> = parse_body(response)?;
        Ok(envelope.data)
    }

    /// `GET /objects/{object}/attributes/{attribute}/statuses`
    pub fn list_statuses(&self, object: &str, attribute: &str) -> ApiResult<Vec<AttioStatus>> {
        let path = format!(
            "/objects/{}/attributes/{}/statuses",
            segment(object),
            segment(attribute)
        );
        let response = self.get(&path)?;
        let envelope: DataEnvelope<Vec<AttioStatus>> = parse_body(response)?;
        Ok(envelope.data)
    }
}
