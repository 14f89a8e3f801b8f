//! Synchronous Apollo REST client.
//!
//! Apollo takes the API key in the JSON body for POST/PATCH requests and as
//! the `api_key` query parameter for GET requests.

use super::{build_agent, build_url, parse_body, segment, timed};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::metrics::Metrics;
use crate::models::{
    AccountEnvelope, AccountPayload, AccountsResponse, ApolloAccount, ApolloContact,
    ApolloOpportunity, ContactEnvelope, ContactPayload, ContactStagesResponse, ContactsResponse,
    OpportunitiesResponse, OpportunityEnvelope, OpportunityPayload, OpportunityStagesResponse,
    Stage,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// HTTP client for the Apollo API.
#[derive(Clone)]
pub struct ApolloClient {
    base_url: String,
    api_key: String,
    agent: Arc<ureq::Agent>,
    metrics: Metrics,
}

impl ApolloClient {
    /// Create a client from configuration, sharing `metrics` with other clients.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        Self {
            base_url: config.apollo_api_url.clone(),
            api_key: config.apollo_api_key.clone(),
            agent: build_agent(config.request_timeout),
            metrics,
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            agent: build_agent(10),
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn get(&self, path: &str) -> ApiResult<ureq::Response> {
        let url = format!(
            "{}?api_key={}",
            build_url(&self.base_url, path),
            urlencoding::encode(&self.api_key)
        );
        let logged = build_url(&self.base_url, path);
        timed(&self.metrics, "GET", &logged, || {
            self.agent
                .get(&url)
                .set("Accept", "application/json")
                .call()
        })
    }

    fn send<B: Serialize>(&self, method: &str, path: &str, body: &B) -> ApiResult<ureq::Response> {
        let url = build_url(&self.base_url, path);
        let mut body = serde_json::to_value(body).map_err(ApiError::JsonError)?;

        tracing::debug!("{} {}", method, url);
        tracing::debug!(
            "Request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| "<invalid json>".to_string())
        );

        match body.as_object_mut() {
            Some(map) => {
                map.insert("api_key".to_string(), Value::String(self.api_key.clone()));
            }
            None => {
                return Err(ApiError::InvalidRequest(format!(
                    "{} {} body must be a JSON object",
                    method, path
                )))
            }
        }

        timed(&self.metrics, method, &url, || {
            self.agent
                .request(method, &url)
                .set("Content-Type", "application/json")
                .set("Cache-Control", "no-cache")
                .send_json(&body)
        })
    }

    fn search_body(key: &str, query: &str, per_page: usize) -> Value {
        json!({ key: query, "page": 1, "per_page": per_page })
    }

    // ========================= Contacts =========================

    /// `POST /contacts/search` by keyword (email for exact lookups).
    pub fn search_contacts(&self, query: &str, per_page: usize) -> ApiResult<Vec<ApolloContact>> {
        let body = Self::search_body("q_keywords", query, per_page);
        let response: ContactsResponse = parse_body(self.send("POST", "/contacts/search", &body)?)?;
        Ok(response.contacts)
    }

    pub fn get_contact(&self, id: &str) -> ApiResult<ApolloContact> {
        let path = format!("/contacts/{}", segment(id));
        let envelope: ContactEnvelope = parse_body(self.get(&path)?)?;
        Ok(envelope.contact)
    }

    pub fn create_contact(&self, payload: &ContactPayload) -> ApiResult<ApolloContact> {
        let envelope: ContactEnvelope = parse_body(self.send("POST", "/contacts", payload)?)?;
        Ok(envelope.contact)
    }

    pub fn update_contact(&self, id: &str, payload: &ContactPayload) -> ApiResult<ApolloContact> {
        let path = format!("/contacts/{}", segment(id));
        let envelope: ContactEnvelope = parse_body(self.send("PATCH", &path, payload)?)?;
        Ok(envelope.contact)
    }

    // ========================= Accounts =========================

    /// `POST /accounts/search` by organization name.
    pub fn search_accounts(&self, name: &str, per_page: usize) -> ApiResult<Vec<ApolloAccount>> {
        let body = Self::search_body("q_organization_name", name, per_page);
        let response: AccountsResponse = parse_body(self.send("POST", "/accounts/search", &body)?)?;
        Ok(response.accounts)
    }

    pub fn get_account(&self, id: &str) -> ApiResult<ApolloAccount> {
        let path = format!("/accounts/{}", segment(id));
        let envelope: AccountEnvelope = parse_body(self.get(&path)?)?;
        Ok(envelope.account)
    }

    pub fn create_account(&self, payload: &AccountPayload) -> ApiResult<ApolloAccount> {
        let envelope: AccountEnvelope = parse_body(self.send("POST", "/accounts", payload)?)?;
        Ok(envelope.account)
    }

    pub fn update_account(&self, id: &str, payload: &AccountPayload) -> ApiResult<ApolloAccount> {
        let path = format!("/accounts/{}", segment(id));
        let envelope: AccountEnvelope = parse_body(self.send("PATCH", &path, payload)?)?;
        Ok(envelope.account)
    }

    // ========================= Opportunities =========================

    /// `POST /opportunities/search` by keyword.
    pub fn search_opportunities(
        &self,
        query: &str,
        per_page: usize,
    ) -> ApiResult<Vec<ApolloOpportunity>> {
        let body = Self::search_body("q_keywords", query, per_page);
        let response: OpportunitiesResponse =
            parse_body(self.send("POST", "/opportunities/search", &body)?)?;
        Ok(response.opportunities)
    }

    pub fn get_opportunity(&self, id: &str) -> ApiResult<ApolloOpportunity> {
        let envelope: OpportunityEnvelope =
            parse_body(self.get(&format!("/opportunities/{}", segment(id)))?)?;
        Ok(envelope.opportunity)
    }

    pub fn create_opportunity(&self, payload: &OpportunityPayload) -> ApiResult<ApolloOpportunity> {
        let envelope: OpportunityEnvelope =
            parse_body(self.send("POST", "/opportunities", payload)?)?;
        Ok(envelope.opportunity)
    }

    pub fn update_opportunity(
        &self,
        id: &str,
        payload: &OpportunityPayload,
    ) -> ApiResult<ApolloOpportunity> {
        let path = format!("/opportunities/{}", segment(id));
        let envelope: OpportunityEnvelope = parse_body(self.send("PATCH", &path, payload)?)?;
        Ok(envelope.opportunity)
    }

    // ========================= Stages =========================

    pub fn contact_stages(&self) -> ApiResult<Vec<Stage>> {
        let response: ContactStagesResponse = parse_body(self.get("/contact_stages")?)?;
        Ok(response.contact_stages)
    }

    pub fn opportunity_stages(&self) -> ApiResult<Vec<Stage>> {
        let response: OpportunityStagesResponse = parse_body(self.get("/opportunity_stages")?)?;
        Ok(response.opportunity_stages)
    }
}
