//! Async wrappers around the synchronous clients.
//!
//! Each call runs on tokio's blocking thread pool via
//! `tokio::task::spawn_blocking`, so a slow API never stalls the runtime.

use crate::client::{ApolloClient, AttioClient};
use crate::error::{ApiError, ApiResult};
use crate::models::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Run a blocking client call on the blocking pool.
async fn run_blocking<T, F>(call: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> ApiResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| ApiError::HttpError(format!("Task join error: {}", e)))?
}

/// Async Attio operations.
#[async_trait]
pub trait AsyncAttioClient: Send + Sync {
    async fn get_record(&self, object: &str, record_id: &str) -> ApiResult<AttioRecord>;
    async fn update_record(
        &self,
        object: &str,
        record_id: &str,
        request: &UpdateRecordRequest,
    ) -> ApiResult<AttioRecord>;
    async fn query_records(&self, object: &str, query: &RecordQuery) -> ApiResult<Vec<AttioRecord>>;
    async fn list_statuses(&self, object: &str, attribute: &str) -> ApiResult<Vec<AttioStatus>>;
}

#[derive(Clone)]
pub struct AsyncAttioClientImpl {
    client: Arc<AttioClient>,
}

impl AsyncAttioClientImpl {
    pub fn new(client: AttioClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncAttioClient for AsyncAttioClientImpl {
    async fn get_record(&self, object: &str, record_id: &str) -> ApiResult<AttioRecord> {
        let client = self.client.clone();
        let (object, record_id) = (object.to_string(), record_id.to_string());
        run_blocking(move || client.get_record(&object, &record_id)).await
    }

    async fn update_record(
        &self,
        object: &str,
        record_id: &str,
        request: &UpdateRecordRequest,
    ) -> ApiResult<AttioRecord> {
        let client = self.client.clone();
        let (object, record_id) = (object.to_string(), record_id.to_string());
        let request = request.clone();
        run_blocking(move || client.update_record(&object, &record_id, &request)).await
    }

    async fn query_records(&self, object: &str, query: &RecordQuery) -> ApiResult<Vec<AttioRecord>> {
        let client = self.client.clone();
        let object = object.to_string();
        let query = query.clone();
        run_blocking(move || client.query_records(&object, &query)).await
    }

    async fn list_statuses(&self, object: &str, attribute: &str) -> ApiResult<Vec<AttioStatus>> {
        let client = self.client.clone();
        let (object, attribute) = (object.to_string(), attribute.to_string());
        run_blocking(move || client.list_statuses(&object, &attribute)).await
    }
}

/// Async Apollo operations.
#[async_trait]
pub trait AsyncApolloClient: Send + Sync {
    async fn search_contacts(&self, query: &str, per_page: usize) -> ApiResult<Vec<ApolloContact>>;
    async fn get_contact(&self, id: &str) -> ApiResult<ApolloContact>;
    async fn create_contact(&self, payload: &ContactPayload) -> ApiResult<ApolloContact>;
    async fn update_contact(&self, id: &str, payload: &ContactPayload) -> ApiResult<ApolloContact>;

    async fn search_accounts(&self, name: &str, per_page: usize) -> ApiResult<Vec<ApolloAccount>>;
    async fn get_account(&self, id: &str) -> ApiResult<ApolloAccount>;
    async fn create_account(&self, payload: &AccountPayload) -> ApiResult<ApolloAccount>;
    async fn update_account(&self, id: &str, payload: &AccountPayload) -> ApiResult<ApolloAccount>;

    async fn search_opportunities(
        &self,
        query: &str,
        per_page: usize,
    ) -> ApiResult<Vec<ApolloOpportunity>>;
    async fn get_opportunity(&self, id: &str) -> ApiResult<ApolloOpportunity>;
    async fn create_opportunity(&self, payload: &OpportunityPayload)
        -> ApiResult<ApolloOpportunity>;
    async fn update_opportunity(
        &self,
        id: &str,
        payload: &OpportunityPayload,
    ) -> ApiResult<ApolloOpportunity>;

    async fn contact_stages(&self) -> ApiResult<Vec<Stage>>;
    async fn opportunity_stages(&self) -> ApiResult<Vec<Stage>>;
}

#[derive(Clone)]
pub struct AsyncApolloClientImpl {
    client: Arc<ApolloClient>,
}

impl AsyncApolloClientImpl {
    pub fn new(client: ApolloClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncApolloClient for AsyncApolloClientImpl {
    async fn search_contacts(&self, query: &str, per_page: usize) -> ApiResult<Vec<ApolloContact>> {
        let client = self.client.clone();
        let query = query.to_string();
        run_blocking(move || client.search_contacts(&query, per_page)).await
    }

    async fn get_contact(&self, id: &str) -> ApiResult<ApolloContact> {
        let client = self.client.clone();
        let id = id.to_string();
        run_blocking(move || client.get_contact(&id)).await
    }

    async fn create_contact(&self, payload: &ContactPayload) -> ApiResult<ApolloContact> {
        let client = self.client.clone();
        let payload = payload.clone();
        run_blocking(move || client.create_contact(&payload)).await
    }

    async fn update_contact(&self, id: &str, payload: &ContactPayload) -> ApiResult<ApolloContact> {
        let client = self.client.clone();
        let id = id.to_string();
        let payload = payload.clone();
        run_blocking(move || client.update_contact(&id, &payload)).await
    }

    async fn search_accounts(&self, name: &str, per_page: usize) -> ApiResult<Vec<ApolloAccount>> {
        let client = self.client.clone();
        let name = name.to_string();
        run_blocking(move || client.search_accounts(&name, per_page)).await
    }

    async fn get_account(&self, id: &str) -> ApiResult<ApolloAccount> {
        let client = self.client.clone();
        let id = id.to_string();
        run_blocking(move || client.get_account(&id)).await
    }

    async fn create_account(&self, payload: &AccountPayload) -> ApiResult<ApolloAccount> {
        let client = self.client.clone();
        let payload = payload.clone();
        run_blocking(move || client.create_account(&payload)).await
    }

    async fn update_account(&self, id: &str, payload: &AccountPayload) -> ApiResult<ApolloAccount> {
        let client = self.client.clone();
        let id = id.to_string();
        let payload = payload.clone();
        run_blocking(move || client.update_account(&id, &payload)).await
    }

    async fn search_opportunities(
        &self,
        query: &str,
        per_page: usize,
    ) -> ApiResult<Vec<ApolloOpportunity>> {
        let client = self.client.clone();
        let query = query.to_string();
        run_blocking(move || client.search_opportunities(&query, per_page)).await
    }

    async fn get_opportunity(&self, id: &str) -> ApiResult<ApolloOpportunity> {
        let client = self.client.clone();
        let id = id.to_string();
        run_blocking(move || client.get_opportunity(&id)).await
    }

    async fn create_opportunity(
        &self,
        payload: &OpportunityPayload,
    ) -> ApiResult<ApolloOpportunity> {
        let client = self.client.clone();
        let payload = payload.clone();
        run_blocking(move || client.create_opportunity(&payload)).await
    }

    async fn update_opportunity(
        &self,
        id: &str,
        payload: &OpportunityPayload,
    ) -> ApiResult<ApolloOpportunity> {
        let client = self.client.clone();
        let id = id.to_string();
        let payload = payload.clone();
        run_blocking(move || client.update_opportunity(&id, &payload)).await
    }

    async fn contact_stages(&self) -> ApiResult<Vec<Stage>> {
        let client = self.client.clone();
        run_blocking(move || client.contact_stages()).await
    }

    async fn opportunity_stages(&self) -> ApiResult<Vec<Stage>> {
        let client = self.client.clone();
        run_blocking(move || client.opportunity_stages()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metrics;
    use crate::Config;

    #[tokio::test]
    async fn test_async_clients_share_metrics() {
        let config = Config {
            attio_api_token: "attio_token".to_string(),
            apollo_api_key: "apollo_key".to_string(),
            ..Config::default()
        };
        let metrics = Metrics::new();
        let attio = AsyncAttioClientImpl::new(AttioClient::new(&config, metrics.clone()));
        let apollo = AsyncApolloClientImpl::new(ApolloClient::new(&config, metrics.clone()));

        let _cloned = (attio.clone(), apollo.clone());
        assert_eq!(apollo.client.metrics().http_requests_total(), 0);
    }
}
