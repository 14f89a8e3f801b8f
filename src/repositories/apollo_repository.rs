use crate::client::AsyncApolloClient;
use crate::error::ApiResult;
use crate::models::*;
use crate::repositories::traits::TargetRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Target repository backed by the Apollo API client.
///
/// Searches fetch only the first page of `page_size` results; callers pick
/// the exact natural-key match out of it.
pub struct ApolloRepository {
    client: Arc<dyn AsyncApolloClient>,
    page_size: usize,
}

impl ApolloRepository {
    pub fn new(client: Arc<dyn AsyncApolloClient>, page_size: usize) -> Self {
        Self { client, page_size }
    }
}

#[async_trait]
impl TargetRepository for ApolloRepository {
    async fn search_contacts(&self, email: &str) -> ApiResult<Vec<ApolloContact>> {
        self.client.search_contacts(email, self.page_size).await
    }

    async fn get_contact(&self, id: &str) -> ApiResult<ApolloContact> {
        self.client.get_contact(id).await
    }

    async fn create_contact(&self, payload: &ContactPayload) -> ApiResult<ApolloContact> {
        self.client.create_contact(payload).await
    }

    async fn update_contact(&self, id: &str, payload: &ContactPayload) -> ApiResult<ApolloContact> {
        self.client.update_contact(id, payload).await
    }

    async fn search_accounts(&self, name: &str) -> ApiResult<Vec<ApolloAccount>> {
        self.client.search_accounts(name, self.page_size).await
    }

    async fn get_account(&self, id: &str) -> ApiResult<ApolloAccount> {
        self.client.get_account(id).await
    }

    async fn create_account(&self, payload: &AccountPayload) -> ApiResult<ApolloAccount> {
        self.client.create_account(payload).await
    }

    async fn update_account(&self, id: &str, payload: &AccountPayload) -> ApiResult<ApolloAccount> {
        self.client.update_account(id, payload).await
    }

    async fn search_opportunities(&self, name: &str) -> ApiResult<Vec<ApolloOpportunity>> {
        self.client.search_opportunities(name, self.page_size).await
    }

    async fn get_opportunity(&self, id: &str) -> ApiResult<ApolloOpportunity> {
        self.client.get_opportunity(id).await
    }

    async fn create_opportunity(
        &self,
        payload: &OpportunityPayload,
    ) -> ApiResult<ApolloOpportunity> {
        self.client.create_opportunity(payload).await
    }

    async fn update_opportunity(
        &self,
        id: &str,
        payload: &OpportunityPayload,
    ) -> ApiResult<ApolloOpportunity> {
        self.client.update_opportunity(id, payload).await
    }

    async fn contact_stages(&self) -> ApiResult<Vec<Stage>> {
        self.client.contact_stages().await
    }

    async fn opportunity_stages(&self) -> ApiResult<Vec<Stage>> {
        self.client.opportunity_stages().await
    }
}
