use async_trait::async_trait;
use attio_apollo_sync::error::{ApiError, ApiResult};
use attio_apollo_sync::models::*;
use attio_apollo_sync::repositories::TargetRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock Apollo repository.
///
/// Search is a case-insensitive substring filter, like Apollo's fuzzy
/// keyword search, so callers still have to pick the exact match.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockTargetRepository {
    contacts: Arc<Mutex<Vec<ApolloContact>>>,
    accounts: Arc<Mutex<Vec<ApolloAccount>>>,
    opportunities: Arc<Mutex<Vec<ApolloOpportunity>>>,
    contact_stages: Arc<Mutex<Vec<Stage>>>,
    opportunity_stages: Arc<Mutex<Vec<Stage>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    next_id: Arc<Mutex<usize>>,
}

fn contains(field: &Option<String>, query: &str) -> bool {
    field
        .as_deref()
        .map(|value| value.to_lowercase().contains(&query.trim().to_lowercase()))
        .unwrap_or(false)
}

#[allow(dead_code)]
impl MockTargetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_contact(&self, contact: ApolloContact) {
        self.contacts.lock().unwrap().push(contact);
    }

    pub fn add_account(&self, account: ApolloAccount) {
        self.accounts.lock().unwrap().push(account);
    }

    pub fn add_opportunity(&self, opportunity: ApolloOpportunity) {
        self.opportunities.lock().unwrap().push(opportunity);
    }

    pub fn set_contact_stages(&self, stages: Vec<Stage>) {
        *self.contact_stages.lock().unwrap() = stages;
    }

    pub fn set_opportunity_stages(&self, stages: Vec<Stage>) {
        *self.opportunity_stages.lock().unwrap() = stages;
    }

    pub fn contacts(&self) -> Vec<ApolloContact> {
        self.contacts.lock().unwrap().clone()
    }

    pub fn accounts(&self) -> Vec<ApolloAccount> {
        self.accounts.lock().unwrap().clone()
    }

    pub fn opportunities(&self) -> Vec<ApolloOpportunity> {
        self.opportunities.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total number of calls of any kind.
    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn new_id(&self, prefix: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("{}-{}", prefix, *next)
    }

    fn not_found(kind: &str, id: &str) -> ApiError {
        ApiError::NotFound(format!("{} {} not found", kind, id))
    }
}

#[async_trait]
impl TargetRepository for MockTargetRepository {
    async fn search_contacts(&self, email: &str) -> ApiResult<Vec<ApolloContact>> {
        self.track_call("search_contacts");
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .iter()
            .filter(|c| contains(&c.email, email))
            .cloned()
            .collect())
    }

    async fn get_contact(&self, id: &str) -> ApiResult<ApolloContact> {
        self.track_call("get_contact");
        let contacts = self.contacts.lock().unwrap();
        contacts
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("contact", id))
    }

    async fn create_contact(&self, payload: &ContactPayload) -> ApiResult<ApolloContact> {
        self.track_call("create_contact");
        let contact = ApolloContact {
            id: self.new_id("contact"),
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email: Some(payload.email.clone()),
            title: payload.title.clone(),
            organization_name: payload.organization_name.clone(),
            linkedin_url: payload.linkedin_url.clone(),
            twitter_url: payload.twitter_url.clone(),
            contact_stage_id: payload.contact_stage_id.clone(),
            ..Default::default()
        };
        self.contacts.lock().unwrap().push(contact.clone());
        Ok(contact)
    }

    async fn update_contact(&self, id: &str, payload: &ContactPayload) -> ApiResult<ApolloContact> {
        self.track_call("update_contact");
        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::not_found("contact", id))?;
        contact.email = Some(payload.email.clone());
        if payload.first_name.is_some() {
            contact.first_name = payload.first_name.clone();
        }
        if payload.last_name.is_some() {
            contact.last_name = payload.last_name.clone();
        }
        if payload.title.is_some() {
            contact.title = payload.title.clone();
        }
        if payload.organization_name.is_some() {
            contact.organization_name = payload.organization_name.clone();
        }
        if payload.contact_stage_id.is_some() {
            contact.contact_stage_id = payload.contact_stage_id.clone();
        }
        Ok(contact.clone())
    }

    async fn search_accounts(&self, name: &str) -> ApiResult<Vec<ApolloAccount>> {
        self.track_call("search_accounts");
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .filter(|a| contains(&a.name, name))
            .cloned()
            .collect())
    }

    async fn get_account(&self, id: &str) -> ApiResult<ApolloAccount> {
        self.track_call("get_account");
        let accounts = self.accounts.lock().unwrap();
        accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("account", id))
    }

    async fn create_account(&self, payload: &AccountPayload) -> ApiResult<ApolloAccount> {
        self.track_call("create_account");
        let account = ApolloAccount {
            id: self.new_id("account"),
            name: Some(payload.name.clone()),
            domain: payload.domain.clone(),
            linkedin_url: payload.linkedin_url.clone(),
            ..Default::default()
        };
        self.accounts.lock().unwrap().push(account.clone());
        Ok(account)
    }

    async fn update_account(&self, id: &str, payload: &AccountPayload) -> ApiResult<ApolloAccount> {
        self.track_call("update_account");
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Self::not_found("account", id))?;
        account.name = Some(payload.name.clone());
        if payload.domain.is_some() {
            account.domain = payload.domain.clone();
        }
        Ok(account.clone())
    }

    async fn search_opportunities(&self, name: &str) -> ApiResult<Vec<ApolloOpportunity>> {
        self.track_call("search_opportunities");
        let opportunities = self.opportunities.lock().unwrap();
        Ok(opportunities
            .iter()
            .filter(|o| contains(&o.name, name))
            .cloned()
            .collect())
    }

    async fn get_opportunity(&self, id: &str) -> ApiResult<ApolloOpportunity> {
        self.track_call("get_opportunity");
        let opportunities = self.opportunities.lock().unwrap();
        opportunities
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found("opportunity", id))
    }

    async fn create_opportunity(
        &self,
        payload: &OpportunityPayload,
    ) -> ApiResult<ApolloOpportunity> {
        self.track_call("create_opportunity");
        let opportunity = ApolloOpportunity {
            id: self.new_id("opportunity"),
            name: Some(payload.name.clone()),
            amount: payload.amount,
            opportunity_stage_id: payload.opportunity_stage_id.clone(),
            account_id: payload.account_id.clone(),
        };
        self.opportunities.lock().unwrap().push(opportunity.clone());
        Ok(opportunity)
    }

    async fn update_opportunity(
        &self,
        id: &str,
        payload: &OpportunityPayload,
    ) -> ApiResult<ApolloOpportunity> {
        self.track_call("update_opportunity");
        let mut opportunities = self.opportunities.lock().unwrap();
        let opportunity = opportunities
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| Self::not_found("opportunity", id))?;
        opportunity.name = Some(payload.name.clone());
        if payload.amount.is_some() {
            opportunity.amount = payload.amount;
        }
        if payload.opportunity_stage_id.is_some() {
            opportunity.opportunity_stage_id = payload.opportunity_stage_id.clone();
        }
        if payload.account_id.is_some() {
            opportunity.account_id = payload.account_id.clone();
        }
        Ok(opportunity.clone())
    }

    async fn contact_stages(&self) -> ApiResult<Vec<Stage>> {
        self.track_call("contact_stages");
        Ok(self.contact_stages.lock().unwrap().clone())
    }

    async fn opportunity_stages(&self) -> ApiResult<Vec<Stage>> {
        self.track_call("opportunity_stages");
        Ok(self.opportunity_stages.lock().unwrap().clone())
    }
}
