use crate::domain::ObjectKind;
use crate::error::ApiResult;
use crate::models::*;
use async_trait::async_trait;

/// Read and write access to the source CRM (Attio).
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// Fetch one record of the given object.
    async fn get_record(&self, object: ObjectKind, record_id: &str) -> ApiResult<AttioRecord>;

    /// Patch a set of attributes on a record.
    async fn update_attributes(
        &self,
        object: ObjectKind,
        record_id: &str,
        writes: &[(String, AttributeWrite)],
    ) -> ApiResult<AttioRecord>;

    /// Records whose `slug` attribute equals `value`.
    async fn find_by_attribute(
        &self,
        object: ObjectKind,
        slug: &str,
        value: &str,
    ) -> ApiResult<Vec<AttioRecord>>;

    /// Active (non-archived) options of the deal stage attribute.
    async fn deal_stages(&self, stage_attribute: &str) -> ApiResult<Vec<Stage>>;
}

/// Read and write access to the target platform (Apollo).
#[async_trait]
pub trait TargetRepository: Send + Sync {
    async fn search_contacts(&self, email: &str) -> ApiResult<Vec<ApolloContact>>;
    async fn get_contact(&self, id: &str) -> ApiResult<ApolloContact>;
    async fn create_contact(&self, payload: &ContactPayload) -> ApiResult<ApolloContact>;
    async fn update_contact(&self, id: &str, payload: &ContactPayload) -> ApiResult<ApolloContact>;

    async fn search_accounts(&self, name: &str) -> ApiResult<Vec<ApolloAccount>>;
    async fn get_account(&self, id: &str) -> ApiResult<ApolloAccount>;
    async fn create_account(&self, payload: &AccountPayload) -> ApiResult<ApolloAccount>;
    async fn update_account(&self, id: &str, payload: &AccountPayload) -> ApiResult<ApolloAccount>;

    async fn search_opportunities(&self, name: &str) -> ApiResult<Vec<ApolloOpportunity>>;
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
