use crate::client::AsyncAttioClient;
use crate::domain::ObjectKind;
use crate::error::ApiResult;
use crate::models::{AttioRecord, AttributeWrite, RecordQuery, Stage, UpdateRecordRequest};
use crate::repositories::traits::SourceRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Source repository backed by the Attio API client.
pub struct AttioRepository {
    client: Arc<dyn AsyncAttioClient>,
    page_size: usize,
}

impl AttioRepository {
    /// `page_size` bounds attribute queries.
    pub fn new(client: Arc<dyn AsyncAttioClient>, page_size: usize) -> Self {
        Self { client, page_size }
    }
}

#[async_trait]
impl SourceRepository for AttioRepository {
    async fn get_record(&self, object: ObjectKind, record_id: &str) -> ApiResult<AttioRecord> {
        self.client.get_record(object.attio_slug(), record_id).await
    }

    async fn update_attributes(
        &self,
        object: ObjectKind,
        record_id: &str,
        writes: &[(String, AttributeWrite)],
    ) -> ApiResult<AttioRecord> {
        let request = UpdateRecordRequest::new(writes);
        self.client
            .update_record(object.attio_slug(), record_id, &request)
            .await
    }

    async fn find_by_attribute(
        &self,
        object: ObjectKind,
        slug: &str,
        value: &str,
    ) -> ApiResult<Vec<AttioRecord>> {
        let query = RecordQuery::equals(slug, value, self.page_size);
        self.client.query_records(object.attio_slug(), &query).await
    }

    async fn deal_stages(&self, stage_attribute: &str) -> ApiResult<Vec<Stage>> {
        let statuses = self
            .client
            .list_statuses(ObjectKind::Deals.attio_slug(), stage_attribute)
            .await?;
        Ok(statuses
            .into_iter()
            .filter(|status| !status.is_archived)
            .map(Stage::from)
            .collect())
    }
}
