use async_trait::async_trait;
use attio_apollo_sync::domain::ObjectKind;
use attio_apollo_sync::error::{ApiError, ApiResult};
use attio_apollo_sync::models::{AttioRecord, AttributeWrite, Stage};
use attio_apollo_sync::repositories::SourceRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock Attio repository.
///
/// Holds records per object, applies attribute writes in memory and tracks
/// method calls for verification.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockSourceRepository {
    records: Arc<Mutex<HashMap<(ObjectKind, String), AttioRecord>>>,
    deal_stages: Arc<Mutex<Vec<Stage>>>,
    writes: Arc<Mutex<Vec<(ObjectKind, String, Vec<(String, AttributeWrite)>)>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockSourceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&self, object: ObjectKind, record: AttioRecord) {
        let mut records = self.records.lock().unwrap();
        records.insert((object, record.record_id().to_string()), record);
    }

    pub fn set_deal_stages(&self, stages: Vec<Stage>) {
        *self.deal_stages.lock().unwrap() = stages;
    }

    /// Attribute writes applied so far, in order.
    pub fn writes(&self) -> Vec<(ObjectKind, String, Vec<(String, AttributeWrite)>)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl SourceRepository for MockSourceRepository {
    async fn get_record(&self, object: ObjectKind, record_id: &str) -> ApiResult<AttioRecord> {
        self.track_call("get_record");

        let records = self.records.lock().unwrap();
        records
            .get(&(object, record_id.to_string()))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", object, record_id)))
    }

    async fn update_attributes(
        &self,
        object: ObjectKind,
        record_id: &str,
        writes: &[(String, AttributeWrite)],
    ) -> ApiResult<AttioRecord> {
        self.track_call("update_attributes");

        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(&(object, record_id.to_string()))
            .ok_or_else(|| ApiError::NotFound(format!("{} {} not found", object, record_id)))?;
        for (slug, write) in writes {
            record.values.insert(slug.clone(), write.to_value());
        }
        self.writes
            .lock()
            .unwrap()
            .push((object, record_id.to_string(), writes.to_vec()));
        Ok(record.clone())
    }

    async fn find_by_attribute(
        &self,
        object: ObjectKind,
        slug: &str,
        value: &str,
    ) -> ApiResult<Vec<AttioRecord>> {
        self.track_call("find_by_attribute");

        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|((kind, _), record)| {
                *kind == object && record.attribute(slug).as_deref() == Some(value)
            })
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn deal_stages(&self, _stage_attribute: &str) -> ApiResult<Vec<Stage>> {
        self.track_call("deal_stages");
        Ok(self.deal_stages.lock().unwrap().clone())
    }
}
