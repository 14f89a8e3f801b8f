//! Attio record model and write payloads.
//!
//! Attio attribute values are kept as untyped JSON; accessors on
//! [`AttioRecord`] run them through [`crate::mapping`] on demand.

use crate::mapping::{extract_attribute, extract_first, extract_number, extract_record_reference};
use crate::models::Stage;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Response envelope used by every Attio endpoint: `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Composite identifier of an Attio record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AttioRecordId {
    pub workspace_id: String,
    pub object_id: String,
    pub record_id: String,
}

/// A record from any Attio object (people, companies, deals).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AttioRecord {
    pub id: AttioRecordId,

    /// Link to the record in the Attio web app
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Attribute slug -> array of typed value objects
    pub values: Map<String, Value>,
}

impl AttioRecord {
    /// Build a record from an id and a values object (tests and fixtures).
    pub fn new(record_id: impl Into<String>, values: Value) -> Self {
        Self {
            id: AttioRecordId {
                record_id: record_id.into(),
                ..Default::default()
            },
            values: match values {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            ..Default::default()
        }
    }

    pub fn record_id(&self) -> &str {
        &self.id.record_id
    }

    /// Raw value of an attribute.
    pub fn raw(&self, slug: &str) -> Option<&Value> {
        self.values.get(slug)
    }

    /// Flattened string value of an attribute.
    pub fn attribute(&self, slug: &str) -> Option<String> {
        extract_attribute(&self.values, slug)
    }

    /// First attribute among `slugs` that has a value.
    pub fn first_attribute(&self, slugs: &[&str]) -> Option<String> {
        extract_first(&self.values, slugs)
    }

    /// Numeric value of an attribute.
    pub fn number(&self, slug: &str) -> Option<f64> {
        self.values.get(slug).and_then(extract_number)
    }

    /// Target record id of a record-reference attribute.
    pub fn reference(&self, slug: &str) -> Option<String> {
        self.values.get(slug).and_then(extract_record_reference)
    }
}

/// Identifier of a status option on an Attio status attribute.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AttioStatusId {
    pub status_id: String,
}

/// A status option, e.g. one stage of the deals pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AttioStatus {
    pub id: AttioStatusId,
    pub title: String,
    #[serde(default)]
    pub is_archived: bool,
}

impl From<AttioStatus> for Stage {
    fn from(status: AttioStatus) -> Self {
        Stage::new(status.id.status_id, status.title)
    }
}

/// A single attribute write.
///
/// Attio expects every attribute value as an array of value objects, and
/// the object key depends on the attribute type.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeWrite {
    Text(String),
    Status(String),
    Select(String),
}

impl AttributeWrite {
    pub fn to_value(&self) -> Value {
        match self {
            AttributeWrite::Text(v) => json!([{ "value": v }]),
            AttributeWrite::Status(v) => json!([{ "status": v }]),
            AttributeWrite::Select(v) => json!([{ "option": v }]),
        }
    }
}

/// Request payload for `PATCH /objects/{object}/records/{id}`.
/// Shape: `{"data": {"values": {slug: [...]}}}`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRecordRequest {
    data: UpdateRecordData,
}

#[derive(Debug, Clone, Serialize)]
struct UpdateRecordData {
    values: Map<String, Value>,
}

impl UpdateRecordRequest {
    pub fn new(writes: &[(String, AttributeWrite)]) -> Self {
        let values = writes
            .iter()
            .map(|(slug, write)| (slug.clone(), write.to_value()))
            .collect();
        Self {
            data: UpdateRecordData { values },
        }
    }
}

/// Request payload for `POST /objects/{object}/records/query`.
#[derive(Debug, Clone, Serialize)]
pub struct RecordQuery {
    filter: Value,
    limit: usize,
}

impl RecordQuery {
    /// Records whose `slug` attribute equals `value`.
    pub fn equals(slug: &str, value: &str, limit: usize) -> Self {
        let mut filter = Map::new();
        filter.insert(slug.to_string(), Value::String(value.to_string()));
        Self {
            filter: Value::Object(filter),
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialization() {
        let body = r#"{
            "data": {
                "id": { "workspace_id": "w", "object_id": "o", "record_id": "r-1" },
                "web_url": "https://app.attio.com/acme/person/r-1",
                "values": {
                    "job_title": [{ "value": "CTO", "attribute_type": "text" }],
                    "company": [{ "target_object": "companies", "target_record_id": "c-9" }]
                }
            }
        }"#;
        let envelope: DataEnvelope<AttioRecord> = serde_json::from_str(body).unwrap();
        let record = envelope.data;

        assert_eq!(record.record_id(), "r-1");
        assert_eq!(record.attribute("job_title").as_deref(), Some("CTO"));
        assert_eq!(record.reference("company").as_deref(), Some("c-9"));
        assert_eq!(record.attribute("missing"), None);
    }

    #[test]
    fn test_update_request_encoding() {
        let request = UpdateRecordRequest::new(&[
            ("apollo_id".to_string(), AttributeWrite::Text("abc".to_string())),
            ("stage".to_string(), AttributeWrite::Status("Won 🎉".to_string())),
        ]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "data": {
                    "values": {
                        "apollo_id": [{ "value": "abc" }],
                        "stage": [{ "status": "Won 🎉" }]
                    }
                }
            })
        );
    }

    #[test]
    fn test_record_query() {
        let value = serde_json::to_value(RecordQuery::equals("apollo_id", "opp-1", 5)).unwrap();
        assert_eq!(value, json!({ "filter": { "apollo_id": "opp-1" }, "limit": 5 }));
    }

    #[test]
    fn test_status_into_stage() {
        let status: AttioStatus = serde_json::from_value(json!({
            "id": { "workspace_id": "w", "attribute_id": "a", "status_id": "s-1" },
            "title": "In Progress",
            "is_archived": false
        }))
        .unwrap();
        let stage: Stage = status.into();
        assert_eq!(stage.id, "s-1");
        assert_eq!(stage.name, "In Progress");
    }
}
