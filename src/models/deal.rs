//! Deal model: Attio deal attributes and the Apollo opportunity they map to.

use crate::error::{SyncError, SyncResult};
use crate::mapping::extract_number;
use crate::models::AttioRecord;
use serde::{Deserialize, Deserializer, Serialize};

/// Business attributes of an Attio deal, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct DealAttributes {
    pub record_id: String,
    pub name: String,
    pub amount: Option<f64>,
    pub stage: Option<String>,
    pub company_record_id: Option<String>,
    pub apollo_id: Option<String>,
}

impl DealAttributes {
    /// Extract deal attributes. The name is required.
    pub fn from_record(
        record: &AttioRecord,
        stage_attribute: &str,
        apollo_id_attribute: Option<&str>,
    ) -> SyncResult<Self> {
        let record_id = record.record_id().to_string();
        let name = record
            .attribute("name")
            .ok_or_else(|| SyncError::missing("deal", record_id.clone(), "name"))?;

        Ok(Self {
            name,
            amount: record.number("value").or_else(|| record.number("amount")),
            stage: record.attribute(stage_attribute),
            company_record_id: record.reference("associated_company"),
            apollo_id: apollo_id_attribute.and_then(|slug| record.attribute(slug)),
            record_id,
        })
    }
}

/// Apollo sometimes returns amounts as strings.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(extract_number(&raw))
}

/// An opportunity (deal) in Apollo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ApolloOpportunity {
    pub id: String,
    pub name: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Option<f64>,
    pub opportunity_stage_id: Option<String>,
    pub account_id: Option<String>,
}

/// Body for `POST /opportunities` and `PATCH /opportunities/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OpportunityPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_stage_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl OpportunityPayload {
    pub fn from_attributes(
        deal: &DealAttributes,
        opportunity_stage_id: Option<String>,
        account_id: Option<String>,
    ) -> Self {
        Self {
            name: deal.name.clone(),
            amount: deal.amount,
            opportunity_stage_id,
            account_id,
        }
    }
}

/// Apollo `POST /opportunities/search` response.
#[derive(Debug, Deserialize)]
pub struct OpportunitiesResponse {
    #[serde(default)]
    pub opportunities: Vec<ApolloOpportunity>,
}

/// Apollo single-opportunity response: `{"opportunity": {...}}`.
#[derive(Debug, Deserialize)]
pub struct OpportunityEnvelope {
    pub opportunity: ApolloOpportunity,
}
