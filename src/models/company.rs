//! Company model: Attio company attributes and the Apollo account they map to.

use crate::error::{SyncError, SyncResult};
use crate::models::AttioRecord;
use serde::{Deserialize, Serialize};

/// Business attributes of an Attio company, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyAttributes {
    pub record_id: String,
    pub name: String,
    pub domain: Option<String>,
    pub linkedin_url: Option<String>,
    pub apollo_id: Option<String>,
}

impl CompanyAttributes {
    /// Extract company attributes. The name is required.
    pub fn from_record(record: &AttioRecord, apollo_id_attribute: Option<&str>) -> SyncResult<Self> {
        let record_id = record.record_id().to_string();
        let name = record
            .attribute("name")
            .ok_or_else(|| SyncError::missing("company", record_id.clone(), "name"))?;

        Ok(Self {
            name,
            domain: record.first_attribute(&["domains", "domain", "website"]),
            linkedin_url: record.attribute("linkedin"),
            apollo_id: apollo_id_attribute.and_then(|slug| record.attribute(slug)),
            record_id,
        })
    }
}

/// An account in Apollo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ApolloAccount {
    pub id: String,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub website_url: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Body for `POST /accounts` and `PATCH /accounts/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

impl From<&CompanyAttributes> for AccountPayload {
    fn from(company: &CompanyAttributes) -> Self {
        Self {
            name: company.name.clone(),
            domain: company.domain.clone(),
            linkedin_url: company.linkedin_url.clone(),
        }
    }
}

/// Apollo `POST /accounts/search` response.
#[derive(Debug, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<ApolloAccount>,
}

/// Apollo single-account response: `{"account": {...}}`.
#[derive(Debug, Deserialize)]
pub struct AccountEnvelope {
    pub account: ApolloAccount,
}
