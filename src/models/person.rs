//! Person model: Attio person attributes and the Apollo contact they map to.

use crate::domain::EmailAddress;
use crate::error::{SyncError, SyncResult};
use crate::mapping::extract_key;
use crate::models::AttioRecord;
use serde::{Deserialize, Serialize};

/// Business attributes of an Attio person, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonAttributes {
    pub record_id: String,
    pub email: EmailAddress,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    /// Attio company record referenced by the person
    pub company_record_id: Option<String>,
    /// Resolved from `company_record_id` by the caller
    pub company_name: Option<String>,
    /// Raw lifecycle stage text, when a stage attribute is configured
    pub stage: Option<String>,
    /// Apollo id stored on the record by an earlier sync
    pub apollo_id: Option<String>,
}

impl PersonAttributes {
    /// Extract person attributes from an Attio record.
    ///
    /// Fails with `SyncError::MissingField` if the person has no usable email,
    /// since email is the natural key used to match Apollo contacts.
    pub fn from_record(
        record: &AttioRecord,
        stage_attribute: Option<&str>,
        apollo_id_attribute: Option<&str>,
    ) -> SyncResult<Self> {
        let record_id = record.record_id().to_string();

        let email = record
            .first_attribute(&["email_addresses", "email"])
            .and_then(|raw| EmailAddress::new(raw).ok())
            .ok_or_else(|| SyncError::missing("person", record_id.clone(), "email"))?;

        let (first_name, last_name) = Self::split_name(record);

        Ok(Self {
            email,
            first_name,
            last_name,
            job_title: record.attribute("job_title"),
            linkedin_url: record.attribute("linkedin"),
            twitter_url: record.attribute("twitter"),
            company_record_id: record.reference("company"),
            company_name: None,
            stage: stage_attribute.and_then(|slug| record.attribute(slug)),
            apollo_id: apollo_id_attribute.and_then(|slug| record.attribute(slug)),
            record_id,
        })
    }

    /// First and last name from a `personal-name` attribute, falling back to
    /// splitting the full name on the first whitespace.
    fn split_name(record: &AttioRecord) -> (Option<String>, Option<String>) {
        let Some(name) = record.raw("name") else {
            return (None, None);
        };

        let first = extract_key(name, "first_name");
        let last = extract_key(name, "last_name");
        if first.is_some() || last.is_some() {
            return (first, last);
        }

        match record.attribute("name") {
            Some(full) => match full.split_once(char::is_whitespace) {
                Some((first, rest)) => (Some(first.to_string()), Some(rest.trim().to_string())),
                None => (Some(full), None),
            },
            None => (None, None),
        }
    }

    /// Display name used in status messages.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.to_string(),
        }
    }
}

/// A contact in Apollo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ApolloContact {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub organization_name: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_url: Option<String>,
    pub contact_stage_id: Option<String>,
    pub account_id: Option<String>,
}

/// Body for `POST /contacts` and `PATCH /contacts/{id}`.
///
/// `None` fields are omitted so an update never blanks a value in Apollo.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_stage_id: Option<String>,
}

impl ContactPayload {
    pub fn from_attributes(person: &PersonAttributes, contact_stage_id: Option<String>) -> Self {
        Self {
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            email: person.email.to_string(),
            title: person.job_title.clone(),
            organization_name: person.company_name.clone(),
            linkedin_url: person.linkedin_url.clone(),
            twitter_url: person.twitter_url.clone(),
            contact_stage_id,
        }
    }
}

/// Apollo `POST /contacts/search` response.
#[derive(Debug, Deserialize)]
pub struct ContactsResponse {
    #[serde(default)]
    pub contacts: Vec<ApolloContact>,
}

/// Apollo single-contact response: `{"contact": {...}}`.
#[derive(Debug, Deserialize)]
pub struct ContactEnvelope {
    pub contact: ApolloContact,
}
