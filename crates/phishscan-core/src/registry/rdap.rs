//! RDAP (`application/rdap+json`) registry backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::{RegistrationRecord, RegistryLookup};
use crate::error::UpstreamError;
use crate::fetch::HttpClient;

#[derive(Debug, Deserialize)]
struct RdapResponse {
    #[serde(rename = "ldhName")]
    ldh_name: Option<String>,
    #[serde(rename = "unicodeName")]
    unicode_name: Option<String>,
    #[serde(default)]
    events: Vec<RdapEvent>,
}

#[derive(Debug, Deserialize)]
struct RdapEvent {
    #[serde(rename = "eventAction")]
    event_action: String,
    #[serde(rename = "eventDate")]
    event_date: Option<String>,
}

/// Looks domains up at `<base_url>/domain/<name>`.
pub struct RdapRegistry {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl RdapRegistry {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn domain_url(&self, domain: &str) -> String {
        format!("{}/domain/{}", self.base_url.trim_end_matches('/'), domain)
    }
}

#[async_trait]
impl RegistryLookup for RdapRegistry {
    async fn lookup(
        &self,
        domain: &str,
        timeout: Duration,
    ) -> Result<RegistrationRecord, UpstreamError> {
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "application/rdap+json".to_string());

        let resp = self.http.get(&self.domain_url(domain), &headers, timeout).await?;
        if !resp.is_success() {
            return Err(UpstreamError::Http(resp.status));
        }
        parse_rdap(&resp.body)
    }
}

/// Decode an RDAP domain object into a [`RegistrationRecord`].
///
/// Unparseable event dates are treated as absent rather than failing the record.
pub fn parse_rdap(body: &[u8]) -> Result<RegistrationRecord, UpstreamError> {
    let rdap: RdapResponse = serde_json::from_slice(body)?;

    let event_date = |action: &str| -> Option<DateTime<Utc>> {
        rdap.events
            .iter()
            .filter(|e| e.event_action.eq_ignore_ascii_case(action))
            .filter_map(|e| e.event_date.as_deref())
            .find_map(|d| {
                DateTime::parse_from_rfc3339(d)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            })
    };

    let registered_name = rdap
        .ldh_name
        .clone()
        .or_else(|| rdap.unicode_name.clone())
        .filter(|n| !n.trim().is_empty());

    Ok(RegistrationRecord {
        creation: event_date("registration"),
        expiration: event_date("expiration"),
        registered_name,
    })
}
