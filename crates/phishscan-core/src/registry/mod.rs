//! Domain registry lookups.
//!
//! One lookup per extraction feeds three heuristics (registration length,
//! domain age, abnormal URL). The default backend queries RDAP, the JSON
//! successor of WHOIS.

mod rdap;

pub use rdap::{parse_rdap, RdapRegistry};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::error::UpstreamError;

/// Registry metadata for one domain. Scoped to a single extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub creation: Option<DateTime<Utc>>,
    pub expiration: Option<DateTime<Utc>>,
    /// Name the registry returned for the domain, if any.
    pub registered_name: Option<String>,
}

impl RegistrationRecord {
    /// Whole days between creation and expiration.
    pub fn registration_days(&self) -> Option<i64> {
        Some((self.expiration? - self.creation?).num_days())
    }

    /// Whole days from creation to `now`.
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<i64> {
        Some((now - self.creation?).num_days())
    }
}

#[async_trait]
pub trait RegistryLookup: Send + Sync {
    async fn lookup(
        &self,
        domain: &str,
        timeout: Duration,
    ) -> Result<RegistrationRecord, UpstreamError>;
}
