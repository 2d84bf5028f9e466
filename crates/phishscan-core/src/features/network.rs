//! Heuristics over registry, DNS and search results.
//!
//! Inputs are `None` when the lookup failed or did not finish in time; the
//! feature then takes its declared fallback.

use chrono::{DateTime, Utc};

use super::signal::{Evaluation, Feature, Signal};
use crate::registry::RegistrationRecord;
use crate::search::IndexStatus;

/// Registration span of at least `min_days` is legitimate.
pub fn domain_registration_length(
    record: Option<&RegistrationRecord>,
    min_days: i64,
) -> Evaluation {
    match record.and_then(RegistrationRecord::registration_days) {
        Some(days) => Evaluation::Computed(Signal::phishing_if(days < min_days)),
        None => Feature::DomainRegistrationLength.fell_back(),
    }
}

/// A registry record that names the domain is legitimate.
pub fn abnormal_url(record: Option<&RegistrationRecord>) -> Evaluation {
    match record {
        Some(r) => Evaluation::Computed(Signal::phishing_if(r.registered_name.is_none())),
        None => Feature::AbnormalUrl.fell_back(),
    }
}

pub fn age_of_domain(
    record: Option<&RegistrationRecord>,
    now: DateTime<Utc>,
    min_days: i64,
) -> Evaluation {
    match record.and_then(|r| r.age_days(now)) {
        Some(days) => Evaluation::Computed(Signal::phishing_if(days < min_days)),
        None => Feature::AgeOfDomain.fell_back(),
    }
}

/// `Some(false)` is an authoritative "does not resolve"; `None` means no answer.
pub fn dns_record(resolved: Option<bool>) -> Evaluation {
    match resolved {
        Some(r) => Evaluation::Computed(Signal::phishing_if(!r)),
        None => Feature::DnsRecord.fell_back(),
    }
}

pub fn google_index(status: Option<IndexStatus>) -> Evaluation {
    match status {
        Some(IndexStatus::Indexed) => Evaluation::Computed(Signal::Legitimate),
        Some(IndexStatus::NotIndexed) => Evaluation::Computed(Signal::Phishing),
        None => Feature::GoogleIndex.fell_back(),
    }
}

/// Slots for third-party providers that are not wired up (traffic rank,
/// page rank, inbound links, phishing-database membership). Always neutral.
pub fn external_stubs() -> Vec<(Feature, Evaluation)> {
    [
        Feature::WebTraffic,
        Feature::PageRank,
        Feature::LinksPointingToPage,
        Feature::StatisticalReport,
    ]
    .into_iter()
    .map(|f| (f, Evaluation::Fallback(Signal::Suspicious)))
    .collect()
}
