//! Deterministic stand-ins for the network collaborators.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use phishscan_core::dns::DnsResolver;
use phishscan_core::fetch::{HttpClient, HttpResponse};
use phishscan_core::registry::{RegistrationRecord, RegistryLookup};
use phishscan_core::UpstreamError;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

/// Registry answering every domain with the same record; remembers what was asked.
pub struct FixedRegistry {
    record: Option<RegistrationRecord>,
    queried: std::sync::Mutex<Vec<String>>,
}

impl FixedRegistry {
    /// Domain registered in 2010, valid for ten years past `fixed_now`.
    pub fn established() -> Self {
        Self::answering(Some(RegistrationRecord {
            creation: Some(Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap()),
            expiration: Some(Utc.with_ymd_and_hms(2034, 1, 1, 0, 0, 0).unwrap()),
            registered_name: Some("example.com".to_string()),
        }))
    }

    pub fn unavailable() -> Self {
        Self::answering(None)
    }

    fn answering(record: Option<RegistrationRecord>) -> Self {
        Self {
            record,
            queried: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryLookup for FixedRegistry {
    async fn lookup(
        &self,
        domain: &str,
        _timeout: Duration,
    ) -> Result<RegistrationRecord, UpstreamError> {
        self.queried.lock().unwrap().push(domain.to_string());
        self.record.clone().ok_or(UpstreamError::Http(404))
    }
}

/// Resolver that either resolves everything to 127.0.0.1 or nothing.
pub struct FixedDns(pub bool);

#[async_trait]
impl DnsResolver for FixedDns {
    async fn resolve(&self, host: &str, _timeout: Duration) -> Result<Vec<IpAddr>, UpstreamError> {
        if self.0 {
            Ok(vec!["127.0.0.1".parse().unwrap()])
        } else {
            Err(UpstreamError::Resolve(format!("NXDOMAIN {}", host)))
        }
    }
}

/// HTTP client whose requests never complete; counts calls.
#[derive(Default)]
pub struct StallingHttp {
    pub calls: AtomicUsize,
}

#[async_trait]
impl HttpClient for StallingHttp {
    async fn get(
        &self,
        _url: &str,
        _headers: &HashMap<String, String>,
        _timeout: Duration,
    ) -> Result<HttpResponse, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending::<()>().await;
        unreachable!()
    }
}

/// HTTP client serving canned bodies by exact URL; other URLs fail.
/// Counts requests per URL.
#[derive(Default)]
pub struct CannedHttp {
    pages: HashMap<String, HttpResponse>,
    pub hits: std::sync::Mutex<HashMap<String, usize>>,
}

impl CannedHttp {
    pub fn with_page(mut self, url: &str, redirects: u32, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            HttpResponse {
                status: 200,
                redirect_count: redirects,
                final_url: None,
                content_type: Some("text/html".to_string()),
                body: body.as_bytes().to_vec(),
                truncated: false,
            },
        );
        self
    }

    pub fn hits_for(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl HttpClient for CannedHttp {
    async fn get(
        &self,
        url: &str,
        _headers: &HashMap<String, String>,
        _timeout: Duration,
    ) -> Result<HttpResponse, UpstreamError> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| UpstreamError::Resolve(format!("no canned page for {}", url)))
    }
}

pub fn arc<T>(v: T) -> Arc<T> {
    Arc::new(v)
}
