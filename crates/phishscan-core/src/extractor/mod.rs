//! Aggregator: runs all 30 heuristics for one URL.
//!
//! Parsing is the only step that can fail. After that the shared upstream
//! data is gathered once (see [`gather`]), every evaluator runs against it,
//! and the results are assembled into a complete [`FeatureVector`].

mod gather;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ScanConfig;
use crate::dns::{DnsResolver, HickoryResolver};
use crate::error::ExtractError;
use crate::features::{content, lexical, network, Evaluation, Feature, FeatureVector};
use crate::fetch::{CurlClient, HttpClient};
use crate::page::PageSummary;
use crate::registry::{RdapRegistry, RegistryLookup};
use crate::url_model::UrlContext;

/// External services an extraction talks to.
#[derive(Clone)]
pub struct Collaborators {
    /// Page fetch and search probe.
    pub http: Arc<dyn HttpClient>,
    pub registry: Arc<dyn RegistryLookup>,
    pub dns: Arc<dyn DnsResolver>,
}

impl Collaborators {
    /// libcurl for HTTP, RDAP over that client, the system DNS resolver.
    pub fn live(cfg: &ScanConfig) -> Self {
        let http: Arc<dyn HttpClient> = Arc::new(CurlClient::from_config(cfg));
        let registry = Arc::new(RdapRegistry::new(
            Arc::clone(&http),
            cfg.endpoints.rdap_base_url.clone(),
        ));
        Self {
            http,
            registry,
            dns: Arc::new(HickoryResolver::new(cfg.timeouts.dns())),
        }
    }
}

/// Outcome of one successful extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub url: String,
    pub features: FeatureVector,
    /// Names of features that carry a fallback instead of computed data.
    pub fallbacks: Vec<&'static str>,
    /// Absent when the page could not be fetched in time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageSummary>,
    pub elapsed_ms: u64,
}

/// Holds the immutable configuration and the collaborators. Cheap to share;
/// extractions never mutate it, so calls may run in parallel.
#[derive(Clone)]
pub struct Extractor {
    config: Arc<ScanConfig>,
    collaborators: Collaborators,
    fixed_now: Option<DateTime<Utc>>,
}

impl Extractor {
    pub fn new(config: Arc<ScanConfig>, collaborators: Collaborators) -> Self {
        Self {
            config,
            collaborators,
            fixed_now: None,
        }
    }

    /// Extractor with live network collaborators.
    pub fn live(config: Arc<ScanConfig>) -> Self {
        let collaborators = Collaborators::live(&config);
        Self::new(config, collaborators)
    }

    /// Pin "now" for the domain-age heuristic.
    pub fn with_fixed_now(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    /// Computes the full vector for `raw`. Fails only when `raw` is not a URL.
    pub async fn extract(&self, raw: &str) -> Result<ExtractionReport, ExtractError> {
        let started = Instant::now();
        let url = UrlContext::parse(raw)?;
        let cfg = self.config.as_ref();
        tracing::debug!(url = %url.original, host = %url.host, "extraction started");

        let upstream = gather::gather(&url, cfg, &self.collaborators).await;
        let now = self.fixed_now.unwrap_or_else(Utc::now);
        let th = &cfg.thresholds;
        let record = upstream.registration.as_ref();

        let mut evaluations: Vec<(Feature, Evaluation)> = lexical::evaluate(&url, cfg);
        evaluations.extend([
            (
                Feature::DomainRegistrationLength,
                network::domain_registration_length(record, th.min_registration_days),
            ),
            (Feature::AbnormalUrl, network::abnormal_url(record)),
            (
                Feature::AgeOfDomain,
                network::age_of_domain(record, now, th.min_domain_age_days),
            ),
            (Feature::DnsRecord, network::dns_record(upstream.resolved)),
            (Feature::GoogleIndex, network::google_index(upstream.index)),
        ]);
        evaluations.extend(content::evaluate(upstream.page.as_ref(), &url.host, th));
        evaluations.extend(network::external_stubs());

        let features = FeatureVector::from_evaluations(evaluations);
        let fallbacks = features.fallbacks().into_iter().map(Feature::name).collect();
        let elapsed_ms = duration_ms(started.elapsed());

        tracing::info!(
            url = %url.original,
            page = upstream.page.is_some(),
            registry = upstream.registration.is_some(),
            elapsed_ms,
            "extraction complete"
        );

        Ok(ExtractionReport {
            url: url.original,
            features,
            fallbacks,
            page: upstream.page.as_ref().map(|p| p.summary()),
            elapsed_ms,
        })
    }

    /// Extracts several URLs with at most `config.batch_parallelism` in flight.
    /// Results keep input order.
    pub async fn extract_many(
        &self,
        urls: &[String],
    ) -> Vec<(String, Result<ExtractionReport, ExtractError>)> {
        let parallelism = self.config.batch_parallelism.max(1);
        stream::iter(urls.iter().cloned())
            .map(|u| async move {
                let r = self.extract(&u).await;
                (u, r)
            })
            .buffered(parallelism)
            .collect()
            .await
    }
}

fn duration_ms(d: Duration) -> u64 {
    d.as_millis().min(u128::from(u64::MAX)) as u64
}
