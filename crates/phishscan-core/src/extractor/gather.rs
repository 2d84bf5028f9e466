//! Concurrent upstream collection for one extraction.
//!
//! The page fetch, registry lookup, DNS resolution and search probe start
//! together. Each runs under its own timeout, capped by the extraction
//! deadline; a call that misses its bound is dropped and reads as `None`.

use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;
use tokio::time::Instant;

use super::Collaborators;
use crate::config::ScanConfig;
use crate::error::UpstreamError;
use crate::page::PageSnapshot;
use crate::registry::RegistrationRecord;
use crate::search::{self, IndexStatus};
use crate::url_model::{registrable_domain, UrlContext};

/// Everything the network and content evaluators read. Published once.
#[derive(Debug, Default)]
pub(crate) struct Upstream {
    pub page: Option<PageSnapshot>,
    pub registration: Option<RegistrationRecord>,
    /// `Some(false)`: the resolver answered that the host does not exist.
    pub resolved: Option<bool>,
    pub index: Option<IndexStatus>,
}

pub(crate) async fn gather(url: &UrlContext, cfg: &ScanConfig, c: &Collaborators) -> Upstream {
    let t = &cfg.timeouts;
    let deadline = after(t.overall());

    let page = bounded("page_fetch", deadline, t.page_fetch(), |limit| {
        fetch_page(c, &url.original, limit)
    });
    let registration = bounded("registry", deadline, t.registry(), |limit| {
        lookup_registration(c, &url.host, limit)
    });
    let resolved = bounded("dns", deadline, t.dns(), |limit| resolve(c, &url.host, limit));
    let index = bounded("search", deadline, t.search(), |limit| {
        search::probe_index(c.http.as_ref(), &cfg.endpoints, &url.host, limit)
    });

    let (page, registration, resolved, index) = tokio::join!(page, registration, resolved, index);
    Upstream {
        page,
        registration,
        resolved,
        index,
    }
}

/// Runs the call built by `make` with `min(per_call, time left)` as both its
/// own timeout and our hard bound.
async fn bounded<T, F, Fut>(
    what: &'static str,
    deadline: Instant,
    per_call: Duration,
    make: F,
) -> Option<T>
where
    F: FnOnce(Duration) -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    let until = deadline.min(after(per_call));
    let limit = until.saturating_duration_since(Instant::now());
    if limit.is_zero() {
        tracing::debug!(what, "no time left; skipping");
        return None;
    }
    match tokio::time::timeout_at(until, make(limit)).await {
        Ok(Ok(v)) => {
            tracing::debug!(what, "upstream ok");
            Some(v)
        }
        Ok(Err(e)) => {
            tracing::warn!(what, kind = e.kind(), "upstream unavailable: {}", e);
            None
        }
        Err(_) => {
            tracing::warn!(what, kind = "timeout", "upstream unavailable: timed out after {:?}", limit);
            None
        }
    }
}

/// `now + d`, saturating at a far-future instant instead of overflowing.
fn after(d: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(d)
        .unwrap_or_else(|| now + crate::config::MAX_TIMEOUT)
}

async fn fetch_page(
    c: &Collaborators,
    url: &str,
    limit: Duration,
) -> Result<PageSnapshot, UpstreamError> {
    let resp = c.http.get(url, &Default::default(), limit).await?;
    tracing::debug!(
        status = resp.status,
        redirects = resp.redirect_count,
        bytes = resp.body.len(),
        "page fetched"
    );
    // html5ever parsing is CPU-bound; keep it off the async workers.
    let snapshot = tokio::task::spawn_blocking(move || PageSnapshot::from_response(&resp)).await?;
    Ok(snapshot)
}

async fn lookup_registration(
    c: &Collaborators,
    host: &str,
    limit: Duration,
) -> Result<RegistrationRecord, UpstreamError> {
    if host.parse::<IpAddr>().is_ok() {
        return Err(UpstreamError::NotApplicable("IP literal has no registry record"));
    }
    let domain = registrable_domain(host);
    c.registry.lookup(&domain, limit).await
}

async fn resolve(c: &Collaborators, host: &str, limit: Duration) -> Result<bool, UpstreamError> {
    match c.dns.resolve(host, limit).await {
        Ok(_) => Ok(true),
        Err(UpstreamError::Resolve(reason)) => {
            tracing::debug!(host, "host does not resolve: {}", reason);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
