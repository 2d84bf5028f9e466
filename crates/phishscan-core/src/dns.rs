//! DNS resolution of the inspected host.

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;
use std::net::IpAddr;
use std::time::Duration;

use crate::error::UpstreamError;

#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Addresses for `host`.
    ///
    /// [`UpstreamError::Resolve`] means the name does not exist (or has no
    /// address records); any other error means the answer is unknown.
    async fn resolve(&self, host: &str, timeout: Duration) -> Result<Vec<IpAddr>, UpstreamError>;
}

/// System-configured resolver (falls back to hickory's default upstreams
/// when `/etc/resolv.conf` cannot be read).
pub struct HickoryResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryResolver {
    pub fn new(timeout: Duration) -> Self {
        let resolver = match hickory_resolver::system_conf::read_system_conf() {
            Ok((config, mut opts)) => {
                opts.timeout = timeout;
                TokioAsyncResolver::tokio(config, opts)
            }
            Err(e) => {
                tracing::warn!("system resolver config unavailable ({}); using defaults", e);
                let mut opts = ResolverOpts::default();
                opts.timeout = timeout;
                TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
            }
        };
        Self { resolver }
    }
}

#[async_trait]
impl DnsResolver for HickoryResolver {
    async fn resolve(&self, host: &str, timeout: Duration) -> Result<Vec<IpAddr>, UpstreamError> {
        let lookup = tokio::time::timeout(timeout, self.resolver.lookup_ip(host))
            .await
            .map_err(|_| UpstreamError::Timeout(timeout))?
            .map_err(|e| classify(host, timeout, e))?;
        let addrs: Vec<IpAddr> = lookup.iter().collect();
        if addrs.is_empty() {
            return Err(UpstreamError::Resolve(format!("no addresses for {}", host)));
        }
        Ok(addrs)
    }
}

fn classify(host: &str, timeout: Duration, e: ResolveError) -> UpstreamError {
    match e.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => {
            UpstreamError::Resolve(format!("{}: {}", host, e))
        }
        ResolveErrorKind::Timeout => UpstreamError::Timeout(timeout),
        _ => UpstreamError::Dns(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ip_literal_resolves_without_network() {
        let r = HickoryResolver::new(Duration::from_secs(1));
        let addrs = r.resolve("127.0.0.1", Duration::from_secs(1)).await.unwrap();
        assert_eq!(addrs, vec!["127.0.0.1".parse::<IpAddr>().unwrap()]);
    }
}
