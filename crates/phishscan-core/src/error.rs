//! Error taxonomy.
//!
//! Only [`ExtractError::InvalidUrl`] ever reaches a caller of the extractor.
//! [`UpstreamError`] is produced by collaborators and absorbed by the
//! aggregator, which substitutes fallback values for the dependent features.

use std::time::Duration;

/// Fatal extraction error.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The raw input has no derivable scheme and host.
    #[error("invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },
}

impl ExtractError {
    pub(crate) fn invalid_url(input: &str, reason: impl Into<String>) -> Self {
        ExtractError::InvalidUrl {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// A shared fetch or lookup could not produce data.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// libcurl reported an error (connect, resolve, TLS, transfer timeout...).
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    /// The service answered with a status we cannot use.
    #[error("HTTP {0}")]
    Http(u32),
    /// Our own deadline elapsed before the call completed.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// The response arrived but could not be decoded.
    #[error("decode: {0}")]
    Decode(String),
    /// The name does not resolve (NXDOMAIN or no address records).
    #[error("resolve: {0}")]
    Resolve(String),
    /// The resolver itself failed (no nameserver reachable, bad answer...).
    #[error("dns: {0}")]
    Dns(String),
    /// The call does not apply to this input (e.g. registry lookup of an IP literal).
    #[error("not applicable: {0}")]
    NotApplicable(&'static str),
    /// A blocking worker panicked or was cancelled.
    #[error("worker: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for UpstreamError {
    fn from(e: tokio::task::JoinError) -> Self {
        UpstreamError::Worker(e.to_string())
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(e: serde_json::Error) -> Self {
        UpstreamError::Decode(e.to_string())
    }
}

impl UpstreamError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Curl(e) if e.is_operation_timedout() => "timeout",
            UpstreamError::Curl(e) if e.is_couldnt_resolve_host() => "resolve",
            UpstreamError::Curl(_) => "connection",
            UpstreamError::Http(_) => "http",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::Resolve(_) => "resolve",
            UpstreamError::Dns(_) => "dns",
            UpstreamError::NotApplicable(_) => "not_applicable",
            UpstreamError::Worker(_) => "worker",
        }
    }
}
