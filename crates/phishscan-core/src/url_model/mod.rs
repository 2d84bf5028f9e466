//! URL modeling.
//!
//! Normalizes a raw input string into an immutable [`UrlContext`] (scheme,
//! host, explicit port, original text). Parsing is the only
//! fatal step of an extraction; everything downstream reads the context.

mod host;

pub use host::{is_absolute_http, is_off_host, registrable_domain};

use crate::error::ExtractError;

/// Parsed view of the URL under inspection. Built once per extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlContext {
    /// Lowercase scheme, e.g. `https`.
    pub scheme: String,
    /// Lowercase host without port; IPv6 literals without brackets.
    pub host: String,
    /// Port only when written in the URL and not the scheme default.
    pub port: Option<u16>,
    /// The input as given (surrounding whitespace trimmed).
    pub original: String,
}

impl UrlContext {
    /// Parses `raw` into a context, or fails with [`ExtractError::InvalidUrl`]
    /// when no scheme and host can be derived.
    ///
    /// # Examples
    ///
    /// - `"https://Example.com/login?x=1"` → host `example.com`, no port
    /// - `"not a url"` → `InvalidUrl`
    pub fn parse(raw: &str) -> Result<Self, ExtractError> {
        let original = raw.trim();
        if original.is_empty() {
            return Err(ExtractError::invalid_url(raw, "empty input"));
        }

        let parsed =
            url::Url::parse(original).map_err(|e| ExtractError::invalid_url(raw, e.to_string()))?;

        let host = match parsed.host_str() {
            Some(h) if !h.is_empty() => h.trim_start_matches('[').trim_end_matches(']'),
            _ => return Err(ExtractError::invalid_url(raw, "URL has no host")),
        };

        Ok(Self {
            scheme: parsed.scheme().to_ascii_lowercase(),
            host: host.to_ascii_lowercase(),
            port: parsed.port(),
            original: original.to_string(),
        })
    }
}
