//! libcurl-backed [`HttpClient`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::str;
use std::sync::Arc;
use std::time::Duration;

use super::{parse, HttpClient, HttpResponse};
use crate::config::ScanConfig;
use crate::error::UpstreamError;

/// Default cap on stored response bodies (4 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone)]
struct CurlOptions {
    user_agent: String,
    max_redirects: u32,
    max_body_bytes: usize,
}

/// Blocking libcurl transfers run through `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct CurlClient {
    opts: Arc<CurlOptions>,
}

impl CurlClient {
    pub fn new(user_agent: impl Into<String>, max_redirects: u32) -> Self {
        Self {
            opts: Arc::new(CurlOptions {
                user_agent: user_agent.into(),
                max_redirects,
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            }),
        }
    }

    pub fn from_config(cfg: &ScanConfig) -> Self {
        let mut client = Self::new(cfg.user_agent.clone(), cfg.max_redirects);
        Arc::make_mut(&mut client.opts).max_body_bytes = cfg.max_body_bytes;
        client
    }
}

#[async_trait]
impl HttpClient for CurlClient {
    async fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        timeout: Duration,
    ) -> Result<HttpResponse, UpstreamError> {
        let opts = Arc::clone(&self.opts);
        let url = url.to_string();
        let headers = headers.clone();
        tokio::task::spawn_blocking(move || get_blocking(&url, &headers, timeout, &opts)).await?
    }
}

/// Performs one GET on the current thread.
fn get_blocking(
    url: &str,
    custom_headers: &HashMap<String, String>,
    timeout: Duration,
    opts: &CurlOptions,
) -> Result<HttpResponse, UpstreamError> {
    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();
    let mut truncated = false;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirects)?;
    easy.useragent(&opts.user_agent)?;
    // Empty string: accept every encoding libcurl was built with.
    easy.accept_encoding("")?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;

    let mut list = curl::easy::List::new();
    for (k, v) in custom_headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !custom_headers.is_empty() {
        easy.http_headers(list)?;
    }

    let max_body = opts.max_body_bytes;
    let result = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            let room = max_body.saturating_sub(body.len());
            if data.len() > room {
                body.extend_from_slice(&data[..room]);
                truncated = true;
                // Short write aborts the transfer.
                return Ok(0);
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()
    };
    match result {
        Ok(()) => {}
        Err(e) if truncated && e.is_write_error() => {
            tracing::debug!(url, limit = max_body, "response body truncated");
        }
        Err(e) => return Err(UpstreamError::Curl(e)),
    }

    let status = easy.response_code()?;
    let redirect_count = easy.redirect_count()?;
    let final_url = easy
        .effective_url()?
        .filter(|u| *u != url)
        .map(str::to_string);
    let parsed = parse::parse_headers(&header_lines);

    Ok(HttpResponse {
        status,
        redirect_count,
        final_url,
        content_type: parsed.content_type,
        body,
        truncated,
    })
}
