//! Lexical heuristics: pure, total functions over the parsed URL.

use once_cell::sync::Lazy;
use regex::Regex;

use super::signal::{Evaluation, Feature, Signal};
use crate::config::ScanConfig;
use crate::url_model::UrlContext;

static IPV4_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(([01]?\d\d?|2[0-4]\d|25[0-5])\.){3}([01]?\d\d?|2[0-4]\d|25[0-5])")
        .expect("valid IPv4 pattern")
});

static IPV6_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}|([0-9a-fA-F]{1,4}:){1,7}:|([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4})",
    )
    .expect("valid IPv6 pattern")
});

/// Host contains an IPv4 or IPv6 literal anywhere (e.g. `10.0.0.1.evil.test`).
pub fn having_ip_address(url: &UrlContext) -> Signal {
    Signal::phishing_if(IPV4_PATTERN.is_match(&url.host) || IPV6_PATTERN.is_match(&url.host))
}

/// `<54` legitimate, `54..=75` suspicious, longer phishing.
pub fn url_length(url: &UrlContext) -> Signal {
    match url.original.chars().count() {
        0..=53 => Signal::Legitimate,
        54..=75 => Signal::Suspicious,
        _ => Signal::Phishing,
    }
}

pub fn shortening_service(url: &UrlContext, shorteners: &[String]) -> Signal {
    Signal::phishing_if(
        shorteners
            .iter()
            .any(|s| !s.is_empty() && url.host.contains(s.to_ascii_lowercase().as_str())),
    )
}

pub fn having_at_symbol(url: &UrlContext) -> Signal {
    Signal::phishing_if(url.original.contains('@'))
}

/// More than one `//` in the raw string (the scheme separator accounts for one).
pub fn double_slash_redirecting(url: &UrlContext) -> Signal {
    Signal::phishing_if(url.original.matches("//").count() > 1)
}

pub fn prefix_suffix(url: &UrlContext) -> Signal {
    Signal::phishing_if(url.host.contains('-'))
}

/// One dot legitimate, two suspicious, anything else phishing.
pub fn having_sub_domain(url: &UrlContext) -> Signal {
    match url.host.matches('.').count() {
        1 => Signal::Legitimate,
        2 => Signal::Suspicious,
        _ => Signal::Phishing,
    }
}

pub fn ssl_final_state(url: &UrlContext) -> Signal {
    if url.scheme == "https" {
        Signal::Legitimate
    } else {
        Signal::Phishing
    }
}

pub fn port(url: &UrlContext) -> Signal {
    Signal::phishing_if(matches!(url.port, Some(p) if p != 80 && p != 443))
}

/// "https" spelled inside the host, e.g. `https-paypal.example`.
pub fn https_token(url: &UrlContext) -> Signal {
    Signal::phishing_if(url.host.to_ascii_lowercase().contains("https"))
}

/// All ten lexical features in model order.
pub fn evaluate(url: &UrlContext, cfg: &ScanConfig) -> Vec<(Feature, Evaluation)> {
    let computed = |f: Feature, s: Signal| (f, Evaluation::Computed(s));
    vec![
        computed(Feature::HavingIpAddress, having_ip_address(url)),
        computed(Feature::UrlLength, url_length(url)),
        computed(
            Feature::ShorteningService,
            shortening_service(url, &cfg.shorteners),
        ),
        computed(Feature::HavingAtSymbol, having_at_symbol(url)),
        computed(Feature::DoubleSlashRedirecting, double_slash_redirecting(url)),
        computed(Feature::PrefixSuffix, prefix_suffix(url)),
        computed(Feature::HavingSubDomain, having_sub_domain(url)),
        computed(Feature::SslFinalState, ssl_final_state(url)),
        computed(Feature::Port, port(url)),
        computed(Feature::HttpsToken, https_token(url)),
    ]
}
