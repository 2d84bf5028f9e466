//! Host comparisons used by the content heuristics and the registry lookup.

/// True when `link` is an absolute `http`/`https` reference.
pub fn is_absolute_http(link: &str) -> bool {
    link.get(..4)
        .map(|p| p.eq_ignore_ascii_case("http"))
        .unwrap_or(false)
}

/// True when `link` is absolute and does not mention `host` anywhere.
///
/// This is a substring test, not an origin comparison: relative links and
/// absolute links that contain the page host count as on-host.
pub fn is_off_host(link: &str, host: &str) -> bool {
    let link = link.trim();
    if !is_absolute_http(link) {
        return false;
    }
    !link.to_ascii_lowercase().contains(&host.to_ascii_lowercase())
}

/// Domain to ask the registry about: the public suffix plus one label
/// (`www.bbc.co.uk` -> `bbc.co.uk`).
///
/// Hosts the suffix list cannot split (single labels, bare suffixes) are
/// returned without a leading `www.`.
pub fn registrable_domain(host: &str) -> String {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    match psl::domain_str(&host) {
        Some(domain) => domain.to_string(),
        None => host.strip_prefix("www.").unwrap_or(&host).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_links_are_on_host() {
        assert!(!is_off_host("/login", "example.com"));
        assert!(!is_off_host("#top", "example.com"));
        assert!(!is_off_host("javascript:void(0)", "example.com"));
    }

    #[test]
    fn absolute_links_compare_by_substring() {
        assert!(!is_off_host("https://example.com/a", "example.com"));
        assert!(!is_off_host("https://cdn.example.com/a", "example.com"));
        assert!(!is_off_host("HTTPS://EXAMPLE.COM/a", "example.com"));
        assert!(is_off_host("https://evil.test/a", "example.com"));
    }

    #[test]
    fn absolute_http_prefix() {
        assert!(is_absolute_http("http://x"));
        assert!(is_absolute_http("HTTPS://x"));
        assert!(!is_absolute_http("//x"));
        assert!(!is_absolute_http("ht"));
    }

    #[test]
    fn registrable_domain_generic_tlds() {
        assert_eq!(registrable_domain("www.example.com"), "example.com");
        assert_eq!(registrable_domain("login.secure.example.com"), "example.com");
        assert_eq!(registrable_domain("example.com"), "example.com");
        assert_eq!(registrable_domain("Example.COM."), "example.com");
    }

    #[test]
    fn registrable_domain_multi_label_suffixes() {
        assert_eq!(registrable_domain("www.bbc.co.uk"), "bbc.co.uk");
        assert_eq!(registrable_domain("news.bbc.co.uk"), "bbc.co.uk");
        assert_eq!(registrable_domain("login.bank.com.au"), "bank.com.au");
        assert_eq!(registrable_domain("shop.example.co.jp"), "example.co.jp");
    }

    #[test]
    fn registrable_domain_unsplittable_hosts() {
        assert_eq!(registrable_domain("localhost"), "localhost");
        assert_eq!(registrable_domain("co.uk"), "co.uk");
    }
}
