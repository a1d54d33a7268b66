//! Host extraction from caller-supplied `url` values.
//!
//! Callers may pass a bare hostname (`google.com`), a host with port or path
//! (`google.com:443/maps`) or a full URL (`https://google.com/maps`). Only the
//! host part is used for name resolution.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;
use url::{Host, Url};

/// Maximum length of a DNS name in text form.
const MAX_HOSTNAME_LEN: usize = 253;

/// Lowercase ASCII hostname made of dot-separated labels.
static HOSTNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_]([a-z0-9_-]{0,61}[a-z0-9_])?(\.[a-z0-9_]([a-z0-9_-]{0,61}[a-z0-9_])?)*$")
        .unwrap()
});

/// Host part of a `url` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetHost {
    /// The value already names an IP address.
    Ip(IpAddr),
    /// A lowercase hostname that still needs resolving.
    Domain(String),
}

/// Extracts the host from a hostname or URL.
///
/// Returns `None` when no syntactically valid host can be found, so callers
/// can skip the name service entirely.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     parse_host("https://Google.com/maps"),
///     Some(TargetHost::Domain("google.com".to_string()))
/// );
/// ```
pub fn parse_host(input: &str) -> Option<TargetHost> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Bare IPv6 literals are not valid URL authorities without brackets.
    if let Ok(ip) = input.parse::<IpAddr>() {
        return Some(TargetHost::Ip(ip));
    }

    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("http://{input}")
    };

    let url = Url::parse(&candidate).ok()?;

    match url.host()? {
        Host::Ipv4(ip) => Some(TargetHost::Ip(IpAddr::V4(ip))),
        Host::Ipv6(ip) => Some(TargetHost::Ip(IpAddr::V6(ip))),
        Host::Domain(domain) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            if domain.len() > MAX_HOSTNAME_LEN || !HOSTNAME_REGEX.is_match(&domain) {
                return None;
            }
            Some(TargetHost::Domain(domain))
        }
    }
}
