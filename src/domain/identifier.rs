//! Request identifier: the single `ip` or `url` a caller looks up.

use std::fmt;
use std::net::IpAddr;

use crate::error::AppError;

/// The identifier a request refers to.
///
/// Built once from the raw request parameters by [`RequestIdentifier::from_parts`];
/// everything downstream matches on the variant instead of re-inspecting strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestIdentifier {
    /// An IPv4 or IPv6 literal supplied via `ip`.
    Ip(IpAddr),
    /// A hostname (or URL) supplied via `url`, still to be resolved.
    Hostname(String),
}

impl RequestIdentifier {
    /// Validates the raw `ip` / `url` pair.
    ///
    /// Blank values count as absent.
    ///
    /// # Errors
    ///
    /// - [`AppError::AmbiguousIdentifier`] if both are present
    /// - [`AppError::MissingIdentifier`] if neither is present
    /// - [`AppError::InvalidIpAddress`] if `ip` is not an IP literal
    pub fn from_parts(ip: Option<&str>, url: Option<&str>) -> Result<Self, AppError> {
        let ip = non_blank(ip);
        let url = non_blank(url);

        match (ip, url) {
            (Some(_), Some(_)) => Err(AppError::AmbiguousIdentifier),
            (None, None) => Err(AppError::MissingIdentifier),
            (Some(ip), None) => ip
                .parse::<IpAddr>()
                .map(RequestIdentifier::Ip)
                .map_err(|_| AppError::InvalidIpAddress),
            (None, Some(url)) => Ok(RequestIdentifier::Hostname(url.to_string())),
        }
    }
}

impl fmt::Display for RequestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestIdentifier::Ip(ip) => write!(f, "{ip}"),
            RequestIdentifier::Hostname(host) => f.write_str(host),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_both_identifiers_are_ambiguous() {
        let result = RequestIdentifier::from_parts(Some("142.251.98.139"), Some("google.com"));
        assert!(matches!(result, Err(AppError::AmbiguousIdentifier)));
    }

    #[test]
    fn test_both_identifiers_ambiguous_even_with_invalid_ip() {
        let result = RequestIdentifier::from_parts(Some("not-an-ip"), Some("google.com"));
        assert!(matches!(result, Err(AppError::AmbiguousIdentifier)));
    }

    #[test]
    fn test_no_identifier_is_missing() {
        assert!(matches!(
            RequestIdentifier::from_parts(None, None),
            Err(AppError::MissingIdentifier)
        ));
        assert!(matches!(
            RequestIdentifier::from_parts(Some(""), Some("   ")),
            Err(AppError::MissingIdentifier)
        ));
    }

    #[test]
    fn test_ipv4_identifier() {
        let id = RequestIdentifier::from_parts(Some("142.251.98.139"), None).unwrap();
        assert_eq!(
            id,
            RequestIdentifier::Ip(IpAddr::V4(Ipv4Addr::new(142, 251, 98, 139)))
        );
    }

    #[test]
    fn test_ipv6_identifier() {
        let id = RequestIdentifier::from_parts(Some("2001:db8::1"), None).unwrap();
        assert_eq!(
            id,
            RequestIdentifier::Ip(IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)))
        );
    }

    #[test]
    fn test_invalid_ip_rejected() {
        let result = RequestIdentifier::from_parts(Some("999.1.1.1"), None);
        assert!(matches!(result, Err(AppError::InvalidIpAddress)));
    }

    #[test]
    fn test_hostname_identifier_is_trimmed() {
        let id = RequestIdentifier::from_parts(None, Some(" google.com ")).unwrap();
        assert_eq!(id, RequestIdentifier::Hostname("google.com".to_string()));
        assert_eq!(id.to_string(), "google.com");
    }

    #[test]
    fn test_blank_ip_with_url_is_not_ambiguous() {
        let id = RequestIdentifier::from_parts(Some(""), Some("github.com")).unwrap();
        assert_eq!(id, RequestIdentifier::Hostname("github.com".to_string()));
    }
}
