//! System name-service resolver.

use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use tokio::net::lookup_host;
use tracing::{debug, warn};

use super::service::AddressResolver;
use crate::domain::identifier::RequestIdentifier;
use crate::utils::host::{TargetHost, parse_host};

/// Resolves hostnames through the operating system resolver.
///
/// Lookups run on tokio's blocking pool via [`tokio::net::lookup_host`], so a
/// slow name server only delays the request that asked for it. Each lookup is
/// bounded by a timeout; timing out counts as "could not resolve".
pub struct DnsResolver {
    timeout: Duration,
}

impl DnsResolver {
    /// Creates a resolver that gives up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn lookup(&self, host: &str) -> Option<IpAddr> {
        match tokio::time::timeout(self.timeout, lookup_host((host, 0))).await {
            Ok(Ok(addrs)) => {
                let ip = pick_address(addrs.map(|addr| addr.ip()));
                if ip.is_none() {
                    debug!(host, "Name resolution returned no addresses");
                }
                ip
            }
            Ok(Err(e)) => {
                debug!(host, error = %e, "Name resolution failed");
                None
            }
            Err(_) => {
                warn!(host, timeout_ms = self.timeout.as_millis() as u64, "Name resolution timed out");
                None
            }
        }
    }
}

#[async_trait]
impl AddressResolver for DnsResolver {
    async fn resolve_to_ip(&self, identifier: &RequestIdentifier) -> Option<String> {
        let raw = match identifier {
            RequestIdentifier::Ip(ip) => return Some(ip.to_string()),
            RequestIdentifier::Hostname(raw) => raw,
        };

        match parse_host(raw)? {
            TargetHost::Ip(ip) => Some(ip.to_string()),
            TargetHost::Domain(host) => {
                let ip = self.lookup(&host).await?;
                debug!(host, %ip, "Resolved hostname");
                Some(ip.to_string())
            }
        }
    }
}

/// Picks one address, preferring IPv4 the way `gethostbyname` answers.
fn pick_address(addrs: impl IntoIterator<Item = IpAddr>) -> Option<IpAddr> {
    let mut first_v6 = None;
    for addr in addrs {
        match addr {
            IpAddr::V4(_) => return Some(addr),
            IpAddr::V6(_) if first_v6.is_none() => first_v6 = Some(addr),
            IpAddr::V6(_) => {}
        }
    }
    first_v6
}
