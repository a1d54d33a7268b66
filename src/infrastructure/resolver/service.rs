//! Address resolver trait.

use async_trait::async_trait;

use crate::domain::identifier::RequestIdentifier;

/// Turns a [`RequestIdentifier`] into a canonical IP string.
///
/// Resolution may wait on the name service, so implementations must not block
/// the async runtime while doing so.
///
/// # Implementations
///
/// - [`crate::infrastructure::resolver::DnsResolver`] - System resolver via tokio
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolves the identifier to an IP string.
    ///
    /// IP identifiers are returned in canonical form without any lookup.
    /// Returns `None` when a hostname cannot be resolved; failing to resolve is
    /// an expected outcome, not an error.
    async fn resolve_to_ip(&self, identifier: &RequestIdentifier) -> Option<String>;
}
