//! Hostname to IP resolution.
//!
//! Provides an [`AddressResolver`] trait with a DNS-backed implementation,
//! [`DnsResolver`].

mod dns_resolver;
mod service;

pub use dns_resolver::DnsResolver;
pub use service::AddressResolver;

#[cfg(test)]
pub use service::MockAddressResolver;
