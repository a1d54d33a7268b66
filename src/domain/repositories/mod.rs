//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! See integration tests in `tests/repository_location.rs` for usage examples.

pub mod location_repository;

pub use location_repository::LocationRepository;

#[cfg(test)]
pub use location_repository::MockLocationRepository;
