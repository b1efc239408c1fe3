//! Testing utilities, fixtures, and mocks for zeroscout.
//!
//! This crate provides common testing infrastructure used across the
//! zeroscout workspace:
//!
//! - **Fixtures**: pre-built service records
//! - **Mocks**: an in-memory [`zeroscout_discover::DiscoveryBackend`] so
//!   engine and registry behavior can be exercised without the real
//!   discovery tools installed

pub mod fixtures;
pub mod mocks;

pub use fixtures::{service_info, service_key, sample_services};
pub use mocks::MockBackend;
