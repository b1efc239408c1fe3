//! Shared utilities for zeroscout.
//!
//! This crate provides common utilities used across the zeroscout workspace:
//! - Logging setup with tracing
//! - Executable lookup on `PATH`

pub mod log;
pub mod path;

pub use path::find_executable;
