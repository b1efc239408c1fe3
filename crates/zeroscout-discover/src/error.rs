//! Error types for the discover crate.

use thiserror::Error;

/// A type alias for `Result<T, DiscoverError>`.
pub type DiscoverResult<T> = std::result::Result<T, DiscoverError>;

/// Errors that can occur during discovery and publication.
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// A required discovery tool is not installed. Raised once, when the
    /// backend is constructed; nothing in this crate is usable after it.
    #[error("required tool `{tool}` was not found on PATH")]
    ToolMissing {
        /// Name of the missing executable.
        tool: &'static str,
    },

    /// `register` was called for a (name, type, port) key that already has
    /// a live announcer. Unregister the key first or pick another identity.
    #[error("service `{name}` ({service_type}, port {port}) is already registered")]
    DuplicateService {
        name: String,
        service_type: String,
        port: String,
    },

    /// Spawning or waiting on a discovery tool failed.
    #[error("failed to run `{tool}`: {source}")]
    Tool {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A discovery tool ran but exited unsuccessfully.
    #[error("`{tool}` exited with {status}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },
}
