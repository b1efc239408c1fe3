//! Platform discovery backends.
//!
//! Each backend drives one family of DNS-SD command-line tools:
//!
//! - `avahi`: `avahi-browse` / `avahi-publish-service` (Linux and other
//!   platforms shipping Avahi)
//! - `dnssd`: Apple's `dns-sd` (macOS)
//!
//! Both parse the tools' text output into the same [`ServiceMap`] shape;
//! neither speaks the mDNS wire protocol. The backend for the running
//! platform is selected once by [`platform_backend`], and its constructor
//! verifies the tools are installed so a missing tool surfaces at startup
//! rather than on first use.

pub mod avahi;
pub mod dnssd;

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::DiscoverConfig;
use crate::error::{DiscoverError, DiscoverResult};
use crate::service::ServiceMap;

pub use avahi::AvahiBackend;
pub use dnssd::DnsSdBackend;

/// One family of discovery tools.
///
/// Implementations own the invocation and output grammar of their tools;
/// shared logic never branches on which backend is active.
pub trait DiscoveryBackend: Send + Sync {
    /// Tool family name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Enumerate services of `service_type` (all types when `None`) in
    /// `domain`.
    ///
    /// Only IPv4 resolutions are reported. Backends with a bounded
    /// observation window return whatever resolved within it.
    fn browse(&self, service_type: Option<&str>, domain: &str) -> DiscoverResult<ServiceMap>;

    /// Spawn a long-running announcer advertising the given identity in the
    /// `local` domain. The child runs until killed by the caller.
    fn announce(&self, name: &str, service_type: &str, port: &str) -> DiscoverResult<Child>;
}

/// Select and construct the backend for the current platform.
///
/// Fails with [`DiscoverError::ToolMissing`] when the platform's tools are
/// not installed; nothing in this crate is usable in that case.
#[cfg(target_os = "macos")]
pub fn platform_backend(config: DiscoverConfig) -> DiscoverResult<Arc<dyn DiscoveryBackend>> {
    Ok(Arc::new(DnsSdBackend::new(config)?))
}

/// Select and construct the backend for the current platform.
///
/// Fails with [`DiscoverError::ToolMissing`] when the platform's tools are
/// not installed; nothing in this crate is usable in that case.
#[cfg(not(target_os = "macos"))]
pub fn platform_backend(_config: DiscoverConfig) -> DiscoverResult<Arc<dyn DiscoveryBackend>> {
    Ok(Arc::new(AvahiBackend::new()?))
}

/// Run a tool to completion and return its stdout.
pub(crate) fn run_to_exit(mut cmd: Command, tool: &'static str) -> DiscoverResult<String> {
    debug!(tool, "running to completion");
    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| DiscoverError::Tool { tool, source: e })?;

    if !output.status.success() {
        return Err(DiscoverError::ToolFailed {
            tool,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a streaming tool for a fixed window, terminate it, and return the
/// output it buffered.
///
/// The tool never exits on its own, so a non-zero exit status here means
/// nothing; short or empty output is the caller's problem to default.
pub(crate) fn run_with_window(
    mut cmd: Command,
    window: Duration,
    tool: &'static str,
) -> DiscoverResult<String> {
    debug!(tool, window_ms = window.as_millis() as u64, "running bounded invocation");
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| DiscoverError::Tool { tool, source: e })?;

    std::thread::sleep(window);
    let _ = child.kill();

    let output = child
        .wait_with_output()
        .map_err(|e| DiscoverError::Tool { tool, source: e })?;

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_run_to_exit_captures_stdout() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo one; echo two"]);
        let out = run_to_exit(cmd, "sh").unwrap();
        assert_eq!(out, "one\ntwo\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_to_exit_reports_failure() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo oops >&2; exit 3"]);
        let err = run_to_exit(cmd, "sh").unwrap_err();
        match err {
            DiscoverError::ToolFailed { tool, stderr, .. } => {
                assert_eq!(tool, "sh");
                assert_eq!(stderr, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_window_keeps_buffered_output() {
        // the child prints immediately, then sleeps well past the window
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo early; exec sleep 30"]);
        let out = run_with_window(cmd, Duration::from_millis(300), "sh").unwrap();
        assert_eq!(out, "early\n");
    }

    #[test]
    fn test_missing_tool_is_spawn_error() {
        let cmd = Command::new("zeroscout-no-such-tool-xyzzy");
        let err = run_to_exit(cmd, "zeroscout-no-such-tool-xyzzy").unwrap_err();
        assert!(matches!(err, DiscoverError::Tool { .. }));
    }
}
