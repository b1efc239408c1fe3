//! Tunables for the discovery backends.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a discovery backend.
///
/// The windows only apply to streaming tools that never exit on their own
/// (the `dns-sd` family): the tool is launched, allowed to accumulate
/// output for the window, then terminated and whatever it printed is
/// parsed. A longer window finds more services at the cost of a slower
/// call; services that would have resolved given more time are absent from
/// the result. `avahi-browse` terminates by itself and ignores these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverConfig {
    /// How long a streaming browse may run before it is terminated.
    pub browse_window: Duration,
    /// How long one hostname-to-address lookup may run before it is
    /// terminated.
    pub resolve_window: Duration,
}

impl DiscoverConfig {
    /// Set the browse observation window.
    pub fn with_browse_window(mut self, window: Duration) -> Self {
        self.browse_window = window;
        self
    }

    /// Set the address-resolution window.
    pub fn with_resolve_window(mut self, window: Duration) -> Self {
        self.resolve_window = window;
        self
    }
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            browse_window: Duration::from_secs(3),
            resolve_window: Duration::from_secs(2),
        }
    }
}
