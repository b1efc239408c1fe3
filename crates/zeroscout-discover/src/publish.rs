//! Publisher registry: long-running announcer processes keyed by identity.
//!
//! Each registered service is one child process kept alive until the entry
//! is unregistered. The registry owns the handles; dropping it stops every
//! announcer it still holds.

use std::collections::HashMap;
use std::process::Child;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::backend::DiscoveryBackend;
use crate::error::{DiscoverError, DiscoverResult};

/// Identity of one published service. The port is normalized to text so a
/// registry key compares the same whichever form the caller started from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublishKey {
    pub name: String,
    pub service_type: String,
    pub port: String,
}

/// Filter for [`PublisherRegistry::unregister`]. A field that is `None`
/// matches any value; the empty filter matches every entry.
#[derive(Debug, Clone, Default)]
pub struct UnregisterFilter {
    name: Option<String>,
    service_type: Option<String>,
    port: Option<String>,
}

impl UnregisterFilter {
    /// A filter matching every registered service.
    pub fn any() -> Self {
        Self::default()
    }

    /// Match only entries with this name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Match only entries with this service type.
    pub fn with_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    /// Match only entries with this port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port.to_string());
        self
    }

    fn matches(&self, key: &PublishKey) -> bool {
        self.name.as_deref().map_or(true, |n| n == key.name)
            && self
                .service_type
                .as_deref()
                .map_or(true, |t| t == key.service_type)
            && self.port.as_deref().map_or(true, |p| p == key.port)
    }
}

/// Tracks the announcer child process for every service this process
/// advertises.
///
/// All mutation happens under one lock, so the at-most-one-announcer-per-key
/// invariant holds even when the registry is shared across threads.
pub struct PublisherRegistry {
    backend: Arc<dyn DiscoveryBackend>,
    entries: Mutex<HashMap<PublishKey, Child>>,
}

impl PublisherRegistry {
    /// Create an empty registry publishing through `backend`.
    pub fn new(backend: Arc<dyn DiscoveryBackend>) -> Self {
        Self {
            backend,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Start advertising a service.
    ///
    /// Spawns a long-running announcer for (name, type, port) and keeps its
    /// handle. Fails with [`DiscoverError::DuplicateService`] when that
    /// exact identity is already live.
    pub fn register(&self, name: &str, service_type: &str, port: u16) -> DiscoverResult<()> {
        let key = PublishKey {
            name: name.to_string(),
            service_type: service_type.to_string(),
            port: port.to_string(),
        };

        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(&key) {
            return Err(DiscoverError::DuplicateService {
                name: key.name,
                service_type: key.service_type,
                port: key.port,
            });
        }

        let child = self.backend.announce(name, service_type, &key.port)?;
        info!(name, service_type, port, "registered service");
        entries.insert(key, child);
        Ok(())
    }

    /// Stop advertising every service matching the filter.
    ///
    /// Matching announcers are signaled to stop (not awaited) and their
    /// entries removed. Returns how many entries were removed; matching
    /// nothing is a no-op, not an error.
    pub fn unregister(&self, filter: &UnregisterFilter) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let matched: Vec<PublishKey> = entries
            .keys()
            .filter(|key| filter.matches(key))
            .cloned()
            .collect();

        for key in &matched {
            if let Some(mut child) = entries.remove(key) {
                let _ = child.kill();
                let _ = child.try_wait();
                debug!(name = %key.name, service_type = %key.service_type, port = %key.port, "stopped announcer");
            }
        }

        matched.len()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether anything is currently registered.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Snapshot of the currently registered identities.
    pub fn keys(&self) -> Vec<PublishKey> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }
}

impl Drop for PublisherRegistry {
    fn drop(&mut self) {
        let stopped = self.unregister(&UnregisterFilter::any());
        if stopped > 0 {
            debug!(stopped, "stopped remaining announcers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str, service_type: &str, port: &str) -> PublishKey {
        PublishKey {
            name: name.to_string(),
            service_type: service_type.to_string(),
            port: port.to_string(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = UnregisterFilter::any();
        assert!(filter.matches(&key("a", "_http._tcp", "80")));
        assert!(filter.matches(&key("b", "_ipp._tcp", "631")));
    }

    #[test]
    fn test_single_field_filters() {
        let by_name = UnregisterFilter::any().with_name("a");
        assert!(by_name.matches(&key("a", "_http._tcp", "80")));
        assert!(!by_name.matches(&key("b", "_http._tcp", "80")));

        let by_type = UnregisterFilter::any().with_type("_http._tcp");
        assert!(by_type.matches(&key("a", "_http._tcp", "80")));
        assert!(!by_type.matches(&key("a", "_ipp._tcp", "80")));

        let by_port = UnregisterFilter::any().with_port(80);
        assert!(by_port.matches(&key("a", "_http._tcp", "80")));
        assert!(!by_port.matches(&key("a", "_http._tcp", "8080")));
    }

    #[test]
    fn test_combined_filter_needs_all_fields() {
        let filter = UnregisterFilter::any().with_name("a").with_port(80);
        assert!(filter.matches(&key("a", "_http._tcp", "80")));
        assert!(!filter.matches(&key("a", "_http._tcp", "8080")));
        assert!(!filter.matches(&key("b", "_http._tcp", "80")));
    }
}
