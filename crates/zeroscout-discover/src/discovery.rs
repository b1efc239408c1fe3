//! Discovery engine and the combined facade.

use std::sync::Arc;
use tracing::debug;

use crate::backend::{platform_backend, DiscoveryBackend};
use crate::config::DiscoverConfig;
use crate::error::DiscoverResult;
use crate::publish::{PublisherRegistry, UnregisterFilter};
use crate::service::{SearchQuery, ServiceMap};

/// Enumerates services on the local network segment.
///
/// One blocking tool invocation per [`search`](Discovery::search) call (plus
/// per-hostname lookups on the `dns-sd` path); no process outlives the
/// call.
pub struct Discovery {
    backend: Arc<dyn DiscoveryBackend>,
}

impl Discovery {
    /// Create a discovery engine for the current platform with default
    /// settings. Fails when the platform's tools are missing.
    pub fn new() -> DiscoverResult<Self> {
        Self::with_config(DiscoverConfig::default())
    }

    /// Create a discovery engine with explicit tunables.
    pub fn with_config(config: DiscoverConfig) -> DiscoverResult<Self> {
        Ok(Self::with_backend(platform_backend(config)?))
    }

    /// Create a discovery engine over an existing backend.
    pub fn with_backend(backend: Arc<dyn DiscoveryBackend>) -> Self {
        Self { backend }
    }

    /// Find advertised services matching the query.
    ///
    /// An empty result is a successful outcome, not an error.
    pub fn search(&self, query: &SearchQuery) -> DiscoverResult<ServiceMap> {
        let mut services = self
            .backend
            .browse(query.service_type.as_deref(), &query.domain)?;

        if let Some(name) = &query.name {
            services.retain(|key, _| key.name == *name);
        }

        debug!(backend = self.backend.name(), count = services.len(), "search finished");
        Ok(services)
    }
}

/// One-stop facade: a platform backend shared by a [`Discovery`] engine and
/// a [`PublisherRegistry`].
pub struct Zeroconf {
    discovery: Discovery,
    publisher: PublisherRegistry,
}

impl Zeroconf {
    /// Set up discovery and publication for the current platform. The tool
    /// availability check runs here, once; a missing tool makes the whole
    /// facade unusable.
    pub fn new() -> DiscoverResult<Self> {
        Self::with_config(DiscoverConfig::default())
    }

    /// Like [`new`](Zeroconf::new), with explicit tunables.
    pub fn with_config(config: DiscoverConfig) -> DiscoverResult<Self> {
        Ok(Self::with_backend(platform_backend(config)?))
    }

    /// Build the facade over an existing backend.
    pub fn with_backend(backend: Arc<dyn DiscoveryBackend>) -> Self {
        Self {
            discovery: Discovery::with_backend(backend.clone()),
            publisher: PublisherRegistry::new(backend),
        }
    }

    /// Find advertised services matching the query.
    pub fn search(&self, query: &SearchQuery) -> DiscoverResult<ServiceMap> {
        self.discovery.search(query)
    }

    /// Start advertising a service; see [`PublisherRegistry::register`].
    pub fn register(&self, name: &str, service_type: &str, port: u16) -> DiscoverResult<()> {
        self.publisher.register(name, service_type, port)
    }

    /// Stop advertising matching services; see
    /// [`PublisherRegistry::unregister`].
    pub fn unregister(&self, filter: &UnregisterFilter) -> usize {
        self.publisher.unregister(filter)
    }

    /// The underlying publisher registry.
    pub fn publisher(&self) -> &PublisherRegistry {
        &self.publisher
    }
}
