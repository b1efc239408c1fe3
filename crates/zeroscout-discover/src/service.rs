//! Service record types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identity of one advertised service instance.
///
/// Equality is exact field match; `name` is stored escape-decoded, so two
/// sightings of the same instance compare equal regardless of how the
/// resolver escaped them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceKey {
    /// Instance name, e.g. `Living Room Printer`.
    pub name: String,
    /// Service type, e.g. `_ipp._tcp`.
    pub service_type: String,
    /// Browse domain, usually `local`.
    pub domain: String,
}

impl ServiceKey {
    pub fn new(
        name: impl Into<String>,
        service_type: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            service_type: service_type.into(),
            domain: domain.into(),
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.service_type, self.domain)
    }
}

/// Connection details reported for a discovered service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Host advertising the service, as printed by the resolver.
    pub hostname: String,
    /// Textual IPv4 address; empty when resolution did not complete.
    pub address: String,
    /// Port, as text.
    pub port: String,
    /// Raw TXT payload, tool-specific formatting.
    pub txt: String,
}

/// Discovered services keyed by identity. A duplicate sighting of a key
/// overwrites the previous record.
pub type ServiceMap = HashMap<ServiceKey, ServiceInfo>;

/// Query for [`Discovery::search`](crate::Discovery::search).
///
/// `service_type` narrows the browse at the tool level; `name` filters the
/// parsed result by exact decoded-name match. The domain defaults to
/// `local`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub(crate) name: Option<String>,
    pub(crate) service_type: Option<String>,
    pub(crate) domain: String,
}

impl SearchQuery {
    /// Create a query matching every service in the `local` domain.
    pub fn new() -> Self {
        Self {
            name: None,
            service_type: None,
            domain: "local".to_string(),
        }
    }

    /// Only return instances with this exact name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Only browse for this service type.
    pub fn with_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    /// Browse a domain other than `local`.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_key_display() {
        let key = ServiceKey::new("printer", "_ipp._tcp", "local");
        assert_eq!(format!("{}", key), "printer (_ipp._tcp, local)");
    }

    #[test]
    fn test_service_key_equality() {
        let a = ServiceKey::new("a", "_http._tcp", "local");
        let b = ServiceKey::new("a", "_http._tcp", "local");
        let c = ServiceKey::new("a", "_http._tcp", "example.org");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_service_map_last_writer_wins() {
        let mut map = ServiceMap::new();
        let key = ServiceKey::new("a", "_http._tcp", "local");
        map.insert(
            key.clone(),
            ServiceInfo {
                hostname: "old.local".into(),
                address: "192.168.1.2".into(),
                port: "80".into(),
                txt: String::new(),
            },
        );
        map.insert(
            key.clone(),
            ServiceInfo {
                hostname: "new.local".into(),
                address: "192.168.1.3".into(),
                port: "80".into(),
                txt: String::new(),
            },
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map[&key].hostname, "new.local");
    }

    #[test]
    fn test_search_query_defaults() {
        let query = SearchQuery::new();
        assert!(query.name.is_none());
        assert!(query.service_type.is_none());
        assert_eq!(query.domain, "local");
    }

    #[test]
    fn test_search_query_builder_chain() {
        let query = SearchQuery::new()
            .with_name("printer")
            .with_type("_ipp._tcp")
            .with_domain("example.org");
        assert_eq!(query.name.as_deref(), Some("printer"));
        assert_eq!(query.service_type.as_deref(), Some("_ipp._tcp"));
        assert_eq!(query.domain, "example.org");
    }
}
