//! Mock implementations for isolated testing.

use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

use zeroscout_discover::{
    DiscoverError, DiscoverResult, DiscoveryBackend, ServiceMap,
};

/// In-memory discovery backend.
///
/// `browse` answers from a canned [`ServiceMap`] with the same type/domain
/// narrowing the real backends apply at the tool level. `announce` spawns a
/// `sleep` child so registry code exercises real process handles, and logs
/// every announcement for assertions.
#[derive(Default)]
pub struct MockBackend {
    services: Mutex<ServiceMap>,
    announced: Mutex<Vec<(String, String, String)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose `browse` reports the given services.
    pub fn with_services(services: ServiceMap) -> Self {
        Self {
            services: Mutex::new(services),
            announced: Mutex::new(Vec::new()),
        }
    }

    /// Replace the canned browse result.
    pub fn set_services(&self, services: ServiceMap) {
        *self.services.lock().unwrap() = services;
    }

    /// Every (name, type, port) passed to `announce`, in order.
    pub fn announced(&self) -> Vec<(String, String, String)> {
        self.announced.lock().unwrap().clone()
    }
}

impl DiscoveryBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn browse(&self, service_type: Option<&str>, domain: &str) -> DiscoverResult<ServiceMap> {
        let services = self.services.lock().unwrap();
        Ok(services
            .iter()
            .filter(|(key, _)| {
                key.domain == domain
                    && service_type.map_or(true, |ty| key.service_type == ty)
            })
            .map(|(key, info)| (key.clone(), info.clone()))
            .collect())
    }

    fn announce(&self, name: &str, service_type: &str, port: &str) -> DiscoverResult<Child> {
        self.announced.lock().unwrap().push((
            name.to_string(),
            service_type.to_string(),
            port.to_string(),
        ));

        // a quiet long-lived child stands in for the real announcer
        Command::new("sleep")
            .arg("600")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| DiscoverError::Tool {
                tool: "sleep",
                source: e,
            })
    }
}
