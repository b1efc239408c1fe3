//! Pre-built service records for tests.

use zeroscout_discover::{ServiceInfo, ServiceKey, ServiceMap};

/// Build a key in the `local` domain.
pub fn service_key(name: &str, service_type: &str) -> ServiceKey {
    ServiceKey::new(name, service_type, "local")
}

/// Build a record with fixture connection details.
pub fn service_info(address: &str, port: &str) -> ServiceInfo {
    ServiceInfo {
        hostname: "fixture.local".to_string(),
        address: address.to_string(),
        port: port.to_string(),
        txt: "\"txtvers=1\"".to_string(),
    }
}

/// A small network: two HTTP services and one printer.
pub fn sample_services() -> ServiceMap {
    let mut services = ServiceMap::new();
    services.insert(
        service_key("build-cache", "_http._tcp"),
        service_info("192.168.1.10", "8080"),
    );
    services.insert(
        service_key("wiki", "_http._tcp"),
        service_info("192.168.1.11", "80"),
    );
    services.insert(
        service_key("Living Room Printer", "_ipp._tcp"),
        service_info("192.168.1.50", "631"),
    );
    services
}
