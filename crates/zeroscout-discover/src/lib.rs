//! Local-network service discovery (mDNS/DNS-SD) via the platform tools.
//!
//! This crate fronts the command-line tools that already speak mDNS/DNS-SD
//! on each platform (`avahi-browse`/`avahi-publish-service` where Avahi is
//! installed, `dns-sd` on macOS) rather than implementing the wire
//! protocol. Browsing runs a tool, parses its text output into
//! [`ServiceMap`] records, and returns; publishing keeps an announcer child
//! process alive per registered service.
//!
//! Tool availability is checked once, when a backend is constructed: if the
//! platform's tools are missing, construction fails with
//! [`DiscoverError::ToolMissing`] and nothing else is usable.
//!
//! # Example: finding services
//!
//! ```no_run
//! use zeroscout_discover::{SearchQuery, Zeroconf};
//!
//! let zeroconf = Zeroconf::new()?;
//! let query = SearchQuery::new().with_type("_http._tcp");
//! for (key, info) in zeroconf.search(&query)? {
//!     println!("{key} -> {}:{}", info.address, info.port);
//! }
//! # Ok::<(), zeroscout_discover::DiscoverError>(())
//! ```
//!
//! # Example: advertising a service
//!
//! ```no_run
//! use zeroscout_discover::{UnregisterFilter, Zeroconf};
//!
//! let zeroconf = Zeroconf::new()?;
//! zeroconf.register("build-cache", "_http._tcp", 8080)?;
//! // ... serve ...
//! zeroconf.unregister(&UnregisterFilter::any().with_name("build-cache"));
//! # Ok::<(), zeroscout_discover::DiscoverError>(())
//! ```

pub mod backend;
mod config;
mod discovery;
mod error;
mod escape;
mod publish;
mod service;

pub use backend::{platform_backend, DiscoveryBackend};
pub use config::DiscoverConfig;
pub use discovery::{Discovery, Zeroconf};
pub use error::{DiscoverError, DiscoverResult};
pub use escape::decode;
pub use publish::{PublishKey, PublisherRegistry, UnregisterFilter};
pub use service::{SearchQuery, ServiceInfo, ServiceKey, ServiceMap};
