//! Avahi backend: drives `avahi-browse` and `avahi-publish-service`.
//!
//! Browsing uses the parsable output mode, one `;`-separated record per
//! line. Only fully resolved records (marker `=`) with an IPv4 address are
//! kept; `+`/`-` add/remove events carry no connection details and are
//! skipped. IPv6 resolutions are dropped, matching the upstream behavior
//! this replaces.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::{debug, trace, warn};

use crate::backend::{run_to_exit, DiscoveryBackend};
use crate::error::{DiscoverError, DiscoverResult};
use crate::escape::decode;
use crate::service::{ServiceInfo, ServiceKey, ServiceMap};

pub(crate) const BROWSE_TOOL: &str = "avahi-browse";
pub(crate) const PUBLISH_TOOL: &str = "avahi-publish-service";

/// Backend for platforms shipping the Avahi command-line tools.
pub struct AvahiBackend {
    browse_tool: PathBuf,
    publish_tool: PathBuf,
}

impl AvahiBackend {
    /// Locate the Avahi tools on `PATH`.
    pub fn new() -> DiscoverResult<Self> {
        let browse_tool = zeroscout_util::find_executable(BROWSE_TOOL)
            .ok_or(DiscoverError::ToolMissing { tool: BROWSE_TOOL })?;
        let publish_tool = zeroscout_util::find_executable(PUBLISH_TOOL)
            .ok_or(DiscoverError::ToolMissing { tool: PUBLISH_TOOL })?;

        debug!(browse = %browse_tool.display(), publish = %publish_tool.display(), "avahi backend ready");

        Ok(Self {
            browse_tool,
            publish_tool,
        })
    }
}

impl DiscoveryBackend for AvahiBackend {
    fn name(&self) -> &'static str {
        "avahi"
    }

    fn browse(&self, service_type: Option<&str>, domain: &str) -> DiscoverResult<ServiceMap> {
        let mut cmd = Command::new(&self.browse_tool);
        cmd.args([
            "--terminate",
            "--resolve",
            "--parsable",
            "--no-db-lookup",
            "--domain",
            domain,
        ]);
        match service_type {
            Some(ty) => cmd.arg(ty),
            None => cmd.arg("--all"),
        };

        debug!(service_type = ?service_type, domain, "browsing");
        let output = run_to_exit(cmd, BROWSE_TOOL)?;
        Ok(parse_browse(&output))
    }

    fn announce(&self, name: &str, service_type: &str, port: &str) -> DiscoverResult<Child> {
        debug!(name, service_type, port, "spawning announcer");
        Command::new(&self.publish_tool)
            .args([name, service_type, port])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| DiscoverError::Tool {
                tool: PUBLISH_TOOL,
                source: e,
            })
    }
}

/// Parse parsable-mode browse output into a service map.
///
/// A resolved record is ten `;`-separated fields: marker, interface,
/// IP version, name, type, domain, hostname, address, port, TXT. The TXT
/// field is the unsplit remainder, so payloads containing `;` survive.
fn parse_browse(output: &str) -> ServiceMap {
    let mut services = ServiceMap::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.splitn(10, ';').collect();
        if fields[0] != "=" {
            continue;
        }
        if fields.len() < 10 {
            warn!(line, "skipping truncated resolved record");
            continue;
        }
        if fields[2] != "IPv4" {
            trace!(line, "skipping non-IPv4 record");
            continue;
        }

        let key = ServiceKey::new(decode(fields[3]), fields[4], fields[5]);
        let info = ServiceInfo {
            hostname: fields[6].to_string(),
            address: fields[7].to_string(),
            port: fields[8].to_string(),
            txt: fields[9].to_string(),
        };
        trace!(key = %key, "resolved service");
        services.insert(key, info);
    }

    services
}
