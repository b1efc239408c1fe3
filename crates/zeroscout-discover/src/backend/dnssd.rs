//! dns-sd backend (macOS): drives Apple's `dns-sd` tool.
//!
//! `dns-sd` streams zone-file-style output and never exits, so every
//! invocation is bounded: launch, let it accumulate output for the
//! configured window, terminate it, parse what it buffered. Services that
//! would have resolved given more time are absent from the result; the
//! window in [`DiscoverConfig`] is the trade-off knob.
//!
//! A record is assembled across lines: an `SRV` line carries name, port
//! and hostname (and triggers a bounded address lookup for the hostname);
//! the following `TXT` line completes the record. An `SRV` line with no
//! `TXT` line after it never produces an entry.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use tracing::{debug, trace};

use crate::backend::{run_with_window, DiscoveryBackend};
use crate::config::DiscoverConfig;
use crate::error::{DiscoverError, DiscoverResult};
use crate::escape::decode;
use crate::service::{ServiceInfo, ServiceKey, ServiceMap};

pub(crate) const TOOL: &str = "dns-sd";

/// Meta-query enumerating service types when the caller asks for all.
const ALL_TYPES_QUERY: &str = "_services._dns-sd._udp";

/// Backend for macOS, where Bonjour ships the `dns-sd` tool.
pub struct DnsSdBackend {
    tool: PathBuf,
    config: DiscoverConfig,
}

impl DnsSdBackend {
    /// Locate `dns-sd` on `PATH`.
    pub fn new(config: DiscoverConfig) -> DiscoverResult<Self> {
        let tool = zeroscout_util::find_executable(TOOL)
            .ok_or(DiscoverError::ToolMissing { tool: TOOL })?;

        debug!(tool = %tool.display(), "dns-sd backend ready");

        Ok(Self { tool, config })
    }

    /// Look up the IPv4 address for a hostname with a bounded `dns-sd -G`.
    ///
    /// A lookup that times out or prints too little defaults to an empty
    /// address instead of failing the browse.
    fn resolve_address(&self, hostname: &str) -> DiscoverResult<String> {
        let mut cmd = Command::new(&self.tool);
        cmd.args(["-G", "v4", hostname]);
        let output = run_with_window(cmd, self.config.resolve_window, TOOL)?;
        let address = parse_address(&output);
        if address.is_empty() {
            debug!(hostname, "address resolution incomplete, defaulting to empty");
        }
        Ok(address)
    }
}

impl DiscoveryBackend for DnsSdBackend {
    fn name(&self) -> &'static str {
        "dns-sd"
    }

    fn browse(&self, service_type: Option<&str>, domain: &str) -> DiscoverResult<ServiceMap> {
        let ty = service_type.unwrap_or(ALL_TYPES_QUERY);
        let mut cmd = Command::new(&self.tool);
        cmd.args(["-Z", ty, domain]);

        debug!(service_type = ty, domain, "browsing");
        let output = run_with_window(cmd, self.config.browse_window, TOOL)?;
        parse_zone(&output, domain, |hostname| self.resolve_address(hostname))
    }

    fn announce(&self, name: &str, service_type: &str, port: &str) -> DiscoverResult<Child> {
        debug!(name, service_type, port, "spawning announcer");
        Command::new(&self.tool)
            .args(["-R", name, service_type, "local", port])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| DiscoverError::Tool {
                tool: TOOL,
                source: e,
            })
    }
}

/// Fields gathered from an `SRV` line, waiting for the `TXT` line that
/// completes them.
struct PendingRecord {
    name: String,
    service_type: String,
    hostname: String,
    address: String,
    port: String,
}

/// Parse bounded `dns-sd -Z` output into a service map.
///
/// `resolve` maps a hostname to its textual IPv4 address and is invoked
/// once per `SRV` line.
fn parse_zone<F>(output: &str, domain: &str, mut resolve: F) -> DiscoverResult<ServiceMap>
where
    F: FnMut(&str) -> DiscoverResult<String>,
{
    let mut services = ServiceMap::new();
    let mut pending: Option<PendingRecord> = None;

    for line in output.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.len() == 14 && tokens[1] == "SRV" {
            // e.g. `Web\032Server._http._tcp  SRV  0 0 80 host.local. ; Replace ...`
            let owner = tokens[0];
            let (raw_name, service_type) = owner.split_once('.').unwrap_or((owner, ""));
            let hostname = tokens[5].to_string();
            let address = resolve(&hostname)?;
            pending = Some(PendingRecord {
                name: decode(raw_name),
                service_type: service_type.to_string(),
                hostname,
                address,
                port: tokens[4].to_string(),
            });
        } else if tokens.len() == 3 && tokens[1] == "TXT" {
            if let Some(record) = &pending {
                let key = ServiceKey::new(
                    record.name.clone(),
                    record.service_type.clone(),
                    domain,
                );
                let info = ServiceInfo {
                    hostname: record.hostname.clone(),
                    address: record.address.clone(),
                    port: record.port.clone(),
                    txt: tokens[2].replace('"', ""),
                };
                trace!(key = %key, "completed record");
                services.insert(key, info);
            }
        }
    }

    Ok(services)
}

/// Extract the address from bounded `dns-sd -G` output: the last token of
/// the second line, or empty text when the output is shorter than that.
fn parse_address(output: &str) -> String {
    output
        .lines()
        .nth(1)
        .and_then(|line| line.split_whitespace().last())
        .unwrap_or_default()
        .to_string()
}
