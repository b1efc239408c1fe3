//! Zeroscout - browse and publish local-network services.
//!
//! This is the command-line front end over the discover crate: `browse`
//! enumerates what the network advertises, `publish` keeps a service
//! advertised until the command exits.

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use zeroscout_discover::{
    DiscoverConfig, SearchQuery, ServiceMap, UnregisterFilter, Zeroconf,
};
use zeroscout_util::log::{self, LogConfig, LogLevel};

#[derive(Parser)]
#[command(name = "zeroscout")]
#[command(author, version, about = "Local-network service discovery", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse for advertised services
    Browse {
        /// Service type to browse for, e.g. _http._tcp (all types when omitted)
        service_type: Option<String>,

        /// Only report instances with this exact name
        #[arg(short, long)]
        name: Option<String>,

        /// Browse domain
        #[arg(short, long, default_value = "local")]
        domain: String,

        /// Observation window in seconds for streaming tools
        #[arg(short, long)]
        window: Option<u64>,

        /// Print output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Advertise a service for as long as the command runs
    Publish {
        /// Service type, e.g. _http._tcp
        service_type: String,

        /// Port the service listens on
        port: u16,

        /// Instance name (defaults to the machine hostname)
        #[arg(short, long)]
        name: Option<String>,

        /// Stop advertising after this many seconds instead of running
        /// until killed
        #[arg(long, value_name = "SECS")]
        duration: Option<u64>,
    },
    /// Print version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    log::init(LogConfig {
        print: cli.verbose,
        level: if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        },
        include_location: false,
    });

    match cli.command {
        Commands::Browse {
            service_type,
            name,
            domain,
            window,
            json,
        } => browse(service_type, name, domain, window, json),
        Commands::Publish {
            service_type,
            port,
            name,
            duration,
        } => publish(service_type, port, name, duration),
        Commands::Version => {
            println!("zeroscout {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn browse(
    service_type: Option<String>,
    name: Option<String>,
    domain: String,
    window: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = DiscoverConfig::default();
    if let Some(secs) = window {
        config = config.with_browse_window(Duration::from_secs(secs));
    }

    let zeroconf = Zeroconf::with_config(config)
        .context("discovery tools are not available on this machine")?;

    let mut query = SearchQuery::new().with_domain(domain);
    if let Some(ty) = service_type {
        query = query.with_type(ty);
    }
    if let Some(name) = name {
        query = query.with_name(name);
    }

    let services = zeroconf.search(&query)?;
    debug!(count = services.len(), "browse finished");

    if json {
        print_json(&services)?;
    } else {
        print_table(&services);
    }
    Ok(())
}

/// One discovered service, flattened for JSON output.
#[derive(Serialize)]
struct JsonRecord<'a> {
    name: &'a str,
    service_type: &'a str,
    domain: &'a str,
    hostname: &'a str,
    address: &'a str,
    port: &'a str,
    txt: &'a str,
}

fn print_json(services: &ServiceMap) -> anyhow::Result<()> {
    let records: Vec<JsonRecord<'_>> = services
        .iter()
        .map(|(key, info)| JsonRecord {
            name: &key.name,
            service_type: &key.service_type,
            domain: &key.domain,
            hostname: &info.hostname,
            address: &info.address,
            port: &info.port,
            txt: &info.txt,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn print_table(services: &ServiceMap) {
    if services.is_empty() {
        println!("No services found");
        return;
    }

    let mut keys: Vec<_> = services.keys().collect();
    keys.sort_by(|a, b| (&a.service_type, &a.name).cmp(&(&b.service_type, &b.name)));

    for key in keys {
        let info = &services[key];
        println!("{key}");
        println!("  host: {} ({})", info.hostname, info.address);
        println!("  port: {}", info.port);
        if !info.txt.is_empty() {
            println!("  txt:  {}", info.txt);
        }
    }
    println!("\n{} service(s) found", services.len());
}

fn publish(
    service_type: String,
    port: u16,
    name: Option<String>,
    duration: Option<u64>,
) -> anyhow::Result<()> {
    let zeroconf = Zeroconf::new().context("discovery tools are not available on this machine")?;

    let name = match name {
        Some(name) => name,
        None => hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "zeroscout".to_string()),
    };

    zeroconf.register(&name, &service_type, port)?;
    println!("Advertising {name} ({service_type}) on port {port}");

    // TODO: trap SIGINT so the announcer is reaped when the command is
    // interrupted, instead of relying on --duration for clean shutdown
    match duration {
        Some(secs) => {
            std::thread::sleep(Duration::from_secs(secs));
            zeroconf.unregister(&UnregisterFilter::any());
            println!("Stopped advertising {name}");
        }
        None => loop {
            std::thread::sleep(Duration::from_secs(3600));
        },
    }
    Ok(())
}
