//! # Report Parser
//!
//! Maps the scanner's XML report (`nmaprun`) onto [`ScanResult`].
//!
//! Per `host` element: the status state, the first hostname, the IPv4 and MAC
//! addresses (plus the MAC's vendor) and every listed port. Optional values the
//! report leaves out, or leaves empty, become `None`.
//!
//! The run summary comes from `runstats/finished@summary`, which reads
//! `"Nmap done at <date>; <n> IP addresses (<m> hosts up) scanned in <t> seconds"`.
//! Only the part after the first `;` is kept. A summary that does not have
//! that shape is dropped without failing the parse.

use std::io;
use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;
use vision_common::error::ScanError;
use vision_common::scan::{Device, Port, ScanResult};

const ROOT_TAG: &str = "nmaprun";

/// Reads and parses the report at `path`. No other file is consulted.
pub async fn parse_report(path: &Path) -> Result<ScanResult, ScanError> {
    let xml = tokio::fs::read_to_string(path).await.map_err(|source| match source.kind() {
        io::ErrorKind::InvalidData => ScanError::corrupt("report is not valid UTF-8"),
        _ => ScanError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_report_str(&xml)
}

pub fn parse_report_str(xml: &str) -> Result<ScanResult, ScanError> {
    if xml.trim().is_empty() {
        return Err(ScanError::corrupt("report is empty"));
    }

    // Scanner reports carry a `<!DOCTYPE nmaprun>` declaration.
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|err| ScanError::corrupt(err.to_string()))?;

    let root = doc.root_element();
    if !root.has_tag_name(ROOT_TAG) {
        return Err(ScanError::corrupt(format!(
            "unexpected root element <{}>",
            root.tag_name().name()
        )));
    }

    let devices = root
        .descendants()
        .filter(|node| node.has_tag_name("host"))
        .map(parse_host)
        .collect::<Result<Vec<Device>, ScanError>>()?;

    let scan_summary = child(root, "runstats")
        .and_then(|runstats| child(runstats, "finished"))
        .and_then(|finished| finished.attribute("summary"))
        .and_then(summarize);

    debug!(devices = devices.len(), summary = ?scan_summary, "report parsed");
    Ok(ScanResult {
        devices,
        scan_summary,
    })
}

fn parse_host(host: Node) -> Result<Device, ScanError> {
    let status = child(host, "status")
        .and_then(|status| status.attribute("state"))
        .and_then(present)
        .ok_or_else(|| ScanError::corrupt("host without a status state"))?;

    let hostname = child(host, "hostnames")
        .and_then(|hostnames| child(hostnames, "hostname"))
        .and_then(|hostname| hostname.attribute("name"))
        .and_then(present);

    let ipv4 = address(host, "ipv4");
    let mac = address(host, "mac");

    let open_ports = match child(host, "ports") {
        Some(ports) => ports
            .children()
            .filter(|node| node.has_tag_name("port"))
            .map(parse_port)
            .collect::<Result<Vec<Port>, ScanError>>()?,
        None => Vec::new(),
    };

    Ok(Device {
        hostname,
        ip_address: ipv4.and_then(|addr| addr.attribute("addr")).and_then(present),
        mac_address: mac.and_then(|addr| addr.attribute("addr")).and_then(present),
        vendor: mac.and_then(|addr| addr.attribute("vendor")).and_then(present),
        status,
        open_ports,
    })
}

fn parse_port(port: Node) -> Result<Port, ScanError> {
    let port_id = port
        .attribute("portid")
        .ok_or_else(|| ScanError::corrupt("port without a portid"))?;
    let port_number = port_id
        .trim()
        .parse::<u16>()
        .map_err(|_| ScanError::corrupt(format!("invalid portid '{port_id}'")))?;

    let protocol = port
        .attribute("protocol")
        .and_then(present)
        .ok_or_else(|| ScanError::corrupt(format!("port {port_number} without a protocol")))?;

    let state = child(port, "state")
        .and_then(|state| state.attribute("state"))
        .and_then(present)
        .ok_or_else(|| ScanError::corrupt(format!("port {port_number} without a state")))?;

    let service_name = child(port, "service")
        .and_then(|service| service.attribute("name"))
        .and_then(present);

    Ok(Port {
        port_number,
        protocol,
        service_name,
        state,
    })
}

/// First `address` child of `host` with the given `addrtype`.
fn address<'a, 'input>(host: Node<'a, 'input>, addr_type: &str) -> Option<Node<'a, 'input>> {
    host.children()
        .find(|node| node.has_tag_name("address") && node.attribute("addrtype") == Some(addr_type))
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(tag))
}

fn present(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn summarize(summary: &str) -> Option<String> {
    let detail = summary.split(';').nth(1).and_then(present);
    if detail.is_none() {
        debug!(summary, "run summary has an unexpected shape, dropping it");
    }
    detail
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
