use colored::*;
use vision_common::scan::{Device, Port};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn device_title(device: &Device) -> &str {
    device
        .hostname
        .as_deref()
        .or(device.ip_address.as_deref())
        .unwrap_or("No hostname")
}

pub fn device_to_details(device: &Device) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();

    if let Some(ip) = &device.ip_address {
        details.push(("IPv4".to_string(), ip.color(colors::IPV4_ADDR)));
    }
    if let Some(mac) = &device.mac_address {
        details.push(("MAC".to_string(), mac.color(colors::MAC_ADDR)));
    }
    if let Some(vendor) = &device.vendor {
        details.push(("Vendor".to_string(), vendor.normal()));
    }
    details.push(("Status".to_string(), status_to_colored(&device.status)));

    details.extend(device.open_ports.iter().map(port_to_detail));
    details
}

pub fn port_to_detail(port: &Port) -> Detail {
    let color = match port.state.as_str() {
        "open" => colors::PORT_OPEN,
        _ => colors::PORT_OTHER,
    };
    let service = port.service_name.as_deref().unwrap_or("unknown");
    let value = format!(
        "{}/{} {} {}",
        port.port_number,
        port.protocol,
        port.state.color(color),
        service.color(colors::SECONDARY)
    );
    ("Port".to_string(), value.normal())
}

fn status_to_colored(status: &str) -> ColoredString {
    match status {
        "up" => status.green(),
        "down" => status.red(),
        _ => status.yellow(),
    }
}
