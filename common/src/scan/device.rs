use serde::{Deserialize, Serialize};

/// A host found by the scanner, in the order the scanner reported it.
///
/// Every optional field is `None` when the scanner did not report it. An empty
/// string is never used to mean "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub hostname: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub vendor: Option<String>,
    pub status: String,
    pub open_ports: Vec<Port>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub port_number: u16,
    pub protocol: String,
    pub service_name: Option<String>,
    pub state: String,
}

/// Terminal output of a successful orchestration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub devices: Vec<Device>,
    pub scan_summary: Option<String>,
}
