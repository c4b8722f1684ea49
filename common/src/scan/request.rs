//! # Scan Request
//!
//! The validated input of one orchestration.
//!
//! The target is never interpreted by the engine: it travels to the scanner
//! as a single argument. Validation only rejects values the scanner would read
//! as something other than a target or port list (empty values, option-like
//! values, control characters).

use crate::error::ScanError;
use crate::scan::options::{ScanType, Timing};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    scan_type: ScanType,
    target: String,
    timing: Timing,
    ports: Option<String>,
}

impl ScanRequest {
    /// Builds a request from already typed options.
    ///
    /// An empty or blank `ports` is treated as "not supplied".
    pub fn new(
        scan_type: ScanType,
        target: impl Into<String>,
        timing: Timing,
        ports: Option<String>,
    ) -> Result<Self, ScanError> {
        let target = validate_target(target.into())?;
        let ports = ports.map(validate_ports).transpose()?.flatten();

        Ok(Self {
            scan_type,
            target,
            timing,
            ports,
        })
    }

    /// Builds a request from raw wire values (`"-sS"`, `"-T3"`, ...).
    pub fn parse(
        scan_type: &str,
        target: &str,
        timing: &str,
        ports: Option<&str>,
    ) -> Result<Self, ScanError> {
        Self::new(
            scan_type.parse()?,
            target,
            timing.parse()?,
            ports.map(str::to_owned),
        )
    }

    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn ports(&self) -> Option<&str> {
        self.ports.as_deref()
    }
}

fn validate_target(target: String) -> Result<String, ScanError> {
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return Err(ScanError::invalid("target must not be empty"));
    }
    if trimmed.starts_with('-') {
        return Err(ScanError::invalid(format!(
            "target '{trimmed}' must not start with '-'"
        )));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(ScanError::invalid("target contains control characters"));
    }
    Ok(trimmed.to_owned())
}

fn validate_ports(ports: String) -> Result<Option<String>, ScanError> {
    let trimmed = ports.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.starts_with('-') {
        return Err(ScanError::invalid(format!(
            "port list '{trimmed}' must not start with '-'"
        )));
    }
    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ScanError::invalid(format!(
            "port list '{trimmed}' must not contain whitespace"
        )));
    }
    Ok(Some(trimmed.to_owned()))
}
