//! # Scan Service
//!
//! Implements the "scan a target" use case on top of the engine parts.
//!
//! Per request the service acquires exactly one report artifact and releases
//! it exactly once before returning, whichever way the scan ended. A failed
//! release is logged and never replaces the scan's own outcome.

use std::path::Path;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;
use vision_common::config::Config;
use vision_common::error::ScanError;
use vision_common::scan::{ScanOutcome, ScanRequest, ScanResult};
use vision_common::scanning::ScanEngine;
use vision_common::vendors::VendorLookup;

use crate::artifact::ArtifactStore;
use crate::command;
use crate::report;
use crate::supervisor::{ExitOutcome, ProcessSupervisor};
use crate::vendors::OuiVendorLookup;

const FAILED_MESSAGE: &str = "Scan failed.";
const TIMED_OUT_MESSAGE: &str = "Scan timed out.";

/// Application service for network scans.
///
/// Orchestrates one scan by:
/// 1. reserving a report path through the [`ArtifactStore`],
/// 2. building the scanner arguments,
/// 3. delegating the run to the [`ProcessSupervisor`],
/// 4. parsing the report on success and optionally enriching vendors.
pub struct ScanService {
    artifacts: ArtifactStore,
    supervisor: ProcessSupervisor,
    vendors: Option<Box<dyn VendorLookup>>,
}

impl ScanService {
    pub fn new(artifacts: ArtifactStore, supervisor: ProcessSupervisor) -> Self {
        Self {
            artifacts,
            supervisor,
            vendors: None,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let supervisor =
            ProcessSupervisor::new(&cfg.scanner_path).with_time_limit(cfg.scan_timeout);
        let service = Self::new(ArtifactStore::new(&cfg.artifact_dir), supervisor);

        if cfg.enrich_vendors {
            service.with_vendor_lookup(Box::new(OuiVendorLookup))
        } else {
            service
        }
    }

    pub fn with_vendor_lookup(mut self, vendors: Box<dyn VendorLookup>) -> Self {
        self.vendors = Some(vendors);
        self
    }

    /// Executes one scan end to end.
    pub async fn run(
        &self,
        scan_id: Uuid,
        request: ScanRequest,
        cancel: CancellationToken,
    ) -> Result<ScanOutcome, ScanError> {
        let artifact = self.artifacts.acquire(scan_id)?;
        let outcome = self.execute(&request, artifact.path(), &cancel).await;

        if let Err(err) = artifact.release() {
            warn!(error = %err, "failed to release report artifact");
        }

        match &outcome {
            Ok(ScanOutcome::Completed(result)) => {
                info!(devices = result.devices.len(), "scan completed")
            }
            Ok(ScanOutcome::Failed { message, .. }) => warn!(%message, "scan failed"),
            Ok(ScanOutcome::Cancelled) => info!("scan cancelled"),
            Err(err) => warn!(error = %err, "scan aborted"),
        }
        outcome
    }

    async fn execute(
        &self,
        request: &ScanRequest,
        report_path: &Path,
        cancel: &CancellationToken,
    ) -> Result<ScanOutcome, ScanError> {
        let args = command::build_arguments(request, report_path)?;

        match self.supervisor.run(&args, cancel).await? {
            ExitOutcome::Success => {
                let mut result = report::parse_report(report_path).await?;
                self.enrich_vendors(&mut result);
                Ok(ScanOutcome::Completed(result))
            }
            ExitOutcome::Failure { code, stderr } => {
                debug!(?code, "scanner reported a failure");
                Ok(ScanOutcome::Failed {
                    message: FAILED_MESSAGE.to_string(),
                    error_output: stderr,
                })
            }
            ExitOutcome::TimedOut(limit) => Ok(ScanOutcome::Failed {
                message: TIMED_OUT_MESSAGE.to_string(),
                error_output: format!(
                    "scan exceeded the time limit of {}",
                    humantime::format_duration(limit)
                ),
            }),
            ExitOutcome::Cancelled => Ok(ScanOutcome::Cancelled),
        }
    }

    fn enrich_vendors(&self, result: &mut ScanResult) {
        let Some(vendors) = &self.vendors else {
            return;
        };
        for device in result.devices.iter_mut().filter(|d| d.vendor.is_none()) {
            if let Some(mac) = &device.mac_address {
                device.vendor = vendors.vendor_for(mac);
            }
        }
    }
}

#[async_trait]
impl ScanEngine for ScanService {
    async fn scan(
        &self,
        scan_id: Uuid,
        request: ScanRequest,
        cancel: CancellationToken,
    ) -> Result<ScanOutcome, ScanError> {
        let span = info_span!(
            "scan",
            %scan_id,
            scan_type = %request.scan_type(),
            target = %request.target(),
        );
        self.run(scan_id, request, cancel).instrument(span).await
    }
}
