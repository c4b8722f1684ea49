use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::ScanError;
use crate::scan::{ScanOutcome, ScanRequest};

/// Entry point of the scan engine as seen by its adapters (HTTP, CLI).
///
/// One call is one orchestration. `scan_id` scopes every transient resource
/// of the run, and cancelling `cancel` terminates the scanner process.
#[async_trait]
pub trait ScanEngine: Send + Sync {
    async fn scan(
        &self,
        scan_id: Uuid,
        request: ScanRequest,
        cancel: CancellationToken,
    ) -> Result<ScanOutcome, ScanError>;
}
