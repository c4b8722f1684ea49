//! # Scan Errors
//!
//! Faults that escape an orchestration. Expected endings of a scan (the tool
//! failing, the caller cancelling) are not errors; they are reported through
//! [`crate::scan::ScanOutcome`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The request parameters are malformed. Rejected before any process starts.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The scanner executable could not be started at all.
    #[error("failed to launch scanner '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The scanner exited cleanly but its report could not be understood.
    #[error("scan report is corrupt: {0}")]
    ReportCorrupt(String),

    /// Creating, reading or removing the per-scan report file failed.
    #[error("artifact i/o failed for {}: {source}", path.display())]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Waiting on the scanner process failed after it was started.
    #[error("failed to supervise scanner process: {0}")]
    Supervision(#[source] io::Error),
}

impl ScanError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::ReportCorrupt(msg.into())
    }

    /// `true` when the caller is at fault and may fix the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}
