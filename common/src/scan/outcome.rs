use crate::scan::device::ScanResult;

/// How an orchestration ended.
///
/// Only expected endings live here. Faults (corrupt report, filesystem
/// trouble) are returned as [`crate::error::ScanError`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The scanner succeeded and its report was parsed.
    Completed(ScanResult),
    /// The scanner ran but did not succeed. `error_output` carries its stderr.
    Failed {
        message: String,
        error_output: String,
    },
    /// The caller cancelled the scan before the scanner exited.
    Cancelled,
}

impl ScanOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
