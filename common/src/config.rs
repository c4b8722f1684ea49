use std::path::PathBuf;
use std::time::Duration;

/// Engine settings shared by every orchestration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Executable invoked for every scan. Resolved through `PATH` when relative.
    pub scanner_path: PathBuf,
    /// Directory in which per-scan report files are created.
    pub artifact_dir: PathBuf,
    /// Upper bound on a single scanner run. `None` lets a scan run until it exits.
    pub scan_timeout: Option<Duration>,
    /// Fill in missing vendors from the OUI database.
    ///
    /// Does not override a vendor reported by the scanner.
    pub enrich_vendors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scanner_path: PathBuf::from("nmap"),
            artifact_dir: std::env::temp_dir(),
            scan_timeout: None,
            enrich_vendors: false,
        }
    }
}
