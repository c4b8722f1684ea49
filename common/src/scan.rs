//! # Scan Models
//!
//! * [`options::ScanType`] / [`options::Timing`]: the closed catalogue of scanner flags.
//! * [`request::ScanRequest`]: validated input of one orchestration.
//! * [`device::Device`] / [`device::Port`]: hosts as reported by the scanner.
//! * [`outcome::ScanOutcome`]: how an orchestration ended.

pub mod device;
pub mod options;
pub mod outcome;
pub mod request;

pub use device::{Device, Port, ScanResult};
pub use options::{ScanType, Timing};
pub use outcome::ScanOutcome;
pub use request::ScanRequest;
