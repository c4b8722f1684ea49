//! # Vision Core
//!
//! The scan orchestration engine. One orchestration turns a
//! [`ScanRequest`](vision_common::scan::ScanRequest) into a
//! [`ScanOutcome`](vision_common::scan::ScanOutcome):
//!
//! 1. [`artifact`] reserves a report path unique to the scan.
//! 2. [`command`] builds the scanner's argument list.
//! 3. [`supervisor`] runs the scanner and enforces cancellation.
//! 4. [`report`] parses the XML report into devices.
//! 5. The report path is released, whatever happened above.
//!
//! [`service::ScanService`] wires these steps together and is the only type
//! adapters need.

pub mod artifact;
pub mod command;
pub mod report;
pub mod service;
pub mod supervisor;
pub mod vendors;

pub use service::ScanService;
