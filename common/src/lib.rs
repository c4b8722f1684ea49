//! # Vision Common
//!
//! Shared vocabulary of the scan engine: the request and result models, the
//! error taxonomy, runtime configuration and the ports (traits) that the
//! engine and its adapters meet at.
//!
//! * **[`scan`]**: `ScanRequest`, `Device`, `Port`, `ScanResult`, `ScanOutcome`.
//! * **[`error`]**: [`error::ScanError`], the faults that escape an orchestration.
//! * **[`config`]**: [`config::Config`], engine settings.
//! * **[`scanning`]**: the [`scanning::ScanEngine`] port consumed by adapters.
//! * **[`vendors`]**: the [`vendors::VendorLookup`] port used for MAC enrichment.

pub mod config;
pub mod error;
pub mod scan;
pub mod scanning;
pub mod vendors;
