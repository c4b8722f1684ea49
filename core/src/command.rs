use std::ffi::OsString;
use std::path::Path;

use vision_common::error::ScanError;
use vision_common::scan::ScanRequest;

const PORTS_FLAG: &str = "-p";
const XML_OUTPUT_FLAG: &str = "-oX";

/// Builds the scanner's argument list for `request`, writing its XML report to `output`.
///
/// The result is an argument vector, never a command string: the target is
/// handed to the scanner as one argument and no shell is involved.
///
/// Order: scan type, target, timing, `-p <ports>` (only when ports were
/// supplied), `-oX <output>`.
pub fn build_arguments(request: &ScanRequest, output: &Path) -> Result<Vec<OsString>, ScanError> {
    let scan_flag = require("scan type", request.scan_type().flag())?;
    let target = require("target", request.target())?;
    let timing_flag = require("timing", request.timing().flag())?;
    if output.as_os_str().is_empty() {
        return Err(ScanError::invalid("report path must not be empty"));
    }

    let mut args: Vec<OsString> = Vec::with_capacity(7);
    args.push(scan_flag.into());
    args.push(target.into());
    args.push(timing_flag.into());

    if let Some(ports) = request.ports() {
        args.push(PORTS_FLAG.into());
        args.push(require("port list", ports)?.into());
    }

    args.push(XML_OUTPUT_FLAG.into());
    args.push(output.as_os_str().to_owned());

    Ok(args)
}

fn require<'a>(what: &str, value: &'a str) -> Result<&'a str, ScanError> {
    if value.trim().is_empty() {
        Err(ScanError::invalid(format!("{what} must not be empty")))
    } else {
        Ok(value)
    }
}
