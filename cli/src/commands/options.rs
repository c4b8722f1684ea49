use vision_common::scan::{ScanType, Timing};

use crate::terminal::print;

pub fn options(quiet: u8) {
    let key_width = ScanType::ALL
        .iter()
        .map(|t| t.flag().len())
        .chain(Timing::ALL.iter().map(|t| t.flag().len()))
        .max()
        .unwrap_or(0);

    print::header("scan types", quiet);
    for scan_type in ScanType::ALL {
        print::aligned_line(scan_type.flag(), scan_type.label(), key_width);
    }

    print::header("timing templates", quiet);
    for timing in Timing::ALL {
        print::aligned_line(timing.flag(), timing.label(), key_width);
    }
}
