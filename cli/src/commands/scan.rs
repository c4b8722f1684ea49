use std::time::{Duration, Instant};

use anyhow::bail;
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};
use uuid::Uuid;
use vision_common::config::Config;
use vision_common::scan::{ScanOutcome, ScanRequest, ScanResult};
use vision_common::scanning::ScanEngine;
use vision_core::ScanService;

use crate::commands::ScanArgs;
use crate::terminal::spinner::Spinner;
use crate::terminal::{colors, format, print};

pub async fn scan(args: ScanArgs, cfg: &Config, quiet: u8) -> anyhow::Result<()> {
    let request = ScanRequest::new(args.scan_type, args.target, args.timing, args.ports)?;
    let service = ScanService::from_config(cfg);

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let spinner = Spinner::start(format!(
        "Running {} scan on {}",
        request.scan_type().label().bold(),
        request.target().color(colors::PRIMARY)
    ));
    let start_time = Instant::now();
    let outcome = service.scan(Uuid::new_v4(), request, cancel).await;
    drop(spinner);
    ctrl_c.abort();

    match outcome? {
        ScanOutcome::Completed(result) => {
            scan_ends(&result, start_time.elapsed(), quiet);
            Ok(())
        }
        ScanOutcome::Failed {
            message,
            error_output,
        } => {
            for line in error_output.lines() {
                error!("{line}");
            }
            bail!(message)
        }
        ScanOutcome::Cancelled => {
            warn!("scan cancelled");
            Ok(())
        }
    }
}

fn scan_ends(result: &ScanResult, total_time: Duration, quiet: u8) {
    if result.devices.is_empty() {
        print::header("zero hosts detected", quiet);
        print::no_results();
        return;
    }

    print::header("scan results", quiet);
    if quiet < 2 {
        print_devices(result);
    }
    print_summary(result, total_time);
}

fn print_devices(result: &ScanResult) {
    for (idx, device) in result.devices.iter().enumerate() {
        print::tree_head(idx, format::device_title(device));
        print::as_tree_one_level(format::device_to_details(device));
        if idx + 1 != result.devices.len() {
            print::print("");
        }
    }
}

fn print_summary(result: &ScanResult, total_time: Duration) {
    let hosts: ColoredString = format!("{} hosts", result.devices.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!("Scan Complete: {hosts} reported in {total_time}")
        .color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&output.to_string());
    if let Some(summary) = &result.scan_summary {
        print::centerln(&summary.dimmed().to_string());
    }
}
