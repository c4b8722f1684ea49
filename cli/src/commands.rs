pub mod options;
pub mod scan;
pub mod serve;

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use vision_common::config::Config;
use vision_common::scan::{ScanType, Timing};

#[derive(Parser)]
#[command(name = "vision")]
#[command(about = "Network scans over nmap, from the terminal or over HTTP.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Path of the nmap executable
    #[arg(long, global = true, env = "VISION_SCANNER", default_value = "nmap")]
    pub scanner: PathBuf,

    /// Directory for per-scan report files [default: system temp dir]
    #[arg(long, global = true, env = "VISION_ARTIFACT_DIR")]
    pub artifact_dir: Option<PathBuf>,

    /// Kill a scan that runs longer than this (e.g. `90s`, `10m`)
    #[arg(long, global = true, env = "VISION_SCAN_TIMEOUT", value_parser = humantime::parse_duration)]
    pub scan_timeout: Option<Duration>,

    /// Fill in missing MAC vendors from the OUI database
    #[arg(long, global = true, env = "VISION_ENRICH_VENDORS")]
    pub enrich_vendors: bool,

    /// Less output. Repeat to only print the summary
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the scan API over HTTP
    Serve {
        #[arg(long, env = "VISION_HOST", default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(short, long, env = "VISION_PORT", default_value_t = 5000)]
        port: u16,
    },
    /// Scan a target once and print what was found
    Scan(ScanArgs),
    /// List the supported scan types and timing templates
    #[command(alias = "o")]
    Options,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Host, range or network, as nmap understands it
    pub target: String,

    /// Scan technique flag
    #[arg(short = 't', long, default_value = "-sS", allow_hyphen_values = true)]
    pub scan_type: ScanType,

    /// Timing template flag
    #[arg(short = 'T', long, default_value = "-T3", allow_hyphen_values = true)]
    pub timing: Timing,

    /// Port selection, e.g. `22,80,443` or `1-1024`
    #[arg(short, long)]
    pub ports: Option<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        let defaults = Config::default();
        Config {
            scanner_path: self.scanner.clone(),
            artifact_dir: self.artifact_dir.clone().unwrap_or(defaults.artifact_dir),
            scan_timeout: self.scan_timeout,
            enrich_vendors: self.enrich_vendors,
        }
    }
}
